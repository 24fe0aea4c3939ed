//! Shared application state.

use crate::AuthKeys;
use std::sync::Arc;
use vociform_interface::{FormStore, ResponseStore, Transcriber};
use vociform_quota::{QuotaGate, RateLimiter, TranscriptionConfig};

/// State threaded through every handler.
///
/// Stores and the transcriber sit behind trait objects so tests can
/// swap in in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    /// Form persistence.
    pub forms: Arc<dyn FormStore>,
    /// Response persistence.
    pub responses: Arc<dyn ResponseStore>,
    /// Speech-to-text provider.
    pub transcriber: Arc<dyn Transcriber>,
    /// Monthly call ceiling enforcement.
    pub quota: QuotaGate,
    /// Short-window rate limiting.
    pub limiter: RateLimiter,
    /// Token verification keys.
    pub auth: AuthKeys,
    /// Provider settings (cost per call, size cap).
    pub transcription: TranscriptionConfig,
}
