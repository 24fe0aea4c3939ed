//! Trait definitions for Vociform's persistent stores and the
//! transcription provider.
//!
//! The HTTP layer and the quota logic depend only on these seams, so the
//! diesel-backed stores and the Whisper client stay swappable (and
//! mockable in tests).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{FormStore, ResponseStore, Transcriber, UsageStore};
pub use types::{AccountDefaults, AudioPayload, FormSummary, FormUpdate, Transcription};
