//! Vociform: the backend for a voice-enabled form builder.
//!
//! Owners create forms, respondents fill them (typed or dictated),
//! and the metered transcription endpoint enforces per-user monthly
//! quotas and a short-window rate cap.
//!
//! This facade crate re-exports the workspace surface; the `vociform`
//! binary wraps it in a CLI (`serve`, `migrate`, `check-db`).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use vociform_core::{
    advance_period, initial_period_end, FieldKind, Form, FormField, FormResponse, NewForm,
    NewResponse, NewUsageEvent, PlanTier, UsageAccount, UsageEvent,
};
pub use vociform_database::{
    create_pool, establish_connection, missing_tables, run_migrations, DatabaseFormStore,
    DatabaseResponseStore, DatabaseUsageStore, PgPool, EXPECTED_TABLES,
};
pub use vociform_error::{VociformError, VociformErrorKind, VociformResult};
pub use vociform_interface::{
    AccountDefaults, AudioPayload, FormStore, FormSummary, FormUpdate, ResponseStore,
    Transcriber, Transcription, UsageStore,
};
pub use vociform_quota::{
    Plan, QuotaDecision, QuotaGate, RateDecision, RateLimiter, VociformConfig,
};
pub use vociform_server::{create_router, AppState, AuthKeys};
pub use vociform_transcribe::{validate_audio, WhisperDriver};
