//! Store and provider trait definitions.

use crate::{AccountDefaults, AudioPayload, FormSummary, FormUpdate, Transcription};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use vociform_core::{Form, FormResponse, NewForm, NewResponse, NewUsageEvent, UsageAccount};
use vociform_error::VociformResult;

/// Persistent store for usage accounts and the event log.
///
/// All quota state lives behind this trait; the service itself holds no
/// shared mutable state, so concurrent requests for the same user race
/// only at the store. That race is tolerated.
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// Load the account for `user_id`, creating it with `defaults` if
    /// absent. Creation must be an idempotent upsert: concurrent calls
    /// for a new user yield one row and every caller sees it.
    async fn get_or_create_account(
        &self,
        user_id: Uuid,
        defaults: AccountDefaults,
    ) -> VociformResult<UsageAccount>;

    /// Zero the counter and advance the period boundary. Idempotent:
    /// applying the same reset twice leaves the same final state.
    async fn reset_period(
        &self,
        user_id: Uuid,
        period_end: DateTime<Utc>,
    ) -> VociformResult<()>;

    /// Atomically add one to `calls_used`.
    async fn increment_usage(&self, user_id: Uuid) -> VociformResult<()>;

    /// Append an immutable usage event.
    async fn append_event(&self, event: NewUsageEvent) -> VociformResult<()>;

    /// Count events for `user_id` with `created_at >= since`.
    async fn recent_event_count(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> VociformResult<u64>;
}

/// Persistent store for forms.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Create a form owned by `owner`.
    async fn create_form(&self, owner: Uuid, form: NewForm) -> VociformResult<Form>;

    /// List the owner's forms, newest first, with response counts.
    async fn list_forms(&self, owner: Uuid) -> VociformResult<Vec<FormSummary>>;

    /// Fetch a form regardless of active flag (owner operations).
    async fn get_form(&self, id: Uuid) -> VociformResult<Option<Form>>;

    /// Fetch an active form for public display; `None` covers both
    /// missing and deactivated forms.
    async fn get_active_form(&self, id: Uuid) -> VociformResult<Option<Form>>;

    /// Apply a partial update to a form the owner holds. Returns
    /// `DatabaseErrorKind::NotFound` when the form is missing or owned
    /// by someone else.
    async fn update_form(
        &self,
        owner: Uuid,
        id: Uuid,
        update: FormUpdate,
    ) -> VociformResult<Form>;

    /// Delete a form the owner holds (same not-found semantics as
    /// `update_form`).
    async fn delete_form(&self, owner: Uuid, id: Uuid) -> VociformResult<()>;
}

/// Persistent store for submitted responses.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Record a response.
    async fn insert_response(&self, response: NewResponse) -> VociformResult<FormResponse>;

    /// List responses for a form, newest first.
    async fn list_responses(&self, form_id: Uuid) -> VociformResult<Vec<FormResponse>>;
}

/// Speech-to-text provider.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio payload to text.
    async fn transcribe(&self, audio: &AudioPayload) -> VociformResult<Transcription>;

    /// Provider name (e.g. "openai").
    fn provider_name(&self) -> &'static str;

    /// Maximum audio file size in bytes.
    fn max_audio_size_bytes(&self) -> usize {
        5 * 1024 * 1024 // 5MB default
    }

    /// Supported audio input formats (base MIME types; `;codecs=`
    /// suffixes are tolerated by the caller).
    fn supported_audio_formats(&self) -> &[&'static str] {
        &[
            "audio/webm",
            "audio/mp4",
            "audio/mpeg",
            "audio/wav",
            "audio/x-wav",
            "audio/wave",
            "audio/ogg",
        ]
    }
}
