//! Shared types crossing the store and provider seams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vociform_core::{Form, FormField, PlanTier};

/// Defaults applied when a usage account is lazily created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountDefaults {
    /// Tier assigned to new accounts
    pub plan_tier: PlanTier,
    /// Monthly call ceiling for that tier
    pub calls_limit: i32,
    /// End of the first billing period
    pub period_end: DateTime<Utc>,
}

/// A form together with its response count, for owner dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    /// The form itself
    #[serde(flatten)]
    pub form: Form,
    /// Number of responses received so far
    pub response_count: i64,
}

/// Partial update to a form; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormUpdate {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// Replacement field definitions
    pub fields: Option<Vec<FormField>>,
    /// Activate or deactivate the form
    pub is_active: Option<bool>,
}

/// An audio payload captured from a respondent.
///
/// # Examples
///
/// ```
/// use vociform_interface::AudioPayload;
///
/// let audio = AudioPayload::new(vec![0u8; 16], "audio/webm");
/// assert_eq!(audio.size(), 16);
/// assert_eq!(audio.base_mime_type(), "audio/webm");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPayload {
    /// Raw audio bytes
    pub bytes: Vec<u8>,
    /// MIME type as reported by the client, possibly with a
    /// `;codecs=` suffix
    pub mime_type: String,
    /// Original filename, when the client supplied one
    pub filename: Option<String>,
}

impl AudioPayload {
    /// Create a payload without a filename.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            filename: None,
        }
    }

    /// Attach the client-supplied filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// MIME type with any `;codecs=` parameter stripped.
    pub fn base_mime_type(&self) -> &str {
        self.mime_type
            .split(';')
            .next()
            .unwrap_or(&self.mime_type)
            .trim()
    }
}

/// Text produced by the transcription provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
}
