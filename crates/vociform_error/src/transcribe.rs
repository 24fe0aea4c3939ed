//! Transcription provider error types.

/// Transcription error conditions.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum TranscribeErrorKind {
    /// Request did not carry an audio payload
    #[display("No audio file provided")]
    MissingAudio,
    /// Payload exceeds the size cap
    #[display("Audio file too large: {} bytes (maximum {})", size, max)]
    TooLarge {
        /// Size of the rejected payload in bytes
        size: usize,
        /// Maximum accepted size in bytes
        max: usize,
    },
    /// MIME type is not in the accepted set
    #[display("Invalid audio format: {}", _0)]
    UnsupportedFormat(String),
    /// Provider rejected the payload as unreadable or corrupt
    #[display("Invalid or corrupted audio file: {}", _0)]
    InvalidAudio(String),
    /// Provider-side quota is exhausted
    #[display("Transcription provider quota exceeded")]
    ProviderQuota,
    /// Provider returned an API-level error
    #[display("Provider API error {}: {}", status, message)]
    Api {
        /// HTTP status returned by the provider
        status: u16,
        /// Provider error message
        message: String,
    },
    /// Transport-level failure talking to the provider
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Provider API key is missing or rejected
    #[display("Provider authentication failed: {}", _0)]
    Authentication(String),
}

/// Transcription error with source location tracking.
///
/// # Examples
///
/// ```
/// use vociform_error::{TranscribeError, TranscribeErrorKind};
///
/// let err = TranscribeError::new(TranscribeErrorKind::MissingAudio);
/// assert!(format!("{}", err).contains("No audio file"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transcribe Error: {} at line {} in {}", kind, line, file)]
pub struct TranscribeError {
    /// The kind of error that occurred
    pub kind: TranscribeErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TranscribeError {
    /// Create a new TranscribeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TranscribeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the payload itself was rejected (client error, not infra).
    pub fn is_payload_rejection(&self) -> bool {
        matches!(
            self.kind,
            TranscribeErrorKind::MissingAudio
                | TranscribeErrorKind::TooLarge { .. }
                | TranscribeErrorKind::UnsupportedFormat(_)
                | TranscribeErrorKind::InvalidAudio(_)
        )
    }
}
