//! Top-level error wrapper types.

use crate::{AuthError, ConfigError, DatabaseError, TranscribeError};

/// This is the foundation error enum for the Vociform workspace.
///
/// # Examples
///
/// ```
/// use vociform_error::{VociformError, ConfigError};
///
/// let cfg_err = ConfigError::new("bad port");
/// let err: VociformError = cfg_err.into();
/// assert!(format!("{}", err).contains("Config Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VociformErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Authentication error
    #[from(AuthError)]
    Auth(AuthError),
    /// Transcription provider error
    #[from(TranscribeError)]
    Transcribe(TranscribeError),
}

/// Vociform error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vociform_error::{VociformResult, ConfigError};
///
/// fn might_fail() -> VociformResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("success"),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vociform Error: {}", _0)]
pub struct VociformError(Box<VociformErrorKind>);

impl VociformError {
    /// Create a new error from a kind.
    pub fn new(kind: VociformErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VociformErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VociformErrorKind
impl<T> From<T> for VociformError
where
    T: Into<VociformErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vociform operations.
///
/// # Examples
///
/// ```
/// use vociform_error::{VociformResult, ConfigError};
///
/// fn load() -> VociformResult<String> {
///     Err(ConfigError::new("not found"))?
/// }
/// ```
pub type VociformResult<T> = std::result::Result<T, VociformError>;
