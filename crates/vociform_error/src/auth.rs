//! Authentication error types.

/// Authentication error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AuthErrorKind {
    /// No bearer token was supplied
    #[display("Authentication required")]
    MissingToken,
    /// Token failed signature or claim validation
    #[display("Invalid token: {}", _0)]
    InvalidToken(String),
    /// Token subject is not a valid user id
    #[display("Malformed token subject: {}", _0)]
    MalformedSubject(String),
}

/// Authentication error with source location tracking.
///
/// # Examples
///
/// ```
/// use vociform_error::{AuthError, AuthErrorKind};
///
/// let err = AuthError::new(AuthErrorKind::MissingToken);
/// assert!(format!("{}", err).contains("Authentication required"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", kind, line, file)]
pub struct AuthError {
    /// The kind of error that occurred
    pub kind: AuthErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
