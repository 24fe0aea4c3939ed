//! Error types for the Vociform voice form service.
//!
//! This crate provides the foundation error types used throughout the
//! Vociform workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean
//! error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use vociform_error::{VociformResult, ConfigError};
//!
//! fn load_settings() -> VociformResult<String> {
//!     Err(ConfigError::new("missing DATABASE_URL"))?
//! }
//!
//! match load_settings() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod database;
mod error;
mod transcribe;

pub use auth::{AuthError, AuthErrorKind};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{VociformError, VociformErrorKind, VociformResult};
pub use transcribe::{TranscribeError, TranscribeErrorKind};
