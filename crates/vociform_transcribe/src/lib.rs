//! Speech-to-text provider drivers.
//!
//! Currently ships a single driver for the OpenAI Whisper
//! transcription endpoint. Payload validation lives here too so
//! callers can reject oversized or mistyped audio before spending a
//! provider call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod validate;
mod whisper;

pub use validate::validate_audio;
pub use whisper::WhisperDriver;
