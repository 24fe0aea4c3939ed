//! Audio payload validation.

use vociform_error::{TranscribeError, TranscribeErrorKind};
use vociform_interface::AudioPayload;

/// Reject payloads that are empty, oversized, or of an unsupported
/// MIME type. `formats` holds base MIME types; a `;codecs=` suffix on
/// the payload's reported type is ignored for matching.
pub fn validate_audio(
    audio: &AudioPayload,
    max_bytes: usize,
    formats: &[&str],
) -> Result<(), TranscribeError> {
    if audio.bytes.is_empty() {
        return Err(TranscribeError::new(TranscribeErrorKind::MissingAudio));
    }
    if audio.size() > max_bytes {
        return Err(TranscribeError::new(TranscribeErrorKind::TooLarge {
            size: audio.size(),
            max: max_bytes,
        }));
    }
    let base = audio.base_mime_type();
    if !formats.iter().any(|f| f.eq_ignore_ascii_case(base)) {
        return Err(TranscribeError::new(
            TranscribeErrorKind::UnsupportedFormat(audio.mime_type.clone()),
        ));
    }
    Ok(())
}
