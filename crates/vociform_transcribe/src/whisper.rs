//! OpenAI Whisper transcription driver.

use crate::validate_audio;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};
use vociform_error::{TranscribeError, TranscribeErrorKind, VociformResult};
use vociform_interface::{AudioPayload, Transcriber, Transcription};
use vociform_quota::TranscriptionConfig;

const OPENAI_TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Response body from the transcription endpoint (json format).
#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// OpenAI Whisper API driver.
#[derive(Debug, Clone)]
pub struct WhisperDriver {
    client: Client,
    api_key: String,
    config: TranscriptionConfig,
}

impl WhisperDriver {
    /// Creates a new Whisper driver.
    ///
    /// Reads the API token from the `OPENAI_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API token is not set.
    #[instrument(skip_all, fields(model = %config.model))]
    pub fn new(config: TranscriptionConfig) -> Result<Self, TranscribeError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|e| {
            TranscribeError::new(TranscribeErrorKind::Authentication(format!(
                "OPENAI_API_KEY not set: {}",
                e
            )))
        })?;
        Ok(Self::with_api_key(api_key, config))
    }

    /// Creates a new Whisper driver with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: TranscriptionConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            config,
        }
    }

    fn build_form(&self, audio: &AudioPayload) -> Result<Form, TranscribeError> {
        let filename = audio
            .filename
            .clone()
            .unwrap_or_else(|| "recording.webm".to_string());
        let part = Part::bytes(audio.bytes.clone())
            .file_name(filename)
            .mime_str(audio.base_mime_type())
            .map_err(|e| {
                TranscribeError::new(TranscribeErrorKind::UnsupportedFormat(e.to_string()))
            })?;

        let mut form = Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("temperature", self.config.temperature.to_string())
            .text("response_format", "json");
        if let Some(language) = &self.config.language {
            form = form.text("language", language.clone());
        }
        Ok(form)
    }

    async fn api_error(response: reqwest::Response) -> TranscribeError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail: Option<OpenAiErrorBody> = serde_json::from_str(&body).ok();
        let (message, code) = match detail {
            Some(b) => (b.error.message, b.error.code),
            None => (body, None),
        };
        error!(status, %message, "Transcription API returned error");

        let kind = match status {
            401 | 403 => TranscribeErrorKind::Authentication(message),
            429 => TranscribeErrorKind::ProviderQuota,
            400 => TranscribeErrorKind::InvalidAudio(message),
            _ if code.as_deref() == Some("insufficient_quota") => {
                TranscribeErrorKind::ProviderQuota
            }
            _ => TranscribeErrorKind::Api { status, message },
        };
        TranscribeError::new(kind)
    }
}

#[async_trait]
impl Transcriber for WhisperDriver {
    #[instrument(skip(self, audio), fields(provider = "openai", size = audio.size(), mime = %audio.mime_type))]
    async fn transcribe(&self, audio: &AudioPayload) -> VociformResult<Transcription> {
        validate_audio(
            audio,
            self.max_audio_size_bytes(),
            self.supported_audio_formats(),
        )?;

        let form = self.build_form(audio)?;
        let response = self
            .client
            .post(OPENAI_TRANSCRIPTION_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to reach transcription API");
                TranscribeError::new(TranscribeErrorKind::Http(e.to_string()))
            })?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await.into());
        }

        let body: WhisperResponse = response.json().await.map_err(|e| {
            TranscribeError::new(TranscribeErrorKind::Api {
                status: 200,
                message: format!("Failed to parse response: {}", e),
            })
        })?;
        debug!(text_len = body.text.len(), "Received transcription");
        Ok(Transcription { text: body.text })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn max_audio_size_bytes(&self) -> usize {
        self.config.max_audio_bytes
    }
}
