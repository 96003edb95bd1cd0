//! Speech-to-text oracle — trait and remote HTTP implementation.
//!
//! The oracle receives a plain WAV waveform and a target language and answers
//! with the best-effort transcript.  Oracle failures are real errors at this
//! level; the adapter above decides that they degrade to an empty transcript.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::SttConfig;

// ---------------------------------------------------------------------------
// SttError
// ---------------------------------------------------------------------------

/// Errors from a speech-recognition request.
#[derive(Debug, Error)]
pub enum SttError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("speech request timed out")]
    Timeout,

    /// The service answered with a non-success status code.
    #[error("speech service returned status {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("failed to parse speech response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SttError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SttError::Timeout
        } else {
            SttError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechToText trait
// ---------------------------------------------------------------------------

/// Async trait for the external speech-to-text oracle.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe a WAV waveform in the given language.  An empty string is
    /// a valid result (nothing intelligible was said).
    async fn transcribe(&self, wav: &[u8], language: &str) -> Result<String, SttError>;
}

// ---------------------------------------------------------------------------
// RemoteSpeechToText
// ---------------------------------------------------------------------------

/// POSTs the waveform to a configured recognition endpoint.
///
/// Expected reply: a JSON object with a `text` field.  All connection
/// details come from [`SttConfig`].
pub struct RemoteSpeechToText {
    client: reqwest::Client,
    config: SttConfig,
}

impl RemoteSpeechToText {
    pub fn from_config(config: &SttConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SpeechToText for RemoteSpeechToText {
    async fn transcribe(&self, wav: &[u8], language: &str) -> Result<String, SttError> {
        let url = format!("{}/v1/recognize", self.config.base_url);

        let mut req = self
            .client
            .post(&url)
            .query(&[("language", language)])
            .header("content-type", "audio/wav")
            .body(wav.to_vec());

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SttError::Status(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| SttError::Parse(e.to_string()))?;

        let text = json["text"]
            .as_str()
            .ok_or_else(|| SttError::Parse("missing text field".into()))?;

        Ok(text.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
