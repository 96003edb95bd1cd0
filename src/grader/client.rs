//! Grading oracle client with ordered candidate-model fallback.
//!
//! [`ExamGrader`] issues one structured request per candidate model, in
//! order, and stops at the first completion containing a well-formed JSON
//! object.  A candidate is never retried; exhausting the whole list returns
//! `None`, which callers treat as "grader unavailable" and answer with the
//! local heuristic instead.  Unavailability is a normal outcome here, not an
//! error.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::GraderConfig;
use crate::grader::extract::extract_json_object;

// ---------------------------------------------------------------------------
// GraderError
// ---------------------------------------------------------------------------

/// Errors from a single backend request.
#[derive(Debug, Error)]
pub enum GraderError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("grading request timed out")]
    Timeout,

    /// The backend answered with a non-success status code.
    #[error("backend returned status {0}")]
    Status(u16),

    /// The response body could not be read as a chat completion.
    #[error("failed to read grader response: {0}")]
    Body(String),
}

impl From<reqwest::Error> for GraderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GraderError::Timeout
        } else {
            GraderError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// GraderBackend trait
// ---------------------------------------------------------------------------

/// One structured completion request against one named model.
///
/// Implementors must be `Send + Sync` so the grader can be shared across
/// user sessions behind an `Arc`.
#[async_trait]
pub trait GraderBackend: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        system: &str,
        payload: &str,
    ) -> Result<String, GraderError>;
}

// ---------------------------------------------------------------------------
// HttpBackend
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// All connection details (`base_url`, `api_key`, timeout, temperature) come
/// from [`GraderConfig`]; nothing is hardcoded.
pub struct HttpBackend {
    client: reqwest::Client,
    config: GraderConfig,
}

impl HttpBackend {
    /// Build a backend from grader config.  The HTTP client carries the
    /// per-request timeout from `config.timeout_secs`.
    pub fn from_config(config: &GraderConfig) -> Self {
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
impl GraderBackend for HttpBackend {
    /// The `Authorization: Bearer …` header is attached only when
    /// `config.api_key` is a non-empty string, so local providers that need
    /// no authentication keep working.
    async fn complete(
        &self,
        model: &str,
        system: &str,
        payload: &str,
    ) -> Result<String, GraderError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":       model,
            "messages": [
                { "role": "system", "content": system  },
                { "role": "user",   "content": payload }
            ],
            "stream":      false,
            "temperature": self.config.temperature,
        });

        let mut req = self.client.post(&url).json(&body);

        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GraderError::Status(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| GraderError::Body(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| GraderError::Body("no completion text".into()))?;

        Ok(content.to_string())
    }
}

// ---------------------------------------------------------------------------
// GradeAttempt
// ---------------------------------------------------------------------------

/// Outcome of one candidate attempt, matched exhaustively by the fallback
/// loop.
enum GradeAttempt {
    /// The completion contained a well-formed JSON object.
    Success(Value),
    /// The completion arrived but contained no parsable JSON object.
    Malformed(String),
    /// The request itself failed (status, timeout, connection).
    Transport(GraderError),
}

// ---------------------------------------------------------------------------
// ExamGrader
// ---------------------------------------------------------------------------

/// The grading oracle client: an ordered candidate list over one backend.
pub struct ExamGrader {
    backend: Arc<dyn GraderBackend>,
    candidates: Vec<String>,
}

impl ExamGrader {
    /// Build a grader over an explicit backend (used by tests).
    pub fn new(backend: Arc<dyn GraderBackend>, candidates: Vec<String>) -> Self {
        Self {
            backend,
            candidates,
        }
    }

    /// Build the production grader from config.
    pub fn from_config(config: &GraderConfig) -> Self {
        Self::new(
            Arc::new(HttpBackend::from_config(config)),
            config.models.clone(),
        )
    }

    /// Run `system` + `payload` through the candidate list and return the
    /// first well-formed JSON judgment.
    ///
    /// Each candidate gets exactly one request.  `None` means every
    /// candidate failed; the caller falls back to its local heuristic.
    pub async fn grade(&self, system: &str, payload: &str) -> Option<Value> {
        for model in &self.candidates {
            match self.attempt(model, system, payload).await {
                GradeAttempt::Success(value) => {
                    log::info!("grader candidate {model} answered");
                    return Some(value);
                }
                GradeAttempt::Malformed(raw) => {
                    log::warn!(
                        "grader candidate {model} returned no JSON object (len={})",
                        raw.len()
                    );
                }
                GradeAttempt::Transport(e) => {
                    log::warn!("grader candidate {model} failed: {e}");
                }
            }
        }
        log::warn!("all {} grader candidates exhausted", self.candidates.len());
        None
    }

    async fn attempt(&self, model: &str, system: &str, payload: &str) -> GradeAttempt {
        let body = match self.backend.complete(model, system, payload).await {
            Ok(body) => body,
            Err(e) => return GradeAttempt::Transport(e),
        };

        let Some(span) = extract_json_object(&body) else {
            return GradeAttempt::Malformed(body);
        };

        match serde_json::from_str::<Value>(span) {
            Ok(value) if value.is_object() => GradeAttempt::Success(value),
            _ => GradeAttempt::Malformed(body),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
