//! Client for the external text-completion service.
//!
//! One request per "generate subtasks" action. No retry, no rate limiting,
//! no structured-output validation: the first choice's text is returned as is.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use todo_core::{SUBTASK_MAX_TOKENS, SUBTASK_TEMPERATURE};

use crate::config::CompletionConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const COMPLETIONS_PATH: &str = "/v1/completions";
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Failure of one completion round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// No bearer credential is configured.
    MissingApiKey,
    /// Request did not finish within the given milliseconds.
    Timeout(u64),
    /// Connection or protocol failure before a response arrived.
    Transport(String),
    /// Service answered with a non-success status.
    Status { status: u16, body: String },
    /// Response body was not the expected JSON shape.
    Decode(String),
}

impl Display for CompletionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "completion API key is not configured"),
            Self::Timeout(ms) => write!(f, "completion request timed out after {ms}ms"),
            Self::Transport(message) => write!(f, "completion request failed: {message}"),
            Self::Status { status, body } => {
                write!(f, "completion service returned HTTP {status}: {body}")
            }
            Self::Decode(message) => write!(f, "invalid completion response: {message}"),
        }
    }
}

impl Error for CompletionError {}

/// Text-completion boundary used by the subtask fan-out.
pub trait CompletionClient: Send + Sync {
    /// Sends `prompt` and returns the generated text blob.
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, CompletionError>>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: Option<String>,
}

/// OpenAI-compatible `/v1/completions` client.
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl OpenAiCompletionClient {
    /// Creates a client from configuration. No network I/O happens here.
    pub fn new(config: &CompletionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}{COMPLETIONS_PATH}",
                config.base_url.trim_end_matches('/')
            ),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn send(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&CompletionRequest {
                model: &self.model,
                prompt,
                max_tokens: SUBTASK_MAX_TOKENS,
                temperature: SUBTASK_TEMPERATURE,
            })
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    CompletionError::Timeout(timeout_ms)
                } else {
                    CompletionError::Transport(error.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let payload: CompletionResponse = response
            .json()
            .await
            .map_err(|error| CompletionError::Decode(error.to_string()))?;

        Ok(payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.text)
            .unwrap_or_default())
    }
}

impl CompletionClient for OpenAiCompletionClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, CompletionError>> {
        Box::pin(self.send(prompt))
    }
}

/// Completion client returning a fixed result without network I/O.
///
/// Records every prompt it receives.
pub struct StubCompletionClient {
    result: Result<String, CompletionError>,
    prompts: Mutex<Vec<String>>,
}

impl StubCompletionClient {
    /// Stub that answers every prompt with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            result: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Stub that fails every prompt with `error`.
    pub fn with_error(error: CompletionError) -> Self {
        Self {
            result: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CompletionClient for StubCompletionClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, CompletionError>> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}
