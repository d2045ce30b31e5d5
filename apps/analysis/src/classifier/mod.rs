/// Classifier — the single seam through which the pipeline talks to an AI model.
///
/// ARCHITECTURAL RULE: no extractor may call a model vendor directly.
/// Extractors receive a `&dyn Classifier` and treat its output as untrusted
/// text to be leniently parsed. Implementations may be the real Anthropic
/// client below or a deterministic stub in tests.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod lenient;
pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all classification calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("model returned empty content")]
    EmptyContent,

    #[error("unknown classification task: {0}")]
    UnknownTask(String),

    #[error("classification timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// A single request/response classification capability.
///
/// The response is an untyped string — callers run it through
/// `lenient::parse_lenient` and fall back to heuristics on any failure.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, task: &str, payload: &Value) -> Result<String, ClassifierError>;
}

/// Issues a single classification with the caller's deadline. A timeout is
/// treated exactly like a call failure: the caller falls back to heuristics
/// and never blocks indefinitely.
pub async fn classify_with_timeout(
    classifier: &dyn Classifier,
    task: &str,
    payload: &Value,
    timeout: std::time::Duration,
) -> Result<String, ClassifierError> {
    tokio::time::timeout(timeout, classifier.classify(task, payload))
        .await
        .map_err(|_| ClassifierError::Timeout(timeout))?
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ApiResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Anthropic-backed classifier. Wraps the Messages API with retry logic;
/// retries live here, in the collaborator that owns the network call — the
/// pipeline itself issues exactly one `classify` per stage.
#[derive(Clone)]
pub struct ClaudeClassifier {
    client: Client,
    api_key: String,
}

impl ClaudeClassifier {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a raw call to the API, returning the text content.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn call(&self, prompt: &str, system: &str) -> Result<String, ClassifierError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<ClassifierError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "classifier call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ClassifierError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("classifier API returned {}: {}", status, body);
                last_error = Some(ClassifierError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(ClassifierError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let api_response: ApiResponse = response.json().await?;

            debug!(
                "classifier call succeeded: input_tokens={}, output_tokens={}",
                api_response.usage.input_tokens, api_response.usage.output_tokens
            );

            return api_response
                .text()
                .map(str::to_string)
                .ok_or(ClassifierError::EmptyContent);
        }

        Err(last_error.unwrap_or(ClassifierError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl Classifier for ClaudeClassifier {
    async fn classify(&self, task: &str, payload: &Value) -> Result<String, ClassifierError> {
        let (system, template) = prompts::template_for(task)
            .ok_or_else(|| ClassifierError::UnknownTask(task.to_string()))?;
        let prompt = render_template(template, payload);
        self.call(&prompt, system).await
    }
}

/// Fills `{key}` placeholders in a template from the payload object.
/// String values are substituted verbatim; other values as JSON.
fn render_template(template: &str, payload: &Value) -> String {
    let mut rendered = template.to_string();
    if let Some(object) = payload.as_object() {
        for (key, value) in object {
            let placeholder = format!("{{{key}}}");
            let replacement = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            rendered = rendered.replace(&placeholder, &replacement);
        }
    }
    rendered
}
