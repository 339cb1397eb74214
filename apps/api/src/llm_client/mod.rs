/// LLM Client — the single point of entry for Language Model Service calls.
///
/// ARCHITECTURAL RULE: no other module may talk to the provider directly.
/// Pipeline components depend on the object-safe [`Inference`] trait so tests
/// can substitute a scripted fake; `LlmClient` is the production impl.
///
/// Retry policy: transport-level failures (connect errors, timeouts, 429,
/// 5xx) are retried with bounded exponential backoff. Malformed response
/// bodies are NOT retried here — parsing is the caller's responsibility, and
/// callers treat parse failures as soft degradations.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const API_VERSION: &str = "2023-06-01";
/// The model used for all inference calls. Intentionally hardcoded to
/// prevent accidental drift between call sites.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport failures persisted after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Text-in, text-out inference. Object safe so `AppState` can hold
/// `Arc<dyn Inference>` and tests can script responses.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Sends one inference request and returns the raw response text.
    /// The prompt must instruct the model to return only a JSON object;
    /// parsing that object is the caller's job.
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
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

impl MessagesResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Production inference client over the provider's messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl LlmClient {
    /// `base_url` and `api_key` come from [`crate::config::Config`]; the
    /// per-call timeout is supplied by each call site, so no request-level
    /// default is baked in here.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    async fn call(
        &self,
        system: &str,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let request_body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(self.base_url.as_str())
                .timeout(timeout)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", API_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    // Connect failures and timeouts are transport-level:
                    // retryable up to the attempt budget.
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ProviderError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: MessagesResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                parsed.usage.input_tokens, parsed.usage.output_tokens
            );

            return parsed
                .text()
                .map(str::to_string)
                .ok_or(LlmError::EmptyContent);
        }

        Err(last_error.unwrap_or(LlmError::RetriesExhausted {
            attempts: MAX_ATTEMPTS,
        }))
    }
}

#[async_trait]
impl Inference for LlmClient {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        self.call(system, prompt, timeout).await
    }
}

/// Parses a JSON object out of raw model output, tolerating markdown code
/// fences the model sometimes wraps JSON in.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_code_fences(text))
}

fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let body = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match body {
        Some(inner) => {
            let inner = inner.trim_start();
            inner
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(inner)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn strips_fences_with_json_tag() {
        let input = "```json\n{\"score\": 80}\n```";
        assert_eq!(strip_code_fences(input), "{\"score\": 80}");
    }

    #[test]
    fn strips_bare_fences() {
        let input = "```\n{\"score\": 80}\n```";
        assert_eq!(strip_code_fences(input), "{\"score\": 80}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn parse_json_reply_handles_fenced_object() {
        let parsed: Value = parse_json_reply("```json\n{\"skills\": [\"Go\"]}\n```").unwrap();
        assert_eq!(parsed["skills"][0], "Go");
    }

    #[test]
    fn parse_json_reply_rejects_prose() {
        let result: Result<Value, _> = parse_json_reply("Sure! Here is the JSON you asked for");
        assert!(result.is_err());
    }
}
