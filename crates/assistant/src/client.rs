//! Chat-completions HTTP client.

use focusboard_core::ChatMessage;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// The default worker endpoint proxying the chat model.
pub const DEFAULT_ENDPOINT: &str = "https://fancy-sunset-b576.dreamy852.workers.dev/";

/// Model requested from the backend.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Errors from the remote collaborator.
///
/// Callers are expected to recover locally; none of these ever reach the user
/// as an error state.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the endpoint
    #[error("API error (status {0})")]
    Status(reqwest::StatusCode),

    /// Response body did not contain a completion
    #[error("malformed API response")]
    Malformed,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for the quote/chat backend.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl ChatClient {
    /// Create a client for the default endpoint and model.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    /// Create a client for a specific endpoint and model.
    pub fn with_endpoint(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Request one completion for the given conversation.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ClientError> {
        let payload = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": temperature,
        });
        debug!(endpoint = %self.endpoint, messages = messages.len(), "requesting completion");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let completion: CompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ClientError::Malformed)?;
        Ok(content.trim().to_string())
    }
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_with_choices_parses() {
        let raw = r#"{"choices": [{"message": {"role": "assistant",
                       "content": "  Keep going!  "}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content.trim(), "Keep going!");
    }

    #[test]
    fn response_without_choices_is_malformed() {
        let raw = r#"{"error": "overloaded"}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
