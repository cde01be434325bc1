//! Assistant chat session.
//!
//! Keeps the running transcript, sends a bounded window of it as context, and
//! picks the system prompt per message based on the script the user typed in.

use focusboard_core::{ChatMessage, ChatRole};
use tracing::warn;

use crate::client::ChatClient;

/// How many trailing history messages are sent as context.
pub const HISTORY_CONTEXT_LIMIT: usize = 10;

/// Canned reply when the backend cannot be reached.
pub const FAILURE_REPLY: &str =
    "I apologize, but I'm having trouble connecting right now. Please try again in a moment.";

const SYSTEM_PROMPT_EN: &str = "You are a helpful and supportive assistant for a work \
     productivity dashboard. Your responses should be concise (3-5 sentences) and follow \
     this format: 1) Show understanding of the user's situation, 2) Give practical advice, \
     3) Ask an inspiring question to motivate them. Be encouraging, practical, and focused \
     on productivity and personal growth.";

const SYSTEM_PROMPT_ZH: &str = "請用繁體中文回應。您是一個工作生產力儀表板的助手。\
     回應要簡潔（3-5句），格式：1) 表達理解，2) 給予實用建議，3) 提出激勵問題。\
     要鼓勵、實用，專注於生產力和個人成長。";

/// Detected script of a user message, used only to pick the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Cjk,
}

fn detect_script(text: &str) -> Script {
    // CJK Unified Ideographs block, as the original detector scanned.
    if text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c)) {
        Script::Cjk
    } else {
        Script::Latin
    }
}

/// A persisted conversation with the assistant.
#[derive(Debug, Default)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a persisted transcript.
    pub fn with_history(history: Vec<ChatMessage>) -> Self {
        Self { history }
    }

    /// The full transcript, for persistence.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Drop the transcript.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Send one user message and return the assistant's reply.
    ///
    /// Never fails: transport or response errors produce the canned apology.
    /// Both the user message and the reply are appended to the transcript.
    pub async fn send(&mut self, client: &ChatClient, text: &str) -> String {
        let system = match detect_script(text) {
            Script::Cjk => SYSTEM_PROMPT_ZH,
            Script::Latin => SYSTEM_PROMPT_EN,
        };

        let mut messages = vec![ChatMessage::system(system)];
        let context_start = self.history.len().saturating_sub(HISTORY_CONTEXT_LIMIT);
        messages.extend_from_slice(&self.history[context_start..]);
        messages.push(ChatMessage::user(text));

        self.history.push(ChatMessage::user(text));
        let reply = match client.complete(&messages, 150, 0.7).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                FAILURE_REPLY.to_string()
            }
        };
        self.history.push(ChatMessage::assistant(&reply));
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cjk_anywhere_in_the_message() {
        assert_eq!(detect_script("plan my day"), Script::Latin);
        assert_eq!(detect_script("幫我規劃一天"), Script::Cjk);
        assert_eq!(detect_script("please 翻譯 this"), Script::Cjk);
    }

    #[test]
    fn context_window_is_bounded() {
        let history: Vec<ChatMessage> = (0..25)
            .map(|i| ChatMessage::user(format!("msg {i}")))
            .collect();
        let session = ChatSession::with_history(history);
        let start = session.history().len().saturating_sub(HISTORY_CONTEXT_LIMIT);
        assert_eq!(session.history()[start..].len(), HISTORY_CONTEXT_LIMIT);
    }

    #[tokio::test]
    async fn failed_send_still_records_the_exchange() {
        let client = ChatClient::with_endpoint("http://127.0.0.1:1/", "deepseek-chat");
        let mut session = ChatSession::new();

        let reply = session.send(&client, "hello?").await;
        assert_eq!(reply, FAILURE_REPLY);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, ChatRole::User);
        assert_eq!(session.history()[1].role, ChatRole::Assistant);
        assert_eq!(session.history()[1].content, FAILURE_REPLY);
    }
}
