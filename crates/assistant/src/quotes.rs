//! Motivational quotes, remote with a local fallback.

use focusboard_core::ChatMessage;
use rand::seq::SliceRandom;
use tracing::warn;

use crate::client::ChatClient;

const QUOTE_SYSTEM_PROMPT: &str = "You are a motivational quote generator. Generate short, \
     one-line motivational quotes about work, productivity, and success. Keep them simple \
     and inspiring.";

const QUOTE_USER_PROMPT: &str =
    "Give me a one-line motivational quote about work and productivity.";

/// Quotes served when the backend is unreachable or answers nonsense.
pub const FALLBACK_QUOTES: [&str; 15] = [
    "The only way to do great work is to love what you do. - Steve Jobs",
    "Productivity is never an accident. It is always the result of a commitment to excellence. - Paul J. Meyer",
    "Focus on being productive instead of busy. - Tim Ferriss",
    "The way to get started is to quit talking and begin doing. - Walt Disney",
    "Your work is going to fill a large part of your life. - Steve Jobs",
    "Success is the sum of small efforts repeated day in and day out. - Robert Collier",
    "The future depends on what you do today. - Mahatma Gandhi",
    "Don't watch the clock; do what it does. Keep going. - Sam Levenson",
    "The secret of getting ahead is getting started. - Mark Twain",
    "You don't have to be great to start, but you have to start to be great. - Zig Ziglar",
    "Work hard in silence, let your success be your noise. - Frank Ocean",
    "The only place where success comes before work is in the dictionary. - Vidal Sassoon",
    "Do something today that your future self will thank you for. - Unknown",
    "Productivity is being able to do things that you were never able to do before. - Franz Kafka",
    "The best time to plant a tree was 20 years ago. The second best time is now. - Chinese Proverb",
];

/// Pick a random quote from the static list.
pub fn random_fallback_quote() -> &'static str {
    FALLBACK_QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_QUOTES[0])
}

/// Fetches motivational quotes, falling back locally on any failure.
pub struct QuoteFetcher {
    client: ChatClient,
}

impl QuoteFetcher {
    /// Wrap a chat client.
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    /// Get one quote. Never fails: a remote error or malformed response
    /// yields a quote from the static list instead.
    pub async fn fetch(&self) -> String {
        let messages = [
            ChatMessage::system(QUOTE_SYSTEM_PROMPT),
            ChatMessage::user(QUOTE_USER_PROMPT),
        ];
        match self.client.complete(&messages, 50, 0.8).await {
            Ok(quote) if !quote.is_empty() => quote,
            Ok(_) => random_fallback_quote().to_string(),
            Err(e) => {
                warn!(error = %e, "quote fetch failed, using fallback");
                random_fallback_quote().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_quotes_come_from_the_list() {
        for _ in 0..32 {
            let quote = random_fallback_quote();
            assert!(FALLBACK_QUOTES.contains(&quote));
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        // Nothing listens here; the fetch must still produce a quote.
        let client = ChatClient::with_endpoint("http://127.0.0.1:1/", "deepseek-chat");
        let quote = QuoteFetcher::new(client).fetch().await;
        assert!(FALLBACK_QUOTES.contains(&quote.as_str()));
    }
}
