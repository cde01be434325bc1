//! Focusboard's remote quote & chat collaborator.
//!
//! Talks to a chat-completions endpoint over HTTP. Every remote failure is
//! recovered locally: quotes fall back to a static list, chat falls back to a
//! canned apology. The timer engine never depends on this crate.

mod chat;
mod client;
mod quotes;

pub use chat::{ChatSession, FAILURE_REPLY, HISTORY_CONTEXT_LIMIT};
pub use client::{ChatClient, ClientError, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use quotes::{random_fallback_quote, QuoteFetcher, FALLBACK_QUOTES};
