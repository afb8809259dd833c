//! Whisperer scores prompts with a hosted LLM, optionally answers them, and
//! keeps an append-only history of `(prompt, score)` pairs.
//!
//! The pieces compose as:
//!
//! 1. [`critique::validate_prompt`] rejects empty, too short or too long input.
//! 2. [`critique::build_messages`] embeds the most recent history as guidance.
//! 3. A [`chat::ChatProvider`] (usually [`backends::groq::Groq`]) produces a reply.
//! 4. [`critique::parse_response`] splits the reply into evaluation, answer and score.
//! 5. [`critique::format_bullets`] turns bullet lines into list markup.
//! 6. [`session::CritiqueSession`] appends the result to the in-memory history,
//!    which [`history::HistoryStore`] persists on explicit save.

pub mod backends;
pub mod chat;
pub mod config;
pub mod critique;
pub mod error;
pub mod history;
pub mod rules;
pub mod session;

#[cfg(feature = "api")]
pub mod api;

pub use error::{LLMError, WhispererError};
pub use history::{History, HistoryEntry, HistoryStore};
pub use session::{CritiqueSession, Evaluation};
