//! One interactive critique session.
//!
//! The session owns the in-memory history for its lifetime. History is read
//! from the store once when the session opens and written back only on an
//! explicit [`CritiqueSession::save`]; unsaved entries die with the session.

use serde::Serialize;

use crate::chat::ChatProvider;
use crate::critique::{build_messages, format_bullets, parse_response, validate_prompt};
use crate::error::{LLMError, WhispererError};
use crate::history::{History, HistoryEntry, HistoryStore};

/// Default number of past entries replayed to the model as guidance.
pub const DEFAULT_MAX_CONTEXT_ITEMS: usize = 5;

/// Outcome of one evaluation, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub prompt: String,
    /// Formatted evaluation text, or the whole reply when it had no sections.
    pub evaluation: String,
    /// Formatted answer text; `None` when the reply had no answer section.
    pub answer: Option<String>,
    pub score: f64,
    /// Reply as returned by the model, trimmed.
    #[serde(skip)]
    pub raw: String,
}

pub struct CritiqueSession {
    history: History,
    store: HistoryStore,
    provider: Box<dyn ChatProvider>,
    max_context_items: usize,
}

impl std::fmt::Debug for CritiqueSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CritiqueSession")
            .field("history", &self.history.len())
            .field("store", &self.store)
            .field("model", &self.provider.model())
            .field("max_context_items", &self.max_context_items)
            .finish()
    }
}

impl CritiqueSession {
    /// Opens a session, seeding its history from `store`.
    pub fn open(
        store: HistoryStore,
        provider: Box<dyn ChatProvider>,
        max_context_items: usize,
    ) -> Result<Self, WhispererError> {
        let history = store.load()?;
        Ok(Self::with_history(
            history,
            store,
            provider,
            max_context_items,
        ))
    }

    pub fn with_history(
        history: History,
        store: HistoryStore,
        provider: Box<dyn ChatProvider>,
        max_context_items: usize,
    ) -> Self {
        Self {
            history,
            store,
            provider,
            max_context_items,
        }
    }

    /// Validates, asks the model, parses and formats the reply, then records
    /// `(prompt, score)` in history.
    ///
    /// Invalid input and remote failures return early and leave history
    /// untouched. A reply without section markers still records an entry.
    pub async fn evaluate(&mut self, prompt: &str) -> Result<Evaluation, WhispererError> {
        validate_prompt(prompt)?;

        let messages = build_messages(self.history.recent(self.max_context_items), prompt);
        let response = self.provider.chat(&messages).await?;
        let raw = response
            .text()
            .ok_or_else(|| LLMError::ResponseFormatError {
                message: "model reply has no text content".to_string(),
                raw_response: response.to_string(),
            })?
            .trim()
            .to_string();

        let parsed = parse_response(&raw);
        if parsed.answer.is_none() {
            log::warn!("model reply has no section markers; using it whole as the evaluation");
        }
        let evaluation = format_bullets(&parsed.evaluation);
        let answer = parsed.answer.as_deref().map(format_bullets);

        self.history.push(HistoryEntry::new(prompt, parsed.score));
        log::debug!(
            "evaluated prompt, score {}, {} entries in session",
            parsed.score,
            self.history.len()
        );

        Ok(Evaluation {
            prompt: prompt.to_string(),
            evaluation,
            answer,
            score: parsed.score,
            raw,
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn max_context_items(&self) -> usize {
        self.max_context_items
    }

    /// Writes the whole history to the store. On failure the in-memory
    /// history is kept so the save can be retried.
    pub fn save(&self) -> Result<usize, WhispererError> {
        self.store.save(&self.history)?;
        Ok(self.history.len())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::chat::{ChatMessage, ChatResponse};
    use crate::history::FieldOrder;

    #[derive(Debug)]
    pub(crate) struct CannedResponse(pub Option<String>);

    impl std::fmt::Display for CannedResponse {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }

    impl ChatResponse for CannedResponse {
        fn text(&self) -> Option<String> {
            self.0.clone()
        }
    }

    /// Replies with a fixed text (or error) and records every request.
    #[derive(Clone, Default)]
    pub(crate) struct ScriptedProvider {
        pub reply: Option<String>,
        pub fail: bool,
        pub calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    }

    impl ScriptedProvider {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                ..Default::default()
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().expect("calls lock").len()
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        async fn chat(
            &self,
            messages: &[ChatMessage],
        ) -> Result<Box<dyn ChatResponse>, LLMError> {
            self.calls
                .lock()
                .expect("calls lock")
                .push(messages.to_vec());
            if self.fail {
                return Err(LLMError::HttpError("connection refused".to_string()));
            }
            Ok(Box::new(CannedResponse(self.reply.clone())))
        }
    }

    fn session_with(provider: ScriptedProvider, history: History) -> CritiqueSession {
        let store = HistoryStore::new("unused.csv", FieldOrder::default());
        CritiqueSession::with_history(history, store, Box::new(provider), DEFAULT_MAX_CONTEXT_ITEMS)
    }

    const STRUCTURED: &str = "### Prompt evaluation\nGood prompt, score: 7\n- add an audience\n- add a length\n### Answer Section\nParis is the capital.";

    #[tokio::test]
    async fn evaluate_parses_formats_and_records() {
        let provider = ScriptedProvider::replying(STRUCTURED);
        let mut session = session_with(provider.clone(), History::default());

        let result = session.evaluate("What is the capital of France?").await.expect("evaluate");

        assert_eq!(result.score, 7.0);
        assert_eq!(
            result.evaluation,
            "Good prompt, score: 7\n<ul><li>add an audience</li><li>add a length</li></ul>"
        );
        assert_eq!(result.answer.as_deref(), Some("Paris is the capital."));
        assert_eq!(
            session.history().entries(),
            [HistoryEntry::new("What is the capital of France?", 7.0)]
        );
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn invalid_prompt_never_reaches_the_model() {
        let provider = ScriptedProvider::replying(STRUCTURED);
        let mut session = session_with(provider.clone(), History::default());

        let err = session.evaluate("  hi ").await.unwrap_err();

        assert!(matches!(
            err,
            WhispererError::InvalidInput(crate::critique::ValidationError::TooShort)
        ));
        assert_eq!(provider.call_count(), 0);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn remote_failure_leaves_history_unchanged() {
        let seeded = History::new(vec![HistoryEntry::new("earlier", 5.0)]);
        let mut session = session_with(ScriptedProvider::failing(), seeded.clone());

        let err = session.evaluate("Explain quantum tunneling").await.unwrap_err();

        assert!(matches!(err, WhispererError::RemoteCall(LLMError::HttpError(_))));
        assert_eq!(session.history(), &seeded);
    }

    #[tokio::test]
    async fn missing_reply_text_is_a_remote_failure() {
        let provider = ScriptedProvider {
            reply: None,
            ..Default::default()
        };
        let mut session = session_with(provider, History::default());

        let err = session.evaluate("Explain quantum tunneling").await.unwrap_err();

        assert!(matches!(
            err,
            WhispererError::RemoteCall(LLMError::ResponseFormatError { .. })
        ));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn unstructured_reply_is_still_recorded() {
        let mut session = session_with(
            ScriptedProvider::replying("  I think this deserves a 4.5 overall.  "),
            History::default(),
        );

        let result = session.evaluate("Tell me about inflation").await.expect("evaluate");

        assert_eq!(result.evaluation, "I think this deserves a 4.5 overall.");
        assert_eq!(result.answer, None);
        assert_eq!(result.score, 4.5);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn reply_without_numbers_records_zero() {
        let mut session = session_with(
            ScriptedProvider::replying("Please be more specific."),
            History::default(),
        );

        session.evaluate("Do the thing").await.expect("evaluate");

        assert_eq!(session.history().entries()[0].score, 0.0);
    }

    #[tokio::test]
    async fn only_recent_history_is_sent_as_context() {
        let seeded = History::new(
            (1..=7)
                .map(|i| HistoryEntry::new(format!("old prompt {i}"), i as f64))
                .collect(),
        );
        let provider = ScriptedProvider::replying(STRUCTURED);
        let mut session = session_with(provider.clone(), seeded);

        session.evaluate("Summarize the Gita").await.expect("evaluate");

        let calls = provider.calls.lock().expect("calls lock");
        let system = &calls[0][0].content;
        assert!(!system.contains("old prompt 2,"));
        for i in 3..=7 {
            assert!(system.contains(&format!("- Prompt: old prompt {i}, Score: {i}.0")));
        }
        assert_eq!(calls[0][1].content, "Summarize the Gita");
    }

    #[tokio::test]
    async fn save_failure_keeps_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = HistoryStore::new(dir.path().join("missing").join("h.csv"), FieldOrder::default());
        let mut session = CritiqueSession::with_history(
            History::default(),
            store,
            Box::new(ScriptedProvider::replying(STRUCTURED)),
            DEFAULT_MAX_CONTEXT_ITEMS,
        );
        session.evaluate("What is the capital of France?").await.expect("evaluate");

        assert!(matches!(session.save(), Err(WhispererError::Io(_))));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn open_loads_then_save_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("h.csv");
        let store = HistoryStore::new(&path, FieldOrder::default());
        store
            .save(&History::new(vec![HistoryEntry::new("from disk", 2.0)]))
            .expect("seed");

        let mut session = CritiqueSession::open(
            store.clone(),
            Box::new(ScriptedProvider::replying(STRUCTURED)),
            DEFAULT_MAX_CONTEXT_ITEMS,
        )
        .expect("open");
        assert_eq!(session.history().len(), 1);

        session.evaluate("What is the capital of France?").await.expect("evaluate");
        assert_eq!(session.save().expect("save"), 2);

        let reloaded = store.load().expect("reload");
        assert_eq!(
            reloaded.entries(),
            [
                HistoryEntry::new("from disk", 2.0),
                HistoryEntry::new("What is the capital of France?", 7.0)
            ]
        );
    }
}
