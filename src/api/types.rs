use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::session::Evaluation;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub prompt: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct EvaluateResponse {
    pub evaluation: String,
    pub answer: Option<String>,
    pub score: f64,
}

impl From<Evaluation> for EvaluateResponse {
    fn from(value: Evaluation) -> Self {
        Self {
            evaluation: value.evaluation,
            answer: value.answer,
            score: value.score,
        }
    }
}

/// History row as displayed: score with two decimals.
#[derive(Debug, PartialEq, Serialize)]
pub struct HistoryRow {
    pub prompt: String,
    pub score: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            prompt: entry.prompt.clone(),
            score: entry.score_display(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SaveResponse {
    pub saved: usize,
    pub path: String,
}
