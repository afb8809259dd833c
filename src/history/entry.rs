use serde::{Deserialize, Serialize};

/// One evaluated prompt and the score it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub prompt: String,
    pub score: f64,
}

impl HistoryEntry {
    pub fn new(prompt: impl Into<String>, score: f64) -> Self {
        Self {
            prompt: prompt.into(),
            score,
        }
    }

    /// Score as stored on disk and shown to the model: whole values keep a
    /// trailing `.0` (`7.0`, `4.5`).
    pub fn score_text(&self) -> String {
        format!("{:?}", self.score)
    }

    /// Score with exactly two decimals, for display.
    pub fn score_display(&self) -> String {
        format!("{:.2}", self.score)
    }
}

/// Ordered session history; insertion order is evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
