use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WhispererError;

use super::entry::{History, HistoryEntry};

/// A column of the history file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryField {
    Prompt,
    Score,
}

impl HistoryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryField::Prompt => "prompt",
            HistoryField::Score => "score",
        }
    }
}

/// Column order used when writing the history file. Names each field once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HistoryField>", into = "Vec<HistoryField>")]
pub struct FieldOrder([HistoryField; 2]);

impl FieldOrder {
    pub fn new(fields: &[HistoryField]) -> Result<Self, WhispererError> {
        match fields {
            [first, second] if first != second => Ok(Self([*first, *second])),
            _ => Err(WhispererError::Config(format!(
                "history fields must name prompt and score exactly once, got {fields:?}"
            ))),
        }
    }

    pub fn fields(&self) -> &[HistoryField] {
        &self.0
    }
}

impl Default for FieldOrder {
    fn default() -> Self {
        Self([HistoryField::Prompt, HistoryField::Score])
    }
}

impl TryFrom<Vec<HistoryField>> for FieldOrder {
    type Error = WhispererError;

    fn try_from(value: Vec<HistoryField>) -> Result<Self, Self::Error> {
        FieldOrder::new(&value)
    }
}

impl From<FieldOrder> for Vec<HistoryField> {
    fn from(value: FieldOrder) -> Self {
        value.0.to_vec()
    }
}

/// Flat CSV snapshot of a session history.
///
/// Saving rewrites the whole file in place. There is no temp-file rename,
/// so a crash mid-write can leave a truncated file, and concurrent sessions
/// on the same path overwrite each other (last save wins).
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    fields: FieldOrder,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, fields: FieldOrder) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fields(&self) -> FieldOrder {
        self.fields
    }

    pub fn load(&self) -> Result<History, WhispererError> {
        load_history(&self.path)
    }

    pub fn save(&self, history: &History) -> Result<(), WhispererError> {
        save_history(&self.path, history.entries(), &self.fields)
    }
}

/// Reads the history file at `path`.
///
/// A missing file is an empty history. Columns are found by header name, so
/// either field order loads. Any unreadable row aborts the whole load.
pub fn load_history(path: &Path) -> Result<History, WhispererError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("no history at {}, starting empty", path.display());
            return Ok(History::default());
        }
        Err(err) => return Err(err.into()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);
    let headers = reader.headers().map_err(csv_failure)?.clone();
    if headers.is_empty() {
        return Ok(History::default());
    }
    let prompt_col = column(&headers, HistoryField::Prompt)?;
    let score_col = column(&headers, HistoryField::Score)?;

    let mut history = History::default();
    for record in reader.records() {
        let record = record.map_err(csv_failure)?;
        let line = record.position().map_or(0, |pos| pos.line());
        let prompt = record
            .get(prompt_col)
            .ok_or_else(|| WhispererError::malformed(line, "missing prompt field"))?;
        let raw_score = record
            .get(score_col)
            .ok_or_else(|| WhispererError::malformed(line, "missing score field"))?;
        let score = raw_score
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|score| score.is_finite())
            .ok_or_else(|| {
                WhispererError::malformed(line, format!("score {raw_score:?} is not a number"))
            })?;
        history.push(HistoryEntry::new(prompt, score));
    }

    log::info!("loaded {} history entries from {}", history.len(), path.display());
    Ok(history)
}

/// Overwrites `path` with a header row and one row per entry.
pub fn save_history(
    path: &Path,
    entries: &[HistoryEntry],
    fields: &FieldOrder,
) -> Result<(), WhispererError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .map_err(csv_failure)?;
    writer
        .write_record(fields.fields().iter().map(HistoryField::as_str))
        .map_err(csv_failure)?;
    for entry in entries {
        let row = fields.fields().iter().map(|field| match field {
            HistoryField::Prompt => entry.prompt.clone(),
            HistoryField::Score => entry.score_text(),
        });
        writer.write_record(row).map_err(csv_failure)?;
    }
    writer.flush()?;
    log::info!("saved {} history entries to {}", entries.len(), path.display());
    Ok(())
}

fn column(headers: &csv::StringRecord, field: HistoryField) -> Result<usize, WhispererError> {
    headers
        .iter()
        .position(|name| name.trim() == field.as_str())
        .ok_or_else(|| {
            WhispererError::malformed(1, format!("header has no {:?} column", field.as_str()))
        })
}

fn csv_failure(err: csv::Error) -> WhispererError {
    let line = err.position().map_or(0, |pos| pos.line());
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => WhispererError::Io(io),
        _ => WhispererError::malformed(line, message),
    }
}
