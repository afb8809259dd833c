//! Session history and its flat-file snapshot.

mod entry;
mod store;

pub use entry::{History, HistoryEntry};
pub use store::{load_history, save_history, FieldOrder, HistoryField, HistoryStore};
