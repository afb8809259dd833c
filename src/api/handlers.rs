#[path = "handlers/critique.rs"]
mod critique;

#[path = "handlers/history.rs"]
mod history;

#[path = "handlers/helpers.rs"]
mod helpers;

pub use critique::{handle_evaluate, handle_rules};
pub use history::{handle_history, handle_save};
