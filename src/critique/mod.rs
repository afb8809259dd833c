//! Prompt critique pipeline: validation, reply parsing, bullet formatting
//! and the request sent to the model.

mod formatter;
mod parser;
mod prompt;
mod validator;

pub use formatter::{format_bullets, strip_empty_bullets};
pub use parser::{extract_score, parse_response, ParsedResponse};
pub use prompt::{build_messages, format_prompt_history, system_instruction, NO_HISTORY};
pub use validator::{
    validate_prompt, validation_message, ValidationError, MAX_PROMPT_CHARS, MIN_PROMPT_CHARS,
};
