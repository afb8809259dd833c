use thiserror::Error;

/// Shortest accepted prompt, in characters after trimming.
pub const MIN_PROMPT_CHARS: usize = 3;
/// Longest accepted prompt, in characters after trimming.
pub const MAX_PROMPT_CHARS: usize = 5000;

/// Reasons a prompt is rejected before it reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Prompt cannot be empty")]
    EmptyInput,
    #[error("Prompt must be at least 3 characters long")]
    TooShort,
    #[error("Prompt too long (max 5000 characters)")]
    TooLong,
}

/// Checks the trimmed prompt length. Lengths count characters, not bytes.
pub fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    let len = prompt.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyInput);
    }
    if len < MIN_PROMPT_CHARS {
        return Err(ValidationError::TooShort);
    }
    if len > MAX_PROMPT_CHARS {
        return Err(ValidationError::TooLong);
    }
    Ok(())
}

/// User-facing message for `prompt`, or an empty string when it is valid.
pub fn validation_message(prompt: &str) -> String {
    match validate_prompt(prompt) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}
