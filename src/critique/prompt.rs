use crate::chat::ChatMessage;
use crate::history::HistoryEntry;

/// Context line used when there is no prior history.
pub const NO_HISTORY: &str = "No prior prompts found. Enter a prompt to start!";

const INSTRUCTION: &str = "You are a senior prompt engineer. Review the prompt given by the user \
and score it out of 10. Take the user's prompting history below into account when scoring \
and guide them accordingly.
Split your reply under two subheaders: 'Prompt evaluation', where you discuss the prompt itself \
and suggest a better prompt if needed, and 'Answer Section', where you answer the user's query \
only if the score is above 5.
Never put a standalone * or - character on a line by itself. Only use bullet points that carry content.";

/// Renders history entries as one `- Prompt: .., Score: ..` line each.
pub fn format_prompt_history(history: &[HistoryEntry]) -> String {
    if history.is_empty() {
        return NO_HISTORY.to_string();
    }
    history
        .iter()
        .map(|entry| format!("- Prompt: {}, Score: {}", entry.prompt, entry.score_text()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fixed critique instruction followed by the recent history summary.
pub fn system_instruction(recent: &[HistoryEntry]) -> String {
    format!(
        "{INSTRUCTION}\n\nPrompting history:\n{}",
        format_prompt_history(recent)
    )
}

/// The request sent to the model: system instruction, then the user's prompt.
pub fn build_messages(recent: &[HistoryEntry], prompt: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system()
            .content(system_instruction(recent))
            .build(),
        ChatMessage::user().content(prompt).build(),
    ]
}
