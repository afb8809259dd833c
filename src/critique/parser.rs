use std::sync::OnceLock;

use regex::Regex;

/// A model reply split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// Commentary on the prompt. The whole reply when no sections were found.
    pub evaluation: String,
    /// Answer to the prompt's query. `None` when the reply had no answer
    /// section, which differs from an answer section that is empty.
    pub answer: Option<String>,
    /// First number in the reply, rounded to two decimals, or `0.0`.
    pub score: f64,
}

static SCORE: OnceLock<Regex> = OnceLock::new();
static SECTIONS: OnceLock<Regex> = OnceLock::new();

fn score_pattern() -> &'static Regex {
    SCORE.get_or_init(|| Regex::new(r"[-+]?[0-9]*\.?[0-9]+").expect("score pattern compiles"))
}

// Heading (`###`) or emphasis (`*`) marker, the section title, an optional
// closing marker. Case-insensitive, `.` spans lines, evaluation capture is lazy.
fn section_pattern() -> &'static Regex {
    SECTIONS.get_or_init(|| {
        Regex::new(
            r"(?is)(?:###|\*)\s*Prompt evaluation\s*(?:###|\*)?\s*(.*?)\s*(?:###|\*)\s*Answer Section\s*(?:###|\*)?\s*(.*)",
        )
        .expect("section pattern compiles")
    })
}

/// Splits a raw model reply into evaluation, answer and score.
///
/// The score is the first number anywhere in the reply, so a number inside
/// the evaluation text ("3 key effects") wins over a later score line.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let score = extract_score(raw);
    match section_pattern().captures(raw) {
        Some(caps) => {
            let evaluation = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            let answer = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            log::debug!("reply split into sections, score {score}");
            ParsedResponse {
                evaluation,
                answer: Some(answer),
                score,
            }
        }
        None => {
            log::debug!("reply has no section markers, score {score}");
            ParsedResponse {
                evaluation: raw.to_string(),
                answer: None,
                score,
            }
        }
    }
}

/// First signed or unsigned decimal in `raw`, rounded to two places.
pub fn extract_score(raw: &str) -> f64 {
    score_pattern()
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(round2)
        .unwrap_or(0.0)
}

// Precision formatting works from the exact binary value and sends ties to
// the even digit, so 0.125 becomes 0.12 and 2.675 (stored as 2.67499..) 2.67.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse::<f64>().unwrap_or(value)
}
