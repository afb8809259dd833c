use std::sync::OnceLock;

use regex::Regex;

static EMPTY_BULLET: OnceLock<Regex> = OnceLock::new();
static BULLET_LINE: OnceLock<Regex> = OnceLock::new();
static BULLET_MARKER: OnceLock<Regex> = OnceLock::new();

fn empty_bullet() -> &'static Regex {
    EMPTY_BULLET.get_or_init(|| Regex::new(r"(?m)^\s*[*-]\s*$").expect("empty bullet pattern"))
}

fn bullet_line() -> &'static Regex {
    BULLET_LINE.get_or_init(|| Regex::new(r"(?m)^\s*[-*]\s+.+").expect("bullet line pattern"))
}

fn bullet_marker() -> &'static Regex {
    BULLET_MARKER.get_or_init(|| Regex::new(r"^\s*[-*]\s+").expect("bullet marker pattern"))
}

/// Blanks every line that holds nothing but a `*` or `-` marker.
pub fn strip_empty_bullets(text: &str) -> String {
    empty_bullet().replace_all(text, "").into_owned()
}

/// Converts bullet lines into `<ul><li>..</li></ul>` markup.
///
/// Empty bullet artifacts are stripped first. The bullet lines, joined with
/// newlines, are then replaced as one exact substring. When the bullets are
/// interleaved with prose that substring does not occur and the text is
/// returned with its bullets untouched.
pub fn format_bullets(text: &str) -> String {
    let cleaned = strip_empty_bullets(text);
    let lines: Vec<&str> = bullet_line()
        .find_iter(&cleaned)
        .map(|m| m.as_str())
        .collect();
    if lines.is_empty() {
        return cleaned;
    }

    let mut html = String::from("<ul>");
    for line in &lines {
        let item = bullet_marker().replace(line, "");
        html.push_str("<li>");
        html.push_str(item.trim());
        html.push_str("</li>");
    }
    html.push_str("</ul>");

    let block = lines.join("\n");
    if !cleaned.contains(&block) {
        log::debug!("bullet lines are not contiguous; leaving {} bullets as text", lines.len());
    }
    cleaned.replace(&block, &html)
}
