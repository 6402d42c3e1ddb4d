use tracing::warn;

/// Maximum accepted title length in characters
pub const MAX_TITLE_LEN: usize = 60;

/// Line prefixes that mark filler text rather than a title
const FILLER_PREFIXES: &[&str] = &["title", "suggestion", "here"];

/// Truncate content to a character budget, appending an ellipsis marker
/// when anything was cut
pub fn truncate_content(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let truncated: String = content.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

/// Parse generated text into discrete title candidates
///
/// Accepts numbered lines ("1. Title"), dash bullets ("- Title"), and bare
/// lines that do not start with filler words. Candidates longer than
/// [`MAX_TITLE_LEN`] characters are discarded.
pub fn parse_title_lines(text: &str) -> Vec<String> {
    let mut titles = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let candidate = if line.starts_with(|c: char| c.is_ascii_digit()) && line.contains('.') {
            // Numbered format ("1. Title")
            line.split_once('.').map(|(_, rest)| rest.trim())
        } else if let Some(rest) = line.strip_prefix('-') {
            // Dash format ("- Title")
            Some(rest.trim())
        } else {
            // Plain line, unless it is filler text
            let lowered = line.to_lowercase();
            if FILLER_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
                None
            } else {
                Some(line)
            }
        };

        if let Some(title) = candidate {
            if !title.is_empty() && title.chars().count() <= MAX_TITLE_LEN {
                titles.push(title.to_string());
            }
        }
    }

    if titles.is_empty() {
        warn!("No valid titles extracted from response");
    }

    titles
}

/// Clean a raw generated title
///
/// Trims whitespace, drops one trailing period, and capitalizes the first
/// character.
pub fn clean_title(raw: &str) -> String {
    let title = raw.trim();
    let title = title.strip_suffix('.').unwrap_or(title);

    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
