use titlesmith_common::{Result, TitlesmithError};
use tracing::warn;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when the punctuation at `i` ends an abbreviation rather than a
/// sentence ("e.g. x", "U.S. policy", "Dr. Smith")
fn ends_abbreviation(chars: &[char], i: usize) -> bool {
    // Dotted abbreviation: word '.' word '.'
    if i >= 3 && is_word_char(chars[i - 3]) && chars[i - 2] == '.' && is_word_char(chars[i - 1]) {
        return true;
    }

    // Honorific-style abbreviation: uppercase lowercase '.'
    if chars[i] == '.' && i >= 2 && chars[i - 2].is_uppercase() && chars[i - 1].is_lowercase() {
        return true;
    }

    false
}

/// Extract sentences from text
///
/// Splits on sentence-ending punctuation followed by whitespace, skipping
/// common abbreviation false-splits. Empty fragments are dropped and the
/// result is truncated to `max_sentences`.
pub fn extract_sentences(text: &str, max_sentences: usize) -> Result<Vec<String>> {
    if text.trim().is_empty() {
        return Err(TitlesmithError::analysis("Input text cannot be empty"));
    }

    if max_sentences < 1 {
        return Err(TitlesmithError::analysis(
            "max_sentences must be a positive integer",
        ));
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for i in 0..chars.len() {
        let c = chars[i];
        let followed_by_space = chars.get(i + 1).is_some_and(|n| n.is_whitespace());
        if matches!(c, '.' | '!' | '?') && followed_by_space && !ends_abbreviation(&chars, i) {
            let sentence: String = chars[start..=i].iter().collect();
            let sentence = sentence.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = i + 1;
        }
    }

    // Trailing fragment after the last split point
    let tail: String = chars[start..].iter().collect();
    let tail = tail.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    if sentences.is_empty() {
        warn!("No sentences found in text");
        return Ok(Vec::new());
    }

    sentences.truncate(max_sentences);
    Ok(sentences)
}

/// Generate a short summary from the first sentences of the content
///
/// Joins the first 3 sentences and truncates to `max_length` with an
/// ellipsis marker when over budget.
pub fn get_content_summary(text: &str, max_length: usize) -> Result<String> {
    if text.trim().is_empty() {
        return Err(TitlesmithError::analysis("Input text cannot be empty"));
    }

    if max_length < 1 {
        return Err(TitlesmithError::analysis(
            "max_length must be a positive integer",
        ));
    }

    let sentences = extract_sentences(text, 3)?;
    if sentences.is_empty() {
        warn!("No sentences available for summary");
        return Ok(String::new());
    }

    let summary = sentences.join(" ");
    if summary.chars().count() > max_length {
        let truncated: String = summary
            .chars()
            .take(max_length.saturating_sub(3))
            .collect();
        return Ok(format!("{}...", truncated));
    }

    Ok(summary)
}
