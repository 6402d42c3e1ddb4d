use std::collections::HashMap;
use titlesmith_common::{Result, TitlesmithError};
use tracing::warn;

/// Stop words excluded from keyword ranking
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "because", "as", "what",
    "which", "this", "that", "these", "those", "then", "just", "so", "than",
    "such", "both", "through", "about", "for", "is", "of", "while", "during",
    "to", "in", "at", "by", "on", "with", "from", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "i", "you", "he", "she",
    "it", "we", "they", "me", "him", "her", "us", "them", "who", "whom",
    "whose", "where", "when", "why", "how",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Extract the most frequent keywords from text
///
/// Lowercases, strips punctuation, tokenizes on whitespace, drops stop words
/// and tokens of 2 characters or fewer, then ranks by frequency. Ties are
/// broken by first-seen order, so the ranking is stable.
pub fn extract_keywords(text: &str, top_n: usize) -> Result<Vec<(String, usize)>> {
    if text.trim().is_empty() {
        return Err(TitlesmithError::analysis("Input text cannot be empty"));
    }

    if top_n < 1 {
        return Err(TitlesmithError::analysis("top_n must be a positive integer"));
    }

    // Lowercase and replace punctuation with spaces
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect();

    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.is_empty() {
        warn!("No words found after tokenization");
        return Ok(Vec::new());
    }

    // Count frequencies, remembering first-seen position for tie-breaking
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut kept = 0usize;
    for word in words {
        if word.len() <= 2 || is_stop_word(word) {
            continue;
        }
        let entry = counts.entry(word).or_insert_with(|| {
            let first_seen = kept;
            kept += 1;
            (0, first_seen)
        });
        entry.0 += 1;
    }

    if counts.is_empty() {
        warn!("No words remaining after filtering");
        return Ok(Vec::new());
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    Ok(ranked
        .into_iter()
        .take(top_n)
        .map(|(word, (count, _))| (word.to_string(), count))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords_basic() {
        let result = extract_keywords("the cat sat on the cat mat", 1).unwrap();
        assert_eq!(result, vec![("cat".to_string(), 2)]);
    }

    #[test]
    fn test_extract_keywords_tie_break_first_seen() {
        let result = extract_keywords("rust language rust language systems", 3).unwrap();
        assert_eq!(result[0], ("rust".to_string(), 2));
        assert_eq!(result[1], ("language".to_string(), 2));
        assert_eq!(result[2], ("systems".to_string(), 1));
    }

    #[test]
    fn test_extract_keywords_strips_punctuation() {
        let result = extract_keywords("coding, coding! coding?", 1).unwrap();
        assert_eq!(result, vec![("coding".to_string(), 3)]);
    }

    #[test]
    fn test_extract_keywords_drops_short_tokens() {
        let result = extract_keywords("go go go programming", 5).unwrap();
        assert_eq!(result, vec![("programming".to_string(), 1)]);
    }

    #[test]
    fn test_extract_keywords_rejects_empty_text() {
        assert!(extract_keywords("   ", 3).is_err());
    }

    #[test]
    fn test_extract_keywords_rejects_zero_top_n() {
        assert!(extract_keywords("some valid text here", 0).is_err());
    }

    #[test]
    fn test_extract_keywords_all_stop_words() {
        let result = extract_keywords("the and but for", 3).unwrap();
        assert!(result.is_empty());
    }
}
