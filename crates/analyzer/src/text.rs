use regex::Regex;
use std::sync::OnceLock;
use titlesmith_common::{Result, TitlesmithError};

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+|www\.\S+").expect("valid url regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+@\S+").expect("valid email regex"))
}

fn html_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid html tag regex"))
}

/// Clean and normalize text for analysis
///
/// Lowercases, collapses whitespace runs, then strips URLs, email addresses,
/// and HTML-tag-like substrings.
pub fn clean_and_normalize_text(text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(TitlesmithError::analysis("Input text cannot be empty"));
    }

    let text = text.to_lowercase();
    let text = whitespace_re().replace_all(&text, " ");
    let text = url_re().replace_all(&text, "");
    let text = email_re().replace_all(&text, "");
    let text = html_tag_re().replace_all(&text, "");

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_collapses_whitespace() {
        let result = clean_and_normalize_text("Hello   World\n\tAgain").unwrap();
        assert_eq!(result, "hello world again");
    }

    #[test]
    fn test_strips_urls() {
        let result = clean_and_normalize_text("see https://example.com/page for more").unwrap();
        assert_eq!(result, "see  for more");
    }

    #[test]
    fn test_strips_emails() {
        let result = clean_and_normalize_text("contact me@example.com today").unwrap();
        assert_eq!(result, "contact  today");
    }

    #[test]
    fn test_strips_html_tags() {
        let result = clean_and_normalize_text("<p>some <b>bold</b> text</p>").unwrap();
        assert_eq!(result, "some bold text");
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(clean_and_normalize_text("").is_err());
    }
}
