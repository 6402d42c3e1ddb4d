//! Titlesmith Text Analyzer
//!
//! Keyword, sentence, and summary extraction for blog-post content

mod keywords;
mod sentences;
mod text;

pub use keywords::extract_keywords;
pub use sentences::{extract_sentences, get_content_summary};
pub use text::clean_and_normalize_text;
