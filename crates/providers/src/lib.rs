//! Titlesmith Provider Integration
//!
//! Title generation providers: chat-completion and summarization backends
//! behind a common trait, with suggestion caching

mod chat;
mod parse;
mod prompts;
mod provider;
mod summary;
mod types;

pub use chat::ChatTitleProvider;
pub use parse::{clean_title, parse_title_lines, truncate_content, MAX_TITLE_LEN};
pub use prompts::{summary_prompt, title_prompt, TITLE_SYSTEM_PROMPT};
pub use provider::TitleProvider;
pub use summary::SummaryTitleProvider;
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, GenerateOptions,
    GenerateRequest, GenerateResponse, SummaryParameters, SummaryRequest,
};
