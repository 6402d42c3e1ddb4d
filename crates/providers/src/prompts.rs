//! Prompt templates for title generation

/// System prompt for the chat-completion provider
pub const TITLE_SYSTEM_PROMPT: &str = "You are a professional blog title generator. \
Create engaging, SEO-friendly titles that accurately reflect the content while being \
catchy and memorable.";

/// User prompt for the chat-completion provider
pub fn title_prompt(content: &str, num_suggestions: usize) -> String {
    format!(
        r#"Generate exactly {num} unique and engaging blog post titles based on the following content.

Content:
{content}

Requirements:
1. Each title should be SEO-friendly and no longer than 60 characters
2. Titles should be catchy and engaging while accurately reflecting the content
3. Format the output as a numbered list (1., 2., etc.)
4. Do not include any additional text or explanations
5. Each title should be unique and different in structure

Generate {num} titles now:"#,
        num = num_suggestions,
        content = content
    )
}

/// Prompt for local summarization-style title generation
pub fn summary_prompt(content: &str) -> String {
    format!(
        "Summarize the following blog post as a single short headline. \
Respond with the headline only, no preamble.\n\nPost:\n{}\n\nHeadline:",
        content
    )
}
