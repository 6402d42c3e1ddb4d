//! Titlesmith Suggestion Cache
//!
//! Content-addressed TTL cache for provider title suggestions

mod store;

pub use store::{CacheStats, SuggestionCache, DEFAULT_TTL};
