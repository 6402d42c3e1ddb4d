use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default cache TTL (24 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(86_400);

struct CacheEntry {
    titles: Vec<String>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Entries currently stored (including expired, not yet swept)
    pub total_entries: usize,

    /// Entries past their TTL
    pub expired_entries: usize,
}

/// Content-addressed TTL cache for provider suggestions
///
/// Best-effort and fail-open: lookups never surface internal faults to the
/// caller, so a broken cache degrades to a miss instead of blocking the
/// generation pipeline.
pub struct SuggestionCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionCache {
    /// Create new cache with the default 24-hour TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create new cache with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Build the cache key for a content + provider pair
    ///
    /// The full content is hashed, so near-duplicate content never collides
    /// and providers are namespaced against each other.
    pub fn cache_key(content: &str, provider: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let content_hash = hex::encode(hasher.finalize());
        format!("titles:{}:{}", provider, content_hash)
    }

    /// Retrieve cached suggestions, None on miss or expiry
    pub fn get(&self, content: &str, provider: &str) -> Option<Vec<String>> {
        if content.is_empty() || provider.is_empty() {
            warn!("Missing required parameters for cache lookup");
            return None;
        }

        let key = Self::cache_key(content, provider);
        let now = Instant::now();

        let expired = {
            let entries = match self.entries.read() {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Cache read failed: {}", e);
                    return None;
                }
            };

            match entries.get(&key) {
                Some(entry) if !entry.is_expired(now) => {
                    info!("Cache hit for {} title suggestions", provider);
                    return Some(entry.titles.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        // Expired entries are dropped lazily on read
        if expired {
            if let Ok(mut entries) = self.entries.write() {
                entries.remove(&key);
            }
            debug!("Cache entry expired for {}", provider);
        }

        info!("Cache miss for {} title suggestions", provider);
        None
    }

    /// Store suggestions with the configured TTL
    ///
    /// Returns false when the titles are empty, inputs are missing, or the
    /// underlying store faulted.
    pub fn set(&self, content: &str, provider: &str, titles: &[String]) -> bool {
        if titles.is_empty() {
            warn!("No suggestions provided for caching");
            return false;
        }

        if content.is_empty() || provider.is_empty() {
            warn!("Missing required parameters for caching");
            return false;
        }

        let key = Self::cache_key(content, provider);
        let entry = CacheEntry {
            titles: titles.to_vec(),
            expires_at: Instant::now() + self.ttl,
        };

        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key, entry);
                info!("Cached {} title suggestions for {}", titles.len(), provider);
                true
            }
            Err(e) => {
                warn!("Cache write failed: {}", e);
                false
            }
        }
    }

    /// Current cache statistics
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        match self.entries.read() {
            Ok(entries) => CacheStats {
                total_entries: entries.len(),
                expired_entries: entries.values().filter(|e| e.is_expired(now)).count(),
            },
            Err(e) => {
                warn!("Cache stats read failed: {}", e);
                CacheStats {
                    total_entries: 0,
                    expired_entries: 0,
                }
            }
        }
    }

    /// Remove expired entries, returning how many were swept
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        match self.entries.write() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|_, e| !e.is_expired(now));
                let swept = before - entries.len();
                if swept > 0 {
                    info!("Swept {} expired cache entries", swept);
                }
                swept
            }
            Err(e) => {
                warn!("Cache cleanup failed: {}", e);
                0
            }
        }
    }
}
