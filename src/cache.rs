//! In-memory caching using moka
//!
//! Itineraries depend only on the destination and the day count, so a
//! successful generation is reused until it expires. Fallback messages are
//! never cached.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Application cache holding generated concierge text
#[derive(Clone)]
pub struct AppCache {
    /// Itineraries (destination_id:days -> text)
    pub itineraries: Cache<String, Arc<String>>,
}

impl AppCache {
    /// Create a new cache instance with the given itinerary TTL
    pub fn new(itinerary_ttl: Duration) -> Self {
        Self {
            // Itineraries: 200 entries, idle entries dropped after a third of the TTL
            itineraries: Cache::builder()
                .max_capacity(200)
                .time_to_live(itinerary_ttl)
                .time_to_idle(itinerary_ttl / 3)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            itineraries_size: self.itineraries.entry_count(),
        }
    }

    /// Generate cache key for an itinerary
    pub fn itinerary_key(destination_id: &str, days: u32) -> String {
        format!("{}:{}", destination_id, days)
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(30 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub itineraries_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itinerary_key() {
        assert_eq!(AppCache::itinerary_key("a1", 3), "a1:3");
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = AppCache::default();
        cache
            .itineraries
            .insert(AppCache::itinerary_key("a1", 3), Arc::new("Day 1".to_string()))
            .await;
        let cached = cache.itineraries.get("a1:3").await;
        assert_eq!(cached.as_deref().map(String::as_str), Some("Day 1"));
        assert!(cache.itineraries.get("a1:2").await.is_none());
    }
}
