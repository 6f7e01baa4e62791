use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::model::{PoolOverview, TopLpEntry, TvlPoint, UserPosition};

/// A cache entry with expiration time
pub struct CacheEntry<T> {
    pub data: T,
    pub expires_at: Instant,
}

/// A generic time-based cache with TTL support
pub struct TimedCache<T> {
    entries: RwLock<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone + Send + Sync> TimedCache<T> {
    /// Create a new cache with the specified TTL in seconds
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Get a value from the cache if it exists and hasn't expired
    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        if let Some(entry) = entries.get(key) {
            if Instant::now() < entry.expires_at {
                return Some(entry.data.clone());
            }
        }
        None
    }

    /// Store a value in the cache with the configured TTL
    pub async fn set(&self, key: &str, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                data: value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Remove a specific key from the cache
    #[allow(dead_code)]
    pub async fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(key);
    }
}

impl<T> std::fmt::Debug for TimedCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Response caches for the API endpoints, one per pipeline.
#[derive(Debug)]
pub struct ApiCache {
    pub pool: TimedCache<PoolOverview>,
    pub top_lps: TimedCache<Vec<TopLpEntry>>,
    pub tvl_series: TimedCache<Vec<TvlPoint>>,
    pub user_positions: TimedCache<UserPosition>,
}

impl ApiCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            pool: TimedCache::new(ttl_seconds),
            top_lps: TimedCache::new(ttl_seconds),
            tvl_series: TimedCache::new(ttl_seconds),
            user_positions: TimedCache::new(ttl_seconds),
        }
    }
}

/// Monotonic request-generation counter.
///
/// User searches are not cancellable once in flight; a search issues a token
/// and only writes its completed result into the cache while the token is
/// still the latest issued one, so a superseded response cannot overwrite a
/// newer search (last-writer-wins).
#[derive(Debug, Default)]
pub struct Generation(AtomicU64);

impl Generation {
    pub fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}
