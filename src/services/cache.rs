use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::models::{ScoreRequest, ScoreResponse};

/// In-memory cache of pair scores
///
/// Scoring is pure, so an entry only goes stale when the caller sends a
/// different radix; the TTL just bounds memory held by one-off pairs.
pub struct ScoreCache {
    inner: moka::future::Cache<u64, ScoreResponse>,
}

impl ScoreCache {
    /// Create a new cache holding at most `capacity` scores for `ttl_secs` each
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    /// Cache key for a score request
    ///
    /// Bodies are kept in a BTreeMap, so the serialized form is stable.
    pub fn key(request: &ScoreRequest) -> Result<u64, MatchError> {
        let json = serde_json::to_string(request)?;
        let mut hasher = DefaultHasher::new();
        json.hash(&mut hasher);
        Ok(hasher.finish())
    }

    pub async fn get(&self, key: u64) -> Option<ScoreResponse> {
        let hit = self.inner.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Score cache hit: {:x}", key);
        } else {
            tracing::trace!("Score cache miss: {:x}", key);
        }
        hit
    }

    pub async fn insert(&self, key: u64, response: ScoreResponse) {
        self.inner.insert(key, response).await;
        tracing::trace!("Score cache set: {:x}", key);
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Flush pending maintenance so `stats` reflects recent writes
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Get cache statistics
    ///
    /// Counts are approximate until pending maintenance has run.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.inner.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}
