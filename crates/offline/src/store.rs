//! Generation-keyed response cache.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::fetch::FetchResponse;

/// URL-keyed cache buckets, one per cache generation.
///
/// Thread-safe via interior `RwLock`; designed to be owned by a
/// [`CacheWorker`](crate::worker::CacheWorker) or wrapped in `Arc` for
/// multi-instance tests. Entries are overwritten on every successful fetch
/// of the same URL.
pub struct CacheStore {
    generations: RwLock<HashMap<String, HashMap<String, FetchResponse>>>,
}

impl CacheStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            generations: RwLock::new(HashMap::new()),
        }
    }

    /// Store a response under `url` in the given generation, replacing any
    /// previous entry for that URL.
    pub async fn put(&self, generation: &str, url: &str, response: FetchResponse) {
        self.generations
            .write()
            .await
            .entry(generation.to_string())
            .or_default()
            .insert(url.to_string(), response);
    }

    /// Fetch the cached response for `url` from the given generation.
    pub async fn get(&self, generation: &str, url: &str) -> Option<FetchResponse> {
        self.generations
            .read()
            .await
            .get(generation)
            .and_then(|bucket| bucket.get(url))
            .cloned()
    }

    /// Delete every generation except `keep`.
    ///
    /// Returns the number of generations removed. Called on activation so a
    /// deployment retains exactly one generation of cached responses.
    pub async fn purge_except(&self, keep: &str) -> usize {
        let mut generations = self.generations.write().await;
        let before = generations.len();
        generations.retain(|name, _| name == keep);
        before - generations.len()
    }

    /// Number of entries in the given generation.
    pub async fn entry_count(&self, generation: &str) -> usize {
        self.generations
            .read()
            .await
            .get(generation)
            .map(|bucket| bucket.len())
            .unwrap_or(0)
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
