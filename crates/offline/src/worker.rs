//! Cache worker state machine and fetch interception.

use http::{Method, StatusCode};
use regex::Regex;

use crate::fetch::{Fetch, FetchError, FetchRequest, FetchResponse};
use crate::store::CacheStore;

/// Current cache generation. Bumping this and re-activating deletes every
/// entry stored under prior generations, so a deployment retains exactly
/// one generation of cached responses.
pub const CACHE_GENERATION: &str = "vakans-static-v1";

/// URL patterns that bypass the cache entirely so development tooling
/// (hot-reload channels, source maps) never goes stale.
pub const DEFAULT_BYPASS_PATTERNS: &[&str] =
    &[r"hot-update", r"/@vite/", r"/sockjs-node/", r"\.map$"];

/// Lifecycle states of the worker.
///
/// `ActiveStale` serves fetches but prior cache generations still exist on
/// disk; `ActiveCurrent` is reached once activation has purged them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Installing,
    ActiveStale,
    ActiveCurrent,
    Terminated,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The operation is not valid in the worker's current state.
    #[error("cache worker is not active (state: {0:?})")]
    NotActive(WorkerState),

    /// Pre-caching an essential asset failed during install.
    #[error("precache of {0} failed")]
    InstallFailed(String),

    /// A passed-through (non-intercepted) request failed on the network.
    /// Intercepted requests never surface this; they fall back to cache
    /// or the offline placeholder.
    #[error(transparent)]
    Upstream(#[from] FetchError),
}

/// Network-first fetch interceptor with a generation-keyed cache.
///
/// Owns its [`CacheStore`] and fetcher so tests can run multiple isolated
/// instances; nothing here is process-global.
pub struct CacheWorker<F> {
    fetcher: F,
    store: CacheStore,
    /// Current cache generation name. Changing it and re-activating
    /// invalidates everything stored under prior generations.
    generation: String,
    /// Scope origin, e.g. `https://app.vakans.uz`. Requests to any other
    /// origin are never intercepted.
    origin: String,
    /// Essential asset URLs fetched into the cache during install.
    precache: Vec<String>,
    bypass: Vec<Regex>,
    state: WorkerState,
}

impl<F: Fetch> CacheWorker<F> {
    /// Create a worker in `Installing` state.
    ///
    /// # Panics
    ///
    /// Panics if a default bypass pattern fails to compile, which is a
    /// programming error caught by the crate's own tests.
    pub fn new(
        fetcher: F,
        origin: impl Into<String>,
        generation: impl Into<String>,
        precache: Vec<String>,
    ) -> Self {
        let bypass = DEFAULT_BYPASS_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("invalid bypass pattern"))
            .collect();
        Self {
            fetcher,
            store: CacheStore::new(),
            generation: generation.into(),
            origin: origin.into(),
            precache,
            bypass,
            state: WorkerState::Installing,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Shared access to the store, for inspection in tests and for
    /// multi-worker setups reusing one store.
    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Pre-populate the current generation with the essential assets.
    ///
    /// Every precache URL must fetch with status 200; any failure aborts
    /// the install and the worker stays `Installing` so the caller may
    /// retry. On success the worker becomes `ActiveStale` (serving, but
    /// old generations not yet purged).
    pub async fn install(&mut self) -> Result<usize, WorkerError> {
        if self.state != WorkerState::Installing {
            return Err(WorkerError::NotActive(self.state));
        }

        for url in &self.precache {
            let absolute = self.absolute_url(url);
            let request = FetchRequest::get(&absolute)
                .map_err(|_| WorkerError::InstallFailed(absolute.clone()))?;
            match self.fetcher.fetch(&request).await {
                Ok(response) if response.status == StatusCode::OK => {
                    self.store.put(&self.generation, &absolute, response).await;
                }
                _ => return Err(WorkerError::InstallFailed(absolute)),
            }
        }

        self.state = WorkerState::ActiveStale;
        Ok(self.precache.len())
    }

    /// Delete every cache generation except the current one.
    ///
    /// Transitions `ActiveStale -> ActiveCurrent`. Returns the number of
    /// stale generations removed.
    pub async fn activate(&mut self) -> Result<usize, WorkerError> {
        if self.state != WorkerState::ActiveStale {
            return Err(WorkerError::NotActive(self.state));
        }
        let purged = self.store.purge_except(&self.generation).await;
        if purged > 0 {
            tracing::debug!(purged, generation = %self.generation, "Purged stale cache generations");
        }
        self.state = WorkerState::ActiveCurrent;
        Ok(purged)
    }

    /// Intercept a fetch.
    ///
    /// - Non-GET and cross-origin requests pass through untouched (never
    ///   cached, any status; network errors propagate).
    /// - Dev-tooling URLs (hot-reload, source maps) bypass the cache the
    ///   same way.
    /// - Everything else is network-first: a 200 is cached and returned
    ///   live; a network failure falls back to the cached entry, then to a
    ///   synthesized 503 placeholder. An intercepted request never returns
    ///   a hard error to the page.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> Result<FetchResponse, WorkerError> {
        if !matches!(
            self.state,
            WorkerState::ActiveStale | WorkerState::ActiveCurrent
        ) {
            return Err(WorkerError::NotActive(self.state));
        }

        let url = request.uri.to_string();

        let same_origin = match request.origin() {
            Some(origin) => origin == self.origin,
            // Origin-relative requests are same-origin by construction.
            None => true,
        };
        if request.method != Method::GET || !same_origin {
            return Ok(self.fetcher.fetch(request).await?);
        }

        if self.bypass.iter().any(|p| p.is_match(&url)) {
            return Ok(self.fetcher.fetch(request).await?);
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.status == StatusCode::OK {
                    self.store.put(&self.generation, &url, response.clone()).await;
                }
                Ok(response)
            }
            Err(e) => match self.store.get(&self.generation, &url).await {
                Some(cached) => {
                    tracing::debug!(%url, error = %e, "Network failed, serving cached response");
                    Ok(cached)
                }
                None => {
                    tracing::debug!(%url, error = %e, "Network failed with no cached entry");
                    Ok(FetchResponse::offline_placeholder())
                }
            },
        }
    }

    /// Stop serving. All further operations fail with `NotActive`.
    pub fn terminate(&mut self) {
        self.state = WorkerState::Terminated;
    }

    /// Resolve an origin-relative precache path against the scope origin.
    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.origin, url)
        } else {
            url.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
