use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, warn};

use crate::{
    Error,
    error::Result,
};

use super::QueryKey;

type SharedFetch<T> = Shared<BoxFuture<'static, Result<T>>>;

/// Snapshot of a cached read as a view sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

struct Inflight<T> {
    generation  : u64,
    fetch       : SharedFetch<T>,
}

struct Entry<T> {
    data        : Option<T>,
    fetched_at  : Option<Instant>,
    error       : Option<Error>,

    generation  : u64,
    invalidated : bool,
    inflight    : Option<Inflight<T>>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            data        : None,
            fetched_at  : None,
            error       : None,
            generation  : 0,
            invalidated : false,
            inflight    : None,
        }
    }
}

impl<T> Entry<T> {
    fn fresh_data(&self, stale_time: Duration) -> Option<&T> {
        if self.invalidated || self.error.is_some() {
            return None;
        }
        match (self.data.as_ref(), self.fetched_at) {
            (Some(data), Some(at)) if at.elapsed() < stale_time => Some(data),
            _ => None,
        }
    }
}

/// Keyed cache of remote reads.
///
/// Concurrent fetches of one key share a single request. A failed fetch
/// is kept as the entry's error and is not retried; the next `fetch`
/// call after the failure, or an invalidation, starts a new request.
pub struct QueryCache<T> {
    stale_time  : Duration,
    entries     : Mutex<HashMap<QueryKey, Entry<T>>>,
}

impl<T> QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry<T>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (generation, fetch) = {
            let mut entries = self.entries();
            let entry = entries.entry(key.clone()).or_default();

            if let Some(inflight) = entry.inflight.as_ref() {
                debug!("Joining in-flight fetch for {}", key);
                (inflight.generation, inflight.fetch.clone())
            } else if let Some(data) = entry.fresh_data(self.stale_time) {
                debug!("Serving {} from cache", key);
                return Ok(data.clone());
            } else {
                debug!("Fetching {}", key);
                let fetch = fetcher().boxed().shared();
                entry.error = None;
                entry.inflight = Some(Inflight {
                    generation: entry.generation,
                    fetch: fetch.clone(),
                });
                (entry.generation, fetch)
            }
        };

        let result = fetch.clone().await;
        self.settle(key, generation, &fetch, &result);
        result
    }

    // Only the waiter holding the entry's current in-flight fetch records it.
    fn settle(&self, key: &QueryKey, generation: u64, fetch: &SharedFetch<T>, result: &Result<T>) {
        let mut entries = self.entries();
        let Some(entry) = entries.get_mut(key) else {
            return;
        };

        let owned = entry.inflight.as_ref()
            .map(|v| v.fetch.ptr_eq(fetch))
            .unwrap_or(false);
        if !owned {
            return;
        }

        entry.inflight = None;
        match result {
            Ok(data) => {
                entry.data = Some(data.clone());
                entry.fetched_at = Some(Instant::now());
                entry.error = None;
            },
            Err(e) => {
                warn!("Fetching {} failed: {}", key, e);
                entry.error = Some(e.clone());
            }
        }
        // invalidated while in flight, so the result is already stale
        entry.invalidated = entry.generation != generation;
    }

    pub fn state(&self, key: &QueryKey) -> QueryState<T> {
        let entries = self.entries();
        let Some(entry) = entries.get(key) else {
            return QueryState::Loading;
        };

        if let Some(err) = entry.error.as_ref() {
            QueryState::Error(err.to_string())
        } else if let Some(data) = entry.data.as_ref() {
            QueryState::Ready(data.clone())
        } else {
            QueryState::Loading
        }
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.entries().get(key)
            .map(|v| v.inflight.is_some())
            .unwrap_or(false)
    }

    /// Marks every entry under `prefix` stale; returns how many matched.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut matched = 0;
        for (key, entry) in self.entries().iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                entry.generation += 1;
                matched += 1;
            }
        }
        matched
    }

    pub fn clear(&self) {
        self.entries().clear();
    }
}
