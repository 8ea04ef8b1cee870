use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use futures::future::{BoxFuture, FutureExt};

use crate::{
    Error,
    QueryCache,
    QueryKey,
    QueryState,
    error::Result,
};

fn fetcher(counter: &Arc<AtomicUsize>, value: Result<u32>, delay_ms: u64)
    -> impl FnOnce() -> BoxFuture<'static, Result<u32>>
{
    let counter = counter.clone();
    move || async move {
        counter.fetch_add(1, Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        value
    }.boxed()
}

fn cache() -> QueryCache<u32> {
    QueryCache::new(Duration::from_secs(60))
}

#[test]
fn test_unknown_key_is_loading() {
    let cache = cache();
    assert_eq!(cache.state(&QueryKey::contacts()), QueryState::Loading);
    assert!(!cache.is_fetching(&QueryKey::contacts()));
}

#[tokio::test]
async fn test_fresh_data_served_from_cache() {
    let cache = cache();
    let key = QueryKey::contacts();
    let counter = Arc::new(AtomicUsize::new(0));

    assert_eq!(cache.fetch(&key, fetcher(&counter, Ok(1), 0)).await, Ok(1));
    assert_eq!(cache.fetch(&key, fetcher(&counter, Ok(2), 0)).await, Ok(1));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(cache.state(&key), QueryState::Ready(1));
}

#[tokio::test]
async fn test_zero_stale_time_refetches() {
    let cache = QueryCache::new(Duration::ZERO);
    let key = QueryKey::contacts();
    let counter = Arc::new(AtomicUsize::new(0));

    _ = cache.fetch(&key, fetcher(&counter, Ok(1), 0)).await;
    assert_eq!(cache.fetch(&key, fetcher(&counter, Ok(2), 0)).await, Ok(2));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_concurrent_fetches_share_one_request() {
    let cache = cache();
    let key = QueryKey::contacts();
    let counter = Arc::new(AtomicUsize::new(0));

    let (a, b) = tokio::join!(
        cache.fetch(&key, fetcher(&counter, Ok(5), 20)),
        cache.fetch(&key, fetcher(&counter, Ok(6), 20)),
    );

    assert_eq!(a, Ok(5));
    assert_eq!(b, Ok(5));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!(!cache.is_fetching(&key));
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let cache = cache();
    let key = QueryKey::contacts();
    let counter = Arc::new(AtomicUsize::new(0));

    _ = cache.fetch(&key, fetcher(&counter, Ok(1), 0)).await;
    assert_eq!(cache.invalidate(&key), 1);

    // stale data stays visible until the refetch lands
    assert_eq!(cache.state(&key), QueryState::Ready(1));
    assert_eq!(cache.fetch(&key, fetcher(&counter, Ok(2), 0)).await, Ok(2));
    assert_eq!(cache.state(&key), QueryState::Ready(2));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_invalidate_while_in_flight() {
    let cache = cache();
    let key = QueryKey::contacts();
    let counter = Arc::new(AtomicUsize::new(0));

    let (first, _) = tokio::join!(
        cache.fetch(&key, fetcher(&counter, Ok(1), 30)),
        async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            cache.invalidate(&key)
        },
    );
    assert_eq!(first, Ok(1));

    assert_eq!(cache.fetch(&key, fetcher(&counter, Ok(2), 0)).await, Ok(2));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failure_is_kept_without_retry() {
    let cache = cache();
    let key = QueryKey::contacts();
    let counter = Arc::new(AtomicUsize::new(0));

    let err = Error::Network("connection refused".into());
    assert!(cache.fetch(&key, fetcher(&counter, Err(err), 0)).await.is_err());
    assert_eq!(cache.state(&key), QueryState::Error("connection refused".into()));

    // reading the state again does not trigger anything
    assert!(cache.state(&key).is_error());
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    // an explicit fetch (remount) tries again
    assert_eq!(cache.fetch(&key, fetcher(&counter, Ok(3), 0)).await, Ok(3));
    assert_eq!(cache.state(&key), QueryState::Ready(3));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_prefix_invalidation() {
    let cache = cache();
    let counter = Arc::new(AtomicUsize::new(0));

    for key in [QueryKey::contact("1"), QueryKey::contact("2"), QueryKey::contacts()] {
        _ = cache.fetch(&key, fetcher(&counter, Ok(1), 0)).await;
    }

    assert_eq!(cache.invalidate(&QueryKey::new(["contact"])), 2);
    assert_eq!(cache.invalidate(&QueryKey::contacts()), 1);
    assert_eq!(cache.invalidate(&QueryKey::new(["groups"])), 0);

    cache.clear();
    assert!(cache.state(&QueryKey::contacts()).is_loading());
}
