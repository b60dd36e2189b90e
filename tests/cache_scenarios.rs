//! Timing and Concurrency Tests for the Expiring Cache
//!
//! Timing tests run on a paused Tokio clock, so sleeps advance virtual time
//! deterministically and the reaper fires exactly on its schedule.

use std::sync::Arc;
use std::time::Duration;

use pokedex::Cache;

// == Expiry Scenarios ==

#[tokio::test(start_paused = true)]
async fn test_entry_gone_after_interval() {
    let cache = Cache::new(Duration::from_millis(500));

    // Sweeps run at 500ms, 1000ms, ... after construction. Shift the insert
    // so one of them lands between 500ms and 600ms of its age.
    tokio::time::sleep(Duration::from_millis(450)).await;

    cache.add("a", vec![1, 2, 3]).await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(cache.get("a").await, Some(vec![1, 2, 3]));

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(cache.get("a").await, None);

    cache.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_overwrite_within_interval() {
    let cache = Cache::new(Duration::from_secs(1));

    cache.add("x", b"v1".to_vec()).await;
    tokio::time::sleep(Duration::from_millis(400)).await;
    cache.add("x", b"v2".to_vec()).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(cache.get("x").await, Some(b"v2".to_vec()));

    cache.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_overwrite_resets_age() {
    let cache = Cache::new(Duration::from_secs(1));

    cache.add("x", b"v1".to_vec()).await;
    tokio::time::sleep(Duration::from_millis(900)).await;
    cache.add("x", b"v2".to_vec()).await;

    // Sweep at 1s: v2 is 0.1s old and survives
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(cache.get("x").await, Some(b"v2".to_vec()));

    // Sweep at 2s: v2 is 1.1s old
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(cache.get("x").await, None);
}

#[tokio::test(start_paused = true)]
async fn test_no_eviction_at_exact_interval() {
    let cache = Cache::new(Duration::from_millis(500));

    // Inserted at 0, the sweep at 500ms sees an age of exactly 500ms
    cache.add("edge", b"v".to_vec()).await;
    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(cache.get("edge").await, Some(b"v".to_vec()));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(cache.get("edge").await, None);
}

#[tokio::test(start_paused = true)]
async fn test_stale_entry_readable_until_swept() {
    let cache = Cache::new(Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(100)).await;
    cache.add("stale", b"v".to_vec()).await;

    // Expired at 1.1s, next sweep at 2s
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(cache.get("stale").await, Some(b"v".to_vec()));

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(cache.get("stale").await, None);
    assert_eq!(cache.stats().await.reaped, 1);
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_and_sweeps_lose_nothing() {
    let cache = Arc::new(Cache::new(Duration::from_secs(60)));
    let mut tasks = Vec::new();

    for writer in 0..16 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            for round in 0..200u32 {
                let key = format!("w{}-k{}", writer, round % 20);
                let value = round.to_be_bytes().to_vec();
                cache.add(key.clone(), value.clone()).await;
                assert_eq!(cache.get(&key).await, Some(value));
            }
        }));
    }

    // Forced sweeps interleaved with the writers; nothing is old enough to go
    for _ in 0..4 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..200 {
                assert_eq!(cache.reap().await, 0);
                tokio::task::yield_now().await;
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    // Each key holds the last value its writer stored
    for writer in 0..16 {
        for slot in 0..20u32 {
            let last_round = 180 + slot;
            assert_eq!(
                cache.get(&format!("w{}-k{}", writer, slot)).await,
                Some(last_round.to_be_bytes().to_vec())
            );
        }
    }
    assert_eq!(cache.len().await, 16 * 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_access_with_live_reaper() {
    let cache = Arc::new(Cache::new(Duration::from_millis(5)));
    let mut tasks = Vec::new();

    for writer in 0..8 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            let key = format!("writer-{}", writer);
            for round in 0..500u32 {
                let value = round.to_be_bytes().to_vec();
                cache.add(key.clone(), value.clone()).await;

                // Either swept already or still this writer's latest value
                if let Some(seen) = cache.get(&key).await {
                    assert_eq!(seen, value);
                }
                if round % 50 == 0 {
                    tokio::time::sleep(Duration::from_millis(2)).await;
                }
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }
    assert!(cache.is_reaping());
}
