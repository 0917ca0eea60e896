use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tessera_cache::Cache;
use tokio::time::{sleep, Instant};

#[tokio::test]
async fn test_async_population_runs_once_per_key() {
  let cache = Cache::new();
  let loads = AtomicUsize::new(0);

  let first = cache
    .get_value_async("config", || async {
      loads.fetch_add(1, Ordering::SeqCst);
      "loaded".to_string()
    })
    .await
    .unwrap();
  let second = cache
    .get_value_async("config", || async {
      loads.fetch_add(1, Ordering::SeqCst);
      "reloaded".to_string()
    })
    .await
    .unwrap();

  assert_eq!(first, "loaded");
  assert_eq!(second, "loaded");
  assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_on_one_key_load_once() {
  let cache = Arc::new(Cache::new());
  let loads = Arc::new(AtomicUsize::new(0));

  let tasks: Vec<_> = (0..10)
    .map(|_| {
      let cache = Arc::clone(&cache);
      let loads = Arc::clone(&loads);
      tokio::spawn(async move {
        cache
          .get_value_async("shared", || async move {
            loads.fetch_add(1, Ordering::SeqCst);
            sleep(Duration::from_millis(50)).await;
            7u64
          })
          .await
          .unwrap()
      })
    })
    .collect();

  for result in futures_util::future::join_all(tasks).await {
    assert_eq!(result.unwrap(), 7);
  }
  assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_populations_for_different_keys_are_serialized() {
  let cache = Arc::new(Cache::new());
  let started = Instant::now();

  let tasks: Vec<_> = ["a", "b", "c"]
    .into_iter()
    .map(|key| {
      let cache = Arc::clone(&cache);
      tokio::spawn(async move {
        cache
          .get_value_async(key, || async move {
            sleep(Duration::from_millis(100)).await;
            key.len()
          })
          .await
          .unwrap()
      })
    })
    .collect();
  futures_util::future::join_all(tasks).await;

  assert!(started.elapsed() >= Duration::from_millis(300));
  assert_eq!(cache.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_present_keys_are_readable_during_population() {
  let cache = Arc::new(Cache::new());
  cache.set_value("ready", 1u8).unwrap();

  let slow = {
    let cache = Arc::clone(&cache);
    tokio::spawn(async move {
      cache
        .get_value_async("slow", || async {
          sleep(Duration::from_millis(200)).await;
          2u8
        })
        .await
        .unwrap()
    })
  };
  sleep(Duration::from_millis(20)).await;

  let started = Instant::now();
  let ready = cache.get_value_async("ready", || async { 0u8 }).await.unwrap();

  assert_eq!(ready, 1);
  assert!(started.elapsed() < Duration::from_millis(150));
  assert_eq!(slow.await.unwrap(), 2);
}
