use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tessera_cache::{Cache, RemovalListener, RemovalReason};

// Records every notification as (key, value if it is a u32, reason).
#[derive(Clone, Default)]
struct Recorder {
  seen: Arc<Mutex<Vec<(String, Option<u32>, RemovalReason)>>>,
}

impl RemovalListener for Recorder {
  fn on_remove(&self, key: &str, value: &(dyn Any + Send + Sync), reason: RemovalReason) {
    self
      .seen
      .lock()
      .push((key.to_string(), value.downcast_ref::<u32>().copied(), reason));
  }
}

// Counts how many instances are alive so disposal can be observed.
struct Tracked(Arc<AtomicUsize>);

impl Tracked {
  fn new(alive: &Arc<AtomicUsize>) -> Self {
    alive.fetch_add(1, Ordering::SeqCst);
    Self(Arc::clone(alive))
  }
}

impl Drop for Tracked {
  fn drop(&mut self) {
    self.0.fetch_sub(1, Ordering::SeqCst);
  }
}

#[test]
fn test_listener_sees_each_removal_reason() {
  // Arrange
  let recorder = Recorder::default();
  let cache = Cache::with_removal_listener(recorder.clone());

  // Act
  cache.set_value("a", 1u32).unwrap();
  cache.set_value("a", 2u32).unwrap();
  cache.remove("a");
  cache.set_value("b", 3u32).unwrap();
  cache.clear();
  let _ = cache.take::<u32>("missing");

  // Assert
  assert_eq!(
    *recorder.seen.lock(),
    vec![
      ("a".to_string(), Some(1), RemovalReason::Replaced),
      ("a".to_string(), Some(2), RemovalReason::Removed),
      ("b".to_string(), Some(3), RemovalReason::Cleared),
    ]
  );
}

#[test]
fn test_take_does_not_notify() {
  let recorder = Recorder::default();
  let cache = Cache::with_removal_listener(recorder.clone());
  cache.set_value("kept", 9u32).unwrap();

  assert_eq!(cache.take::<u32>("kept"), Some(9));

  assert!(recorder.seen.lock().is_empty());
}

#[test]
fn test_removed_values_are_dropped() {
  let alive = Arc::new(AtomicUsize::new(0));
  let cache = Cache::new();

  cache.set_value("one", Tracked::new(&alive)).unwrap();
  cache.set_value("two", Tracked::new(&alive)).unwrap();
  cache.set_value("two", Tracked::new(&alive)).unwrap();
  assert_eq!(alive.load(Ordering::SeqCst), 2);

  cache.remove("one");
  assert_eq!(alive.load(Ordering::SeqCst), 1);

  cache.clear();
  assert_eq!(alive.load(Ordering::SeqCst), 0);
}

#[test]
fn test_closure_listener_may_reenter_the_cache() {
  // The listener runs after the lock is released, so touching the cache is fine.
  let cache = Arc::new(Cache::new());
  let log = Arc::new(Mutex::new(Vec::new()));

  let sink = Arc::clone(&log);
  let listening = Cache::with_removal_listener(move |key: &str, _: &(dyn Any + Send + Sync), reason: RemovalReason| {
    sink.lock().push(format!("{key}:{reason}"));
  });
  listening.set_value("x", 1u8).unwrap();
  listening.remove("x");
  assert_eq!(*log.lock(), vec!["x:removed".to_string()]);

  let observer = Arc::downgrade(&cache);
  let audited = Cache::with_removal_listener(move |key: &str, _: &(dyn Any + Send + Sync), _: RemovalReason| {
    if let Some(cache) = observer.upgrade() {
      cache.set_value(&format!("audit_{key}"), true).unwrap();
    }
  });
  audited.set_value("y", 2u8).unwrap();
  audited.clear();

  assert!(cache.get_value::<bool>("audit_y"));
}
