use crate::error::{CacheError, Result};
use crate::listener::{RemovalListener, RemovalReason};

use ahash::AHashMap;
use parking_lot::Mutex;
use std::any::{type_name, Any};
use std::fmt;
#[cfg(feature = "tokio")]
use std::future::Future;
use std::sync::Arc;

type Value = Box<dyn Any + Send + Sync>;

/// A thread-safe cache mapping string keys to values of any type.
///
/// Every access goes through a single lock around the backing map. Values that
/// leave the cache through [`remove`](Cache::remove), [`clear`](Cache::clear)
/// or an overwrite are handed to the removal listener and then dropped, always
/// after the lock has been released.
pub struct Cache {
  entries: Mutex<AHashMap<String, Value>>,
  listener: Option<Arc<dyn RemovalListener>>,
  // Serializes async population across all keys.
  #[cfg(feature = "tokio")]
  population: tokio::sync::Mutex<()>,
}

impl Default for Cache {
  fn default() -> Self {
    Self {
      entries: Mutex::new(AHashMap::new()),
      listener: None,
      #[cfg(feature = "tokio")]
      population: tokio::sync::Mutex::new(()),
    }
  }
}

impl Cache {
  /// Creates an empty cache without a removal listener.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty cache that reports removed entries to `listener`.
  pub fn with_removal_listener(listener: impl RemovalListener + 'static) -> Self {
    Self {
      listener: Some(Arc::new(listener)),
      ..Self::default()
    }
  }

  /// Stores `value` under `key`, replacing (and disposing) any previous value.
  pub fn set_value<T: Any + Send + Sync>(&self, key: &str, value: T) -> Result<()> {
    tessera_guard::not_empty(key, "key")?;
    self.store(key, Box::new(value));
    Ok(())
  }

  /// Returns a copy of the value under `key`, or `T::default()` when the key
  /// is missing or holds a value of another type.
  pub fn get_value<T: Any + Clone + Default>(&self, key: &str) -> T {
    self.try_get_value(key).unwrap_or_default()
  }

  /// Returns a copy of the value under `key` if it is present and a `T`.
  pub fn try_get_value<T: Any + Clone>(&self, key: &str) -> Option<T> {
    self.try_get_value_as(key).ok().flatten()
  }

  /// Like [`try_get_value`](Cache::try_get_value) but tells a missing key
  /// (`Ok(None)`) apart from a value of the wrong type.
  pub fn try_get_value_as<T: Any + Clone>(&self, key: &str) -> Result<Option<T>> {
    let entries = self.entries.lock();
    match entries.get(key) {
      None => Ok(None),
      Some(value) => value
        .downcast_ref::<T>()
        .cloned()
        .map(Some)
        .ok_or_else(|| CacheError::TypeMismatch {
          key: key.to_owned(),
          expected: type_name::<T>(),
        }),
    }
  }

  /// Returns the value under `key`, creating it with `factory` on a miss.
  ///
  /// The factory runs without the cache lock held. If another thread stores
  /// the key in the meantime, its value wins and the freshly built one is
  /// dropped.
  pub fn get_or_insert_with<T, F>(&self, key: &str, factory: F) -> Result<T>
  where
    T: Any + Clone + Send + Sync,
    F: FnOnce() -> T,
  {
    tessera_guard::not_empty(key, "key")?;
    if let Some(value) = self.try_get_value_as::<T>(key)? {
      return Ok(value);
    }

    let value = factory();
    let mut entries = self.entries.lock();
    if let Some(existing) = entries.get(key) {
      return existing
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| CacheError::TypeMismatch {
          key: key.to_owned(),
          expected: type_name::<T>(),
        });
    }
    entries.insert(key.to_owned(), Box::new(value.clone()));
    tracing::trace!(key, "inserted cache entry from factory");
    Ok(value)
  }

  /// Returns the value under `key`, awaiting `factory` on a miss.
  ///
  /// Population is serialized: while one caller awaits its factory, every
  /// other caller that misses waits too, whatever its key. Callers hitting a
  /// present key are never blocked by a running population.
  #[cfg(feature = "tokio")]
  pub async fn get_value_async<T, F, Fut>(&self, key: &str, factory: F) -> Result<T>
  where
    T: Any + Clone + Send + Sync,
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
  {
    tessera_guard::not_empty(key, "key")?;
    if let Some(value) = self.try_get_value_as::<T>(key)? {
      return Ok(value);
    }

    let _population = self.population.lock().await;
    // Another caller may have populated the key while this one waited.
    if let Some(value) = self.try_get_value_as::<T>(key)? {
      return Ok(value);
    }

    tracing::trace!(key, "populating cache entry");
    let value = factory().await;
    self.store(key, Box::new(value.clone()));
    Ok(value)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.lock().contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.lock().is_empty()
  }

  /// A snapshot of the current keys, in no particular order.
  pub fn keys(&self) -> Vec<String> {
    self.entries.lock().keys().cloned().collect()
  }

  /// Removes and disposes the value under `key`. Returns `false` if the key
  /// was not present.
  pub fn remove(&self, key: &str) -> bool {
    let removed = self.entries.lock().remove(key);
    match removed {
      Some(value) => {
        self.dispose(key, value, RemovalReason::Removed);
        true
      }
      None => false,
    }
  }

  /// Removes the value under `key` and hands it back instead of disposing it.
  ///
  /// Returns `None` and leaves the entry in place when it is not a `T`.
  pub fn take<T: Any>(&self, key: &str) -> Option<T> {
    let mut entries = self.entries.lock();
    if !entries.get(key).is_some_and(|value| value.is::<T>()) {
      return None;
    }
    let value = entries.remove(key)?;
    drop(entries);
    value.downcast::<T>().ok().map(|boxed| *boxed)
  }

  /// Removes and disposes every entry.
  pub fn clear(&self) {
    let drained = std::mem::take(&mut *self.entries.lock());
    for (key, value) in drained {
      self.dispose(&key, value, RemovalReason::Cleared);
    }
  }

  fn store(&self, key: &str, value: Value) {
    let previous = self.entries.lock().insert(key.to_owned(), value);
    if let Some(previous) = previous {
      self.dispose(key, previous, RemovalReason::Replaced);
    }
  }

  fn dispose(&self, key: &str, value: Value, reason: RemovalReason) {
    tracing::trace!(key, %reason, "disposing cache entry");
    if let Some(listener) = &self.listener {
      listener.on_remove(key, &*value, reason);
    }
    drop(value);
  }
}

impl fmt::Debug for Cache {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Cache")
      .field("entries", &self.len())
      .field("has_listener", &self.listener.is_some())
      .finish()
  }
}
