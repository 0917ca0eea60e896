use std::any::Any;
use std::fmt;

/// Describes why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
  /// The entry was removed explicitly with `remove`.
  Removed,
  /// The entry was overwritten by a new value for the same key.
  Replaced,
  /// The entry was dropped by `clear`.
  Cleared,
}

impl fmt::Display for RemovalReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RemovalReason::Removed => write!(f, "removed"),
      RemovalReason::Replaced => write!(f, "replaced"),
      RemovalReason::Cleared => write!(f, "cleared"),
    }
  }
}

/// A listener that can be registered with the cache to be told about
/// entries before they are dropped.
///
/// `on_remove` runs on the thread that removed the entry, after the cache lock
/// has been released, so it may use the cache itself. The value is dropped
/// once every listener call has returned.
pub trait RemovalListener: Send + Sync {
  fn on_remove(&self, key: &str, value: &(dyn Any + Send + Sync), reason: RemovalReason);
}

impl<F> RemovalListener for F
where
  F: Fn(&str, &(dyn Any + Send + Sync), RemovalReason) + Send + Sync,
{
  fn on_remove(&self, key: &str, value: &(dyn Any + Send + Sync), reason: RemovalReason) {
    self(key, value, reason)
  }
}
