use crate::core::ServiceKey;

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// What happened to a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
  /// A key was registered for the first time.
  Added,
  /// An existing registration was overwritten.
  Replaced,
  /// A registration was removed.
  Removed,
}

impl fmt::Display for ChangeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChangeKind::Added => write!(f, "added"),
      ChangeKind::Replaced => write!(f, "replaced"),
      ChangeKind::Removed => write!(f, "removed"),
    }
  }
}

/// A notification delivered to subscribers after the registry has changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceChanged {
  pub key: ServiceKey,
  pub kind: ChangeKind,
}

/// Identifies a subscription so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&ServiceChanged) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
  next_id: AtomicU64,
  entries: RwLock<Vec<(SubscriptionId, Listener)>>,
}

impl Listeners {
  pub(crate) fn add(&self, listener: Listener) -> SubscriptionId {
    let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
    self.entries.write().push((id, listener));
    id
  }

  pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
    let mut entries = self.entries.write();
    let before = entries.len();
    entries.retain(|(existing, _)| *existing != id);
    entries.len() != before
  }

  /// Calls every listener without holding the lock, so listeners may
  /// subscribe, unsubscribe or touch the context themselves.
  pub(crate) fn notify(&self, event: &ServiceChanged) {
    let snapshot: Vec<Listener> = self
      .entries
      .read()
      .iter()
      .map(|(_, listener)| listener.clone())
      .collect();
    for listener in snapshot {
      listener(event);
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.read().len()
  }
}
