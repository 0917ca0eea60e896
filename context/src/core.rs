//! Core data structures shared by the service context.

use crate::context::ServiceContext;
use crate::error::ContextError;

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

thread_local! {
  // The services currently being resolved on this thread. A key showing up
  // twice means a factory is (indirectly) asking for itself.
  static RESOLVING_STACK: RefCell<HashSet<ServiceKey>> = RefCell::new(HashSet::new());
}

/// An RAII guard that detects circular dependencies.
///
/// Creating it pushes the key onto the thread-local resolution stack and fails
/// if the key is already there. Dropping it pops the key again.
pub(crate) struct ResolutionGuard {
  key: ServiceKey,
}

impl ResolutionGuard {
  pub(crate) fn enter(key: &ServiceKey) -> Result<Self, ContextError> {
    let inserted = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert(key.clone()));
    if !inserted {
      return Err(ContextError::Circular {
        service: key.to_string(),
      });
    }
    Ok(Self { key: key.clone() })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

/// Identifies a registration: a type plus an optional name.
#[derive(Clone)]
pub struct ServiceKey {
  type_id: TypeId,
  type_name: &'static str,
  name: Option<String>,
}

impl ServiceKey {
  pub fn of<T: ?Sized + Any>(name: Option<&str>) -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
      name: name.map(str::to_owned),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn is<T: ?Sized + Any>(&self) -> bool {
    self.type_id == TypeId::of::<T>()
  }
}

impl PartialEq for ServiceKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id && self.name == other.name
  }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
    self.name.hash(state);
  }
}

impl fmt::Display for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "{} (name '{}')", self.type_name, name),
      None => f.write_str(self.type_name),
    }
  }
}

impl fmt::Debug for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ServiceKey({})", self)
  }
}

pub(crate) type Erased = Box<dyn Any + Send + Sync>;
pub(crate) type Factory = Box<dyn Fn(&ServiceContext) -> Erased + Send + Sync>;

/// How a registration produces its service. The erased value is always an
/// `Arc<T>` for the registered `T`.
pub(crate) enum Provider {
  Instance(Erased),
  Singleton {
    cell: once_cell::sync::OnceCell<Erased>,
    factory: Factory,
  },
  Transient(Factory),
}

impl Provider {
  pub(crate) fn lifetime(&self) -> &'static str {
    match self {
      Provider::Instance(_) => "instance",
      Provider::Singleton { .. } => "singleton",
      Provider::Transient(_) => "transient",
    }
  }
}
