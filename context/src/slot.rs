//! A view of a [`ServiceContext`] restricted to one service type.

use crate::context::ServiceContext;
use crate::error::Result;
use crate::events::{ServiceChanged, SubscriptionId};

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed access to the registrations of `T` in a context.
///
/// Obtained through [`ServiceContext::typed`]. Every operation is forwarded to
/// the underlying context, so a slot never holds state of its own.
pub struct ServiceSlot<'a, T: ?Sized> {
  context: &'a ServiceContext,
  _marker: PhantomData<fn() -> Arc<T>>,
}

impl<'a, T: ?Sized + Any + Send + Sync> ServiceSlot<'a, T> {
  pub(crate) fn new(context: &'a ServiceContext) -> Self {
    Self {
      context,
      _marker: PhantomData,
    }
  }

  pub fn context(&self) -> &'a ServiceContext {
    self.context
  }

  pub fn get(&self, name: Option<&str>) -> Option<Arc<T>> {
    self.context.get::<T>(name)
  }

  pub fn try_get(&self, name: Option<&str>) -> Result<Arc<T>> {
    self.context.try_get::<T>(name)
  }

  pub fn contains(&self, name: Option<&str>) -> bool {
    self.context.contains::<T>(name)
  }

  pub fn remove(&self, name: Option<&str>) -> bool {
    self.context.remove::<T>(name)
  }

  /// Subscribes to changes of `T` registrations only.
  pub fn subscribe(&self, listener: impl Fn(&ServiceChanged) + Send + Sync + 'static) -> SubscriptionId {
    self.context.subscribe(move |event| {
      if event.key.is::<T>() {
        listener(event);
      }
    })
  }
}

impl<'a, T: Any + Send + Sync> ServiceSlot<'a, T> {
  pub fn set(&self, instance: T) {
    self.context.set_instance(instance);
  }

  pub fn set_with_name(&self, name: &str, instance: T) -> Result<()> {
    self.context.set_instance_with_name(name, instance)
  }
}

impl<'a, T: ?Sized> fmt::Debug for ServiceSlot<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ServiceSlot")
      .field("service", &std::any::type_name::<T>())
      .finish()
  }
}
