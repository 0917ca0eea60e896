//! The `ServiceContext` struct and its associated methods.

use crate::core::{Erased, Provider, ResolutionGuard, ServiceKey};
use crate::error::{ContextError, Result};
use crate::events::{ChangeKind, Listeners, ServiceChanged, SubscriptionId};
use crate::slot::ServiceSlot;

use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A registry of services keyed by type and an optional name.
///
/// The context is thread-safe; services can be registered, replaced and
/// removed at any time. Every change is reported to subscribers after the
/// registry has been updated.
#[derive(Default)]
pub struct ServiceContext {
  providers: DashMap<ServiceKey, Arc<Provider>>,
  listeners: Listeners,
}

impl ServiceContext {
  /// Creates a new, empty `ServiceContext`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn key_for<T: ?Sized + Any>(name: Option<&str>) -> Result<ServiceKey> {
    if let Some(name) = name {
      tessera_guard::not_empty(name, "name")?;
    }
    Ok(ServiceKey::of::<T>(name))
  }

  fn insert(&self, key: ServiceKey, provider: Provider) {
    tracing::trace!(service = %key, lifetime = provider.lifetime(), "registering service");
    let previous = self.providers.insert(key.clone(), Arc::new(provider));
    let kind = if previous.is_some() {
      ChangeKind::Replaced
    } else {
      ChangeKind::Added
    };
    self.listeners.notify(&ServiceChanged { key, kind });
  }

  fn singleton<T: Any + Send + Sync>(
    factory: impl Fn(&ServiceContext) -> T + Send + Sync + 'static,
  ) -> Provider {
    Provider::Singleton {
      cell: once_cell::sync::OnceCell::new(),
      factory: Box::new(move |ctx| Box::new(Arc::new(factory(ctx))) as Erased),
    }
  }

  fn transient<T: Any + Send + Sync>(
    factory: impl Fn(&ServiceContext) -> T + Send + Sync + 'static,
  ) -> Provider {
    Provider::Transient(Box::new(move |ctx| Box::new(Arc::new(factory(ctx))) as Erased))
  }

  fn singleton_trait<I: ?Sized + Any + Send + Sync>(
    factory: impl Fn(&ServiceContext) -> Arc<I> + Send + Sync + 'static,
  ) -> Provider {
    Provider::Singleton {
      cell: once_cell::sync::OnceCell::new(),
      factory: Box::new(move |ctx| Box::new(factory(ctx)) as Erased),
    }
  }

  // --- PUBLIC API ---

  // --- Instance Registration ---
  pub fn set_instance<T: Any + Send + Sync>(&self, instance: T) {
    let provider = Provider::Instance(Box::new(Arc::new(instance)));
    self.insert(ServiceKey::of::<T>(None), provider);
  }
  pub fn set_instance_with_name<T: Any + Send + Sync>(&self, name: &str, instance: T) -> Result<()> {
    let key = Self::key_for::<T>(Some(name))?;
    self.insert(key, Provider::Instance(Box::new(Arc::new(instance))));
    Ok(())
  }

  /// Registers an existing trait object.
  pub fn set_instance_trait<I: ?Sized + Any + Send + Sync>(&self, instance: Arc<I>) {
    self.insert(ServiceKey::of::<I>(None), Provider::Instance(Box::new(instance)));
  }
  pub fn set_instance_trait_with_name<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    instance: Arc<I>,
  ) -> Result<()> {
    let key = Self::key_for::<I>(Some(name))?;
    self.insert(key, Provider::Instance(Box::new(instance)));
    Ok(())
  }

  // --- Singleton Registration ---
  pub fn set_singleton<T: Any + Send + Sync>(
    &self,
    factory: impl Fn(&ServiceContext) -> T + Send + Sync + 'static,
  ) {
    self.insert(ServiceKey::of::<T>(None), Self::singleton(factory));
  }
  pub fn set_singleton_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&ServiceContext) -> T + Send + Sync + 'static,
  ) -> Result<()> {
    let key = Self::key_for::<T>(Some(name))?;
    self.insert(key, Self::singleton(factory));
    Ok(())
  }

  // --- Transient Registration ---
  pub fn set_transient<T: Any + Send + Sync>(
    &self,
    factory: impl Fn(&ServiceContext) -> T + Send + Sync + 'static,
  ) {
    self.insert(ServiceKey::of::<T>(None), Self::transient(factory));
  }
  pub fn set_transient_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&ServiceContext) -> T + Send + Sync + 'static,
  ) -> Result<()> {
    let key = Self::key_for::<T>(Some(name))?;
    self.insert(key, Self::transient(factory));
    Ok(())
  }

  // --- Trait Registration ---
  pub fn set_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn(&ServiceContext) -> Arc<I> + Send + Sync + 'static,
  ) {
    self.insert(ServiceKey::of::<I>(None), Self::singleton_trait(factory));
  }
  pub fn set_singleton_trait_with_name<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&ServiceContext) -> Arc<I> + Send + Sync + 'static,
  ) -> Result<()> {
    let key = Self::key_for::<I>(Some(name))?;
    self.insert(key, Self::singleton_trait(factory));
    Ok(())
  }

  // --- Resolution ---

  /// Resolves a service, reporting why it could not be produced.
  pub fn try_get<T: ?Sized + Any + Send + Sync>(&self, name: Option<&str>) -> Result<Arc<T>> {
    let key = ServiceKey::of::<T>(name);

    // The guard must be live before any factory runs so re-entrant
    // resolution of the same key is caught.
    let _guard = ResolutionGuard::enter(&key)?;

    // Clone the provider out so no map lock is held while factories run.
    let provider = self
      .providers
      .get(&key)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| ContextError::NotFound {
        service: key.to_string(),
      })?;

    let mismatch = || ContextError::TypeMismatch {
      service: key.to_string(),
    };

    match provider.as_ref() {
      Provider::Instance(instance) => instance.downcast_ref::<Arc<T>>().cloned().ok_or_else(mismatch),
      Provider::Singleton { cell, factory } => cell
        .get_or_init(|| factory(self))
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(mismatch),
      Provider::Transient(factory) => factory(self)
        .downcast::<Arc<T>>()
        .map(|arc_in_a_box| *arc_in_a_box)
        .map_err(|_| mismatch()),
    }
  }

  /// Resolves a service from the context.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, name: Option<&str>) -> Option<Arc<T>> {
    self.try_get(name).ok()
  }

  pub fn contains<T: ?Sized + Any>(&self, name: Option<&str>) -> bool {
    self.providers.contains_key(&ServiceKey::of::<T>(name))
  }

  /// Removes a registration. Returns `false` if nothing was registered.
  pub fn remove<T: ?Sized + Any>(&self, name: Option<&str>) -> bool {
    let key = ServiceKey::of::<T>(name);
    match self.providers.remove(&key) {
      Some((key, _provider)) => {
        tracing::trace!(service = %key, "removed service");
        self.listeners.notify(&ServiceChanged {
          key,
          kind: ChangeKind::Removed,
        });
        true
      }
      None => false,
    }
  }

  /// Removes every registration, notifying once per removed key.
  pub fn clear(&self) {
    for key in self.keys() {
      if let Some((key, _provider)) = self.providers.remove(&key) {
        self.listeners.notify(&ServiceChanged {
          key,
          kind: ChangeKind::Removed,
        });
      }
    }
  }

  pub fn len(&self) -> usize {
    self.providers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.providers.is_empty()
  }

  /// A snapshot of the registered keys, in no particular order.
  pub fn keys(&self) -> Vec<ServiceKey> {
    self.providers.iter().map(|entry| entry.key().clone()).collect()
  }

  // --- Change Notification ---

  /// Registers a listener that is called after every registry change.
  pub fn subscribe(&self, listener: impl Fn(&ServiceChanged) + Send + Sync + 'static) -> SubscriptionId {
    self.listeners.add(Arc::new(listener))
  }

  /// Cancels a subscription. Returns `false` if it was not active.
  pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
    self.listeners.remove(id)
  }

  /// A view of this context restricted to services of type `T`.
  pub fn typed<T: ?Sized + Any + Send + Sync>(&self) -> ServiceSlot<'_, T> {
    ServiceSlot::new(self)
  }
}

impl fmt::Debug for ServiceContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ServiceContext")
      .field("services", &self.providers.len())
      .field("subscribers", &self.listeners.len())
      .finish()
  }
}
