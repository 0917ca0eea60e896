//! Public macros for ergonomic service resolution.

/// Resolves a required service from a context.
///
/// # Panics
///
/// Panics with the reason reported by [`ServiceContext::try_get`] when the
/// service cannot be resolved. Use `try_get` or `get` directly to handle a
/// missing service.
///
/// [`ServiceContext::try_get`]: crate::ServiceContext::try_get
///
/// # Examples
///
/// ```
/// use tessera_context::{resolve, ServiceContext};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// let ctx = ServiceContext::new();
/// ctx.set_instance(String::from("hello"));
/// ctx.set_singleton_trait::<dyn Greeter>(|_| Arc::new(EnglishGreeter));
///
/// assert_eq!(*resolve!(ctx, String), "hello");
/// assert_eq!(resolve!(ctx, trait Greeter).greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  // resolve!(ctx, trait MyTrait, "name")
  ($ctx:expr, trait $trait_ident:ident, $name:expr) => {
    $ctx
      .try_get::<dyn $trait_ident>(Some($name))
      .unwrap_or_else(|err| panic!("Failed to resolve required trait service: {}", err))
  };

  // resolve!(ctx, trait MyTrait)
  ($ctx:expr, trait $trait_ident:ident) => {
    $ctx
      .try_get::<dyn $trait_ident>(None)
      .unwrap_or_else(|err| panic!("Failed to resolve required trait service: {}", err))
  };

  // resolve!(ctx, MyService, "name")
  ($ctx:expr, $type:ty, $name:expr) => {
    $ctx
      .try_get::<$type>(Some($name))
      .unwrap_or_else(|err| panic!("Failed to resolve required service: {}", err))
  };

  // resolve!(ctx, MyService)
  ($ctx:expr, $type:ty) => {
    $ctx
      .try_get::<$type>(None)
      .unwrap_or_else(|err| panic!("Failed to resolve required service: {}", err))
  };
}
