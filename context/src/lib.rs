//! # Tessera Context
//!
//! A thread-safe registry of services keyed by type and an optional name.
//!
//! Services can be registered at any point during the application's
//! lifecycle, replaced, or removed again. Subscribers are told about each of
//! these changes once the registry has been updated.
//!
//! ## Core Concepts
//!
//! - **ServiceContext**: The registry. Create one per application (or per test)
//!   and pass it to the code that needs services.
//! - **Lifetimes**: Instances are stored as given, singletons are built once on
//!   first resolution, transients are built on every resolution.
//! - **Traits**: Services can be registered against a trait and resolved as a
//!   trait object.
//! - **Typed slots**: `context.typed::<T>()` narrows the context to one service
//!   type, including change subscriptions.
//!
//! ## Quick Start
//!
//! ```
//! use tessera_context::{resolve, ServiceContext};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!     message: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         self.message.clone()
//!     }
//! }
//!
//! let ctx = ServiceContext::new();
//! ctx.set_instance_with_name("greeting_message", String::from("Hello, World!")).unwrap();
//!
//! // Factories receive the context and can resolve their own dependencies.
//! ctx.set_singleton_trait::<dyn Greeter>(|ctx| {
//!     let message = resolve!(ctx, String, "greeting_message");
//!     Arc::new(EnglishGreeter { message: (*message).clone() })
//! });
//!
//! let greeter = resolve!(ctx, trait Greeter);
//! assert_eq!(greeter.greet(), "Hello, World!");
//! ```

mod context;
mod core;
pub mod error;
mod events;
mod global;
mod macros;
mod slot;

pub use crate::context::ServiceContext;
pub use crate::core::ServiceKey;
pub use error::{ContextError, Result};
pub use events::{ChangeKind, ServiceChanged, SubscriptionId};
pub use global::global;
pub use slot::ServiceSlot;
