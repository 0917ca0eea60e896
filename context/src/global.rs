//! The process-wide default context.

use crate::context::ServiceContext;
use once_cell::sync::Lazy;

// Created on first access in a thread-safe manner.
static GLOBAL_CONTEXT: Lazy<ServiceContext> = Lazy::new(ServiceContext::default);

/// Provides a reference to the process-wide default context.
///
/// Meant for application entry points that wire services once. Library code
/// should accept a `&ServiceContext` instead.
///
/// # Examples
///
/// ```
/// use tessera_context::global;
///
/// global().set_instance(String::from("Hello from global!"));
/// assert!(global().contains::<String>(None));
/// ```
pub fn global() -> &'static ServiceContext {
  &GLOBAL_CONTEXT
}
