use tessera_guard::GuardError;
use thiserror::Error;

/// Errors raised while registering or resolving services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
  #[error("No service registered for {service}")]
  NotFound { service: String },

  #[error("Circular dependency detected while resolving service: {service}")]
  Circular { service: String },

  #[error("Registration for {service} does not hold the requested type")]
  TypeMismatch { service: String },

  #[error("Invalid service name: {0}")]
  InvalidName(#[from] GuardError),
}

/// A specialized `Result` type for service context operations.
pub type Result<T, E = ContextError> = std::result::Result<T, E>;
