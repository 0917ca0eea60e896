use tessera_guard::GuardError;
use thiserror::Error;

/// Errors raised by [`Cache`](crate::Cache) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
  #[error("Invalid cache key: {0}")]
  InvalidKey(#[from] GuardError),

  #[error("Cache entry '{key}' does not hold a value of type {expected}")]
  TypeMismatch { key: String, expected: &'static str },
}

/// A specialized `Result` type for cache operations.
pub type Result<T, E = CacheError> = std::result::Result<T, E>;
