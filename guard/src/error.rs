use thiserror::Error;

/// A violated precondition, always naming the offending parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
  #[error("Parameter '{param}' must not be null")]
  Null { param: String },

  #[error("Parameter '{param}' must not be empty")]
  Empty { param: String },

  #[error("Parameter '{param}' is out of range: {value} is not within [{min}, {max}]")]
  OutOfRange {
    param: String,
    value: String,
    min: String,
    max: String,
  },

  #[error("Parameter '{param}' has the wrong type: expected {}", .expected.join(" or "))]
  WrongType {
    param: String,
    expected: Vec<&'static str>,
  },
}

impl GuardError {
  /// The name of the parameter that failed validation.
  pub fn param(&self) -> &str {
    match self {
      GuardError::Null { param }
      | GuardError::Empty { param }
      | GuardError::OutOfRange { param, .. }
      | GuardError::WrongType { param, .. } => param,
    }
  }
}

/// A specialized `Result` type for guard checks.
pub type Result<T, E = GuardError> = std::result::Result<T, E>;
