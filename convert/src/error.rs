use thiserror::Error;

/// Everything that can go wrong while resolving or running a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
  #[error("Cannot convert null declared as non-nullable type '{source_type}'")]
  NullNotAllowed { source_type: String },

  #[error("Value of type '{actual}' is not assignable to the declared source type '{expected}'")]
  SourceTypeMismatch { expected: String, actual: String },

  #[error("No converter found to convert from '{source_type}' to '{target_type}'")]
  NoConverter {
    source_type: String,
    target_type: String,
  },

  #[error(
    "All converters failed to convert from '{source_type}' to '{target_type}':\n{}",
    .failures.join("\n")
  )]
  AllFailed {
    source_type: String,
    target_type: String,
    failures: Vec<String>,
  },

  #[error("Conversion to non-nullable type '{target_type}' produced null")]
  NullResult { target_type: String },

  #[error("Nullable value holds nothing to convert to '{target_type}'")]
  MissingValue { target_type: String },

  #[error("Invalid cast from '{from}' to '{to}'")]
  InvalidCast { from: String, to: String },

  #[error("Value '{value}' is out of range for type '{target_type}'")]
  Overflow { value: String, target_type: String },

  #[error("Input '{input}' is not in a valid format for type '{target_type}'")]
  InvalidFormat { input: String, target_type: String },

  #[error("'{value}' is not a defined value of enum '{enum_type}'")]
  UndefinedVariant { value: String, enum_type: String },

  #[error("{0}")]
  Custom(String),
}

impl ConvertError {
  /// A free-form error, for converters implemented outside this crate.
  pub fn custom(message: impl Into<String>) -> Self {
    ConvertError::Custom(message.into())
  }
}

/// A specialized `Result` type for conversion operations.
pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
