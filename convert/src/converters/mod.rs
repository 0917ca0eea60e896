//! The built-in converters.

mod convertible;
mod enumerable;
mod enumeration;
mod identity;
mod null;
mod nullable;
mod to_string;

/// Declares a converter struct that carries a fixed, configurable priority.
macro_rules! prioritized_converter {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct $name {
      priority: i32,
    }

    impl $name {
      /// Creates the converter with priority `0`.
      pub fn new() -> Self {
        Self::with_priority(0)
      }

      pub fn with_priority(priority: i32) -> Self {
        Self { priority }
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }
  };
}

pub(crate) use prioritized_converter;

pub use convertible::ConvertibleConverter;
pub use enumerable::EnumerableConverter;
pub use enumeration::EnumConverter;
pub use identity::IdentityConverter;
pub use null::NullConverter;
pub use nullable::NullableConverter;
pub use to_string::ToStringConverter;

use crate::error::ConvertError;
use crate::types::Type;

pub(crate) fn missing_value(target: &Type) -> ConvertError {
  ConvertError::MissingValue {
    target_type: target.to_string(),
  }
}

pub(crate) fn unexpected_type(value: &crate::Object, target: &Type) -> ConvertError {
  ConvertError::InvalidCast {
    from: value.ty().to_string(),
    to: target.to_string(),
  }
}
