//! # Tessera Guard
//!
//! Small, stateless guard clauses for validating arguments at API boundaries.
//!
//! Every guard either hands the validated value back unchanged or returns a
//! [`GuardError`] that names the offending parameter, so checks compose with `?`:
//!
//! ```
//! use tessera_guard::{not_null_or_empty, not_out_of_range, GuardError};
//!
//! fn connect(host: Option<&str>, port: u16) -> Result<String, GuardError> {
//!   let host = not_null_or_empty(host, "host")?;
//!   let port = not_out_of_range(port, 1, 65535, "port")?;
//!   Ok(format!("{host}:{port}"))
//! }
//!
//! assert_eq!(connect(Some("localhost"), 8080).unwrap(), "localhost:8080");
//! assert_eq!(connect(None, 8080).unwrap_err().param(), "host");
//! ```

mod error;

pub use error::{GuardError, Result};

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;

const UNBOUNDED: &str = "unbounded";

/// Values that have a notion of being empty.
pub trait IsEmpty {
  fn is_empty_value(&self) -> bool;
}

impl IsEmpty for str {
  fn is_empty_value(&self) -> bool {
    self.is_empty()
  }
}

impl IsEmpty for String {
  fn is_empty_value(&self) -> bool {
    self.is_empty()
  }
}

impl<T> IsEmpty for [T] {
  fn is_empty_value(&self) -> bool {
    self.is_empty()
  }
}

impl<T> IsEmpty for Vec<T> {
  fn is_empty_value(&self) -> bool {
    self.is_empty()
  }
}

impl<K, V, S> IsEmpty for HashMap<K, V, S> {
  fn is_empty_value(&self) -> bool {
    self.is_empty()
  }
}

impl<K, V> IsEmpty for BTreeMap<K, V> {
  fn is_empty_value(&self) -> bool {
    self.is_empty()
  }
}

impl<T, S> IsEmpty for HashSet<T, S> {
  fn is_empty_value(&self) -> bool {
    self.is_empty()
  }
}

impl<T: IsEmpty + ?Sized> IsEmpty for &T {
  fn is_empty_value(&self) -> bool {
    (**self).is_empty_value()
  }
}

/// A runtime type identity paired with a readable name, used by the type guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
  id: TypeId,
  name: &'static str,
}

impl TypeTag {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn id(&self) -> TypeId {
    self.id
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

/// Returns the contained value, or [`GuardError::Null`] if it is absent.
pub fn not_null<T>(value: Option<T>, param: &str) -> Result<T> {
  value.ok_or_else(|| GuardError::Null {
    param: param.to_owned(),
  })
}

/// Returns the value if it is present and not empty.
pub fn not_null_or_empty<T: IsEmpty>(value: Option<T>, param: &str) -> Result<T> {
  not_empty(not_null(value, param)?, param)
}

/// Returns the value if it is not empty.
pub fn not_empty<T: IsEmpty>(value: T, param: &str) -> Result<T> {
  if value.is_empty_value() {
    return Err(GuardError::Empty {
      param: param.to_owned(),
    });
  }
  Ok(value)
}

/// Returns the value if `min <= value <= max`.
pub fn not_out_of_range<T: PartialOrd + Display>(value: T, min: T, max: T, param: &str) -> Result<T> {
  if value < min || value > max {
    return Err(GuardError::OutOfRange {
      param: param.to_owned(),
      value: value.to_string(),
      min: min.to_string(),
      max: max.to_string(),
    });
  }
  Ok(value)
}

/// Returns the value if `value >= min`.
pub fn at_least<T: PartialOrd + Display>(value: T, min: T, param: &str) -> Result<T> {
  if value < min {
    return Err(GuardError::OutOfRange {
      param: param.to_owned(),
      value: value.to_string(),
      min: min.to_string(),
      max: UNBOUNDED.to_owned(),
    });
  }
  Ok(value)
}

/// Returns the value if `value <= max`.
pub fn at_most<T: PartialOrd + Display>(value: T, max: T, param: &str) -> Result<T> {
  if value > max {
    return Err(GuardError::OutOfRange {
      param: param.to_owned(),
      value: value.to_string(),
      min: UNBOUNDED.to_owned(),
      max: max.to_string(),
    });
  }
  Ok(value)
}

/// Downcasts `value` to `T`, failing with [`GuardError::WrongType`].
pub fn of_type<'a, T: Any>(value: &'a dyn Any, param: &str) -> Result<&'a T> {
  value.downcast_ref::<T>().ok_or_else(|| GuardError::WrongType {
    param: param.to_owned(),
    expected: vec![std::any::type_name::<T>()],
  })
}

/// Like [`of_type`], but lets `None` through.
pub fn of_type_or_none<'a, T: Any>(value: Option<&'a dyn Any>, param: &str) -> Result<Option<&'a T>> {
  value.map(|v| of_type::<T>(v, param)).transpose()
}

/// Accepts `value` if its concrete type is one of `allowed`.
pub fn of_any_type<'a>(value: &'a dyn Any, allowed: &[TypeTag], param: &str) -> Result<&'a dyn Any> {
  let actual = Any::type_id(value);
  if allowed.iter().any(|tag| tag.id == actual) {
    return Ok(value);
  }
  Err(GuardError::WrongType {
    param: param.to_owned(),
    expected: allowed.iter().map(TypeTag::name).collect(),
  })
}

/// Like [`of_any_type`], but lets `None` through.
pub fn of_any_type_or_none<'a>(
  value: Option<&'a dyn Any>,
  allowed: &[TypeTag],
  param: &str,
) -> Result<Option<&'a dyn Any>> {
  value.map(|v| of_any_type(v, allowed, param)).transpose()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn type_tag_compares_by_type() {
    assert_eq!(TypeTag::of::<u8>(), TypeTag::of::<u8>());
    assert_ne!(TypeTag::of::<u8>(), TypeTag::of::<u16>());
    assert_eq!(TypeTag::of::<String>().name(), "alloc::string::String");
  }

  #[test]
  fn empty_through_references() {
    let v: Vec<u8> = Vec::new();
    assert!((&v).is_empty_value());
    assert!(!"x".is_empty_value());
  }
}
