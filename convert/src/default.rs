use crate::converters::{
  ConvertibleConverter, EnumConverter, EnumerableConverter, IdentityConverter, NullConverter,
  NullableConverter, ToStringConverter,
};
use crate::error::Result;
use crate::format::Format;
use crate::manager::{ConvertManager, ObjectConvertManager};
use crate::types::{Object, Type};

use std::ops::{Deref, DerefMut};

/// Priority of the plain `Display` fallback.
pub const TO_STRING_PRIORITY: i32 = -98_000;
/// Priority of the untyped-null fallback.
pub const NULL_PRIORITY: i32 = -99_000;
/// Priority of the pass-through fallback, tried last.
pub const IDENTITY_PRIORITY: i32 = -100_000;

/// An [`ObjectConvertManager`] preloaded with the built-in converters.
///
/// Specific converters run at priority `0`; the catch-all converters sit far
/// below so they are only tried once everything else has declined or failed.
/// Further converters can still be registered through `DerefMut`.
#[derive(Debug, Clone)]
pub struct DefaultObjectConvertManager {
  inner: ObjectConvertManager,
}

impl DefaultObjectConvertManager {
  pub fn new() -> Self {
    let mut inner = ObjectConvertManager::new();
    inner
      .register_converter(EnumConverter::new())
      .register_converter(NullableConverter::new())
      .register_converter(EnumerableConverter::new())
      .register_converter(ConvertibleConverter::new())
      .register_converter(ToStringConverter::with_priority(TO_STRING_PRIORITY))
      .register_converter(NullConverter::with_priority(NULL_PRIORITY))
      .register_converter(IdentityConverter::with_priority(IDENTITY_PRIORITY));
    Self { inner }
  }

  pub fn into_inner(self) -> ObjectConvertManager {
    self.inner
  }
}

impl Default for DefaultObjectConvertManager {
  fn default() -> Self {
    Self::new()
  }
}

impl Deref for DefaultObjectConvertManager {
  type Target = ObjectConvertManager;

  fn deref(&self) -> &Self::Target {
    &self.inner
  }
}

impl DerefMut for DefaultObjectConvertManager {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.inner
  }
}

impl ConvertManager for DefaultObjectConvertManager {
  fn can_convert(&self, source: Option<&Type>, target: &Type) -> bool {
    self.inner.can_convert(source, target)
  }

  fn convert(
    &self,
    value: Option<&Object>,
    source: Option<&Type>,
    target: &Type,
    format: &Format,
  ) -> Result<Option<Object>> {
    self.inner.convert(value, source, target, format)
  }
}
