use crate::error::Result;
use crate::format::Format;
use crate::manager::ConvertManager;
use crate::types::{Object, Type};

/// A single conversion strategy.
///
/// A source type of `None` stands for a null value whose declared type is unknown.
/// Converters may call back into the `manager` for nested conversions, such as
/// the elements of a sequence or the inner value of an `Option`.
///
/// Errors are never fatal to the pipeline: an `Err` from [`priority`] ranks the
/// converter last, an `Err` from [`can_convert`] excludes it, and an `Err` from
/// [`convert`] moves on to the next candidate.
///
/// [`priority`]: ObjectConverter::priority
/// [`can_convert`]: ObjectConverter::can_convert
/// [`convert`]: ObjectConverter::convert
pub trait ObjectConverter: Send + Sync {
  /// A short name used when reporting failures.
  fn name(&self) -> &str {
    let full = std::any::type_name::<Self>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
  }

  /// Higher values are tried first.
  fn priority(&self, source: Option<&Type>, target: &Type) -> Result<i32>;

  fn can_convert(
    &self,
    source: Option<&Type>,
    target: &Type,
    manager: &dyn ConvertManager,
  ) -> Result<bool>;

  fn convert(
    &self,
    value: Option<&Object>,
    source: Option<&Type>,
    target: &Type,
    manager: &dyn ConvertManager,
    format: &Format,
  ) -> Result<Option<Object>>;
}
