use super::{missing_value, prioritized_converter, unexpected_type};
use crate::converter::ObjectConverter;
use crate::error::Result;
use crate::format::Format;
use crate::manager::ConvertManager;
use crate::types::{Object, Type};

prioritized_converter! {
  /// Converts between any two scalar types through the [`Scalar`](crate::Scalar)
  /// intermediate, honoring the [`Format`].
  ConvertibleConverter
}

impl ObjectConverter for ConvertibleConverter {
  fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
    Ok(self.priority)
  }

  fn can_convert(&self, source: Option<&Type>, target: &Type, _manager: &dyn ConvertManager) -> Result<bool> {
    let source_is_scalar = source.is_some_and(|source| source.as_scalar().is_some());
    Ok(source_is_scalar && target.as_scalar().is_some())
  }

  fn convert(
    &self,
    value: Option<&Object>,
    _source: Option<&Type>,
    target: &Type,
    _manager: &dyn ConvertManager,
    format: &Format,
  ) -> Result<Option<Object>> {
    let value = value.ok_or_else(|| missing_value(target))?;
    let scalar = value
      .ty()
      .as_scalar()
      .and_then(|info| info.to_scalar(value))
      .ok_or_else(|| unexpected_type(value, target))?;
    let target_info = target
      .as_scalar()
      .ok_or_else(|| unexpected_type(value, target))?;
    target_info.from_scalar(scalar, format).map(Some)
  }
}
