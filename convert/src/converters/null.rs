use super::prioritized_converter;
use crate::converter::ObjectConverter;
use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::manager::ConvertManager;
use crate::types::{Object, Type};

prioritized_converter! {
  /// Maps an untyped null onto any nullable target.
  NullConverter
}

impl ObjectConverter for NullConverter {
  fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
    Ok(self.priority)
  }

  fn can_convert(&self, source: Option<&Type>, target: &Type, _manager: &dyn ConvertManager) -> Result<bool> {
    Ok(source.is_none() && target.is_nullable())
  }

  fn convert(
    &self,
    value: Option<&Object>,
    _source: Option<&Type>,
    target: &Type,
    _manager: &dyn ConvertManager,
    _format: &Format,
  ) -> Result<Option<Object>> {
    match value {
      None => Ok(None),
      Some(object) => Err(ConvertError::custom(format!(
        "expected null but got a value of type '{}' for target '{}'",
        object.ty(),
        target
      ))),
    }
  }
}
