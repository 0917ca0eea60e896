use super::prioritized_converter;
use crate::converter::ObjectConverter;
use crate::error::Result;
use crate::format::Format;
use crate::manager::ConvertManager;
use crate::types::{Object, Type};

prioritized_converter! {
  /// Passes the value through when the target type can already hold it.
  IdentityConverter
}

impl ObjectConverter for IdentityConverter {
  fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
    Ok(self.priority)
  }

  fn can_convert(&self, source: Option<&Type>, target: &Type, _manager: &dyn ConvertManager) -> Result<bool> {
    Ok(source.is_some_and(|source| target.is_assignable_from(source)))
  }

  fn convert(
    &self,
    value: Option<&Object>,
    _source: Option<&Type>,
    _target: &Type,
    _manager: &dyn ConvertManager,
    _format: &Format,
  ) -> Result<Option<Object>> {
    Ok(value.cloned())
  }
}
