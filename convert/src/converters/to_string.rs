use super::{missing_value, prioritized_converter, unexpected_type};
use crate::converter::ObjectConverter;
use crate::error::Result;
use crate::format::Format;
use crate::manager::ConvertManager;
use crate::types::{Object, Type};

prioritized_converter! {
  /// Renders any displayable value with its plain `Display` output.
  ///
  /// The [`Format`] is ignored; use [`ConvertibleConverter`](super::ConvertibleConverter)
  /// for culture-aware text.
  ToStringConverter
}

impl ObjectConverter for ToStringConverter {
  fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
    Ok(self.priority)
  }

  fn can_convert(&self, source: Option<&Type>, target: &Type, _manager: &dyn ConvertManager) -> Result<bool> {
    Ok(target.is::<String>() && source.is_some_and(Type::has_display))
  }

  fn convert(
    &self,
    value: Option<&Object>,
    _source: Option<&Type>,
    target: &Type,
    _manager: &dyn ConvertManager,
    _format: &Format,
  ) -> Result<Option<Object>> {
    let value = value.ok_or_else(|| missing_value(target))?;
    let rendered = value
      .ty()
      .display_value(value)
      .ok_or_else(|| unexpected_type(value, target))?;
    Ok(Some(Object::new(rendered)))
  }
}
