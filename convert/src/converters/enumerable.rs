use super::{missing_value, prioritized_converter, unexpected_type};
use crate::converter::ObjectConverter;
use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::manager::ConvertManager;
use crate::types::{Object, Type};

prioritized_converter! {
  /// Converts one sequence into another by converting every element through
  /// the manager.
  ///
  /// Sequences of [`Object`] carry their element types at runtime, so they are
  /// accepted up front and checked element by element.
  EnumerableConverter
}

impl ObjectConverter for EnumerableConverter {
  fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
    Ok(self.priority)
  }

  fn can_convert(&self, source: Option<&Type>, target: &Type, manager: &dyn ConvertManager) -> Result<bool> {
    let (Some(source), Some(target)) = (source.and_then(Type::as_sequence), target.as_sequence()) else {
      return Ok(false);
    };
    if source.element().is_any() {
      return Ok(true);
    }
    Ok(manager.can_convert(Some(source.element()), target.element()))
  }

  fn convert(
    &self,
    value: Option<&Object>,
    _source: Option<&Type>,
    target: &Type,
    manager: &dyn ConvertManager,
    format: &Format,
  ) -> Result<Option<Object>> {
    let value = value.ok_or_else(|| missing_value(target))?;
    let source_info = value
      .ty()
      .as_sequence()
      .ok_or_else(|| unexpected_type(value, target))?;
    let target_info = target
      .as_sequence()
      .ok_or_else(|| unexpected_type(value, target))?;
    let elements = source_info
      .split(value)
      .ok_or_else(|| unexpected_type(value, target))?;
    let element_type = target_info.element();

    let converted = elements
      .iter()
      .enumerate()
      .map(|(index, element)| {
        let converted = match manager.convert(Some(element), None, element_type, format) {
          Ok(Some(object)) => Ok(object),
          Ok(None) => element_type
            .null_object()
            .ok_or_else(|| ConvertError::NullResult {
              target_type: element_type.to_string(),
            }),
          Err(error) => Err(error),
        };
        converted.map_err(|error| ConvertError::custom(format!("element {}: {}", index, error)))
      })
      .collect::<Result<Vec<Object>>>()?;

    target_info.collect(converted).map(Some)
  }
}
