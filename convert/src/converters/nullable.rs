use super::{missing_value, prioritized_converter, unexpected_type};
use crate::converter::ObjectConverter;
use crate::error::Result;
use crate::format::Format;
use crate::manager::ConvertManager;
use crate::types::{Object, Type};

prioritized_converter! {
  /// Wraps values into `Option<T>` targets and unwraps `Option<S>` sources,
  /// converting the inner value through the manager.
  ///
  /// Null stays null for nullable targets. An empty `Option` cannot become a
  /// non-nullable value.
  NullableConverter
}

impl ObjectConverter for NullableConverter {
  fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
    Ok(self.priority)
  }

  fn can_convert(&self, source: Option<&Type>, target: &Type, manager: &dyn ConvertManager) -> Result<bool> {
    let Some(source) = source else {
      return Ok(false);
    };
    let inner_source = source.as_optional().map_or(source, |info| info.inner());
    let claimed = match target.as_optional() {
      Some(target_info) => manager.can_convert(Some(inner_source), target_info.inner()),
      None => source.as_optional().is_some() && manager.can_convert(Some(inner_source), target),
    };
    Ok(claimed)
  }

  fn convert(
    &self,
    value: Option<&Object>,
    _source: Option<&Type>,
    target: &Type,
    manager: &dyn ConvertManager,
    format: &Format,
  ) -> Result<Option<Object>> {
    let inner_value = match value {
      None => None,
      Some(object) => match object.ty().as_optional() {
        Some(info) => info
          .unwrap(object)
          .ok_or_else(|| unexpected_type(object, target))?,
        None => Some(object.clone()),
      },
    };

    match target.as_optional() {
      Some(target_info) => {
        let Some(inner_value) = inner_value else {
          return Ok(None);
        };
        let converted = manager.convert(Some(&inner_value), None, target_info.inner(), format)?;
        match converted {
          Some(converted) => target_info.wrap(Some(converted)).map(Some),
          None => Ok(None),
        }
      }
      None => {
        let inner_value = inner_value.ok_or_else(|| missing_value(target))?;
        manager.convert(Some(&inner_value), None, target, format)
      }
    }
  }
}
