use super::{missing_value, prioritized_converter, unexpected_type};
use crate::converter::ObjectConverter;
use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::manager::ConvertManager;
use crate::scalar::{Scalar, ScalarKind};
use crate::types::{EnumInfo, Object, Type};

prioritized_converter! {
  /// Converts enums to and from their names, their discriminants, and other enums.
  ///
  /// Strings are matched against variant names first (case-insensitively when the
  /// [`Format`] says so) and then parsed as discriminants. Discriminants that do
  /// not name a variant are rejected.
  EnumConverter
}

fn is_name_or_number(target: &Type) -> bool {
  target
    .as_scalar()
    .is_some_and(|info| info.kind() == ScalarKind::Str || info.kind().is_numeric())
}

fn is_name_or_integer(source: &Type) -> bool {
  source
    .as_scalar()
    .is_some_and(|info| info.kind() == ScalarKind::Str || info.kind().is_integer())
}

fn undefined(value: impl ToString, target: &Type) -> ConvertError {
  ConvertError::UndefinedVariant {
    value: value.to_string(),
    enum_type: target.to_string(),
  }
}

fn from_text(info: &EnumInfo, text: &str, target: &Type, format: &Format) -> Result<Object> {
  let text = text.trim();
  if let Some(variant) = info.from_name(text, format.ignore_case) {
    return Ok(variant);
  }
  match text.parse::<i64>() {
    Ok(discriminant) => info
      .from_discriminant(discriminant)
      .ok_or_else(|| undefined(discriminant, target)),
    Err(_) => Err(ConvertError::InvalidFormat {
      input: text.to_string(),
      target_type: target.to_string(),
    }),
  }
}

impl ObjectConverter for EnumConverter {
  fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
    Ok(self.priority)
  }

  fn can_convert(&self, source: Option<&Type>, target: &Type, _manager: &dyn ConvertManager) -> Result<bool> {
    let Some(source) = source else {
      return Ok(false);
    };
    Ok(match (source.as_enum(), target.as_enum()) {
      (Some(_), Some(_)) => true,
      (Some(_), None) => is_name_or_number(target),
      (None, Some(_)) => is_name_or_integer(source),
      (None, None) => false,
    })
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
    let source = value.ty();

    if let Some(source_info) = source.as_enum() {
      let name = source_info
        .name_of(value)
        .ok_or_else(|| unexpected_type(value, target))?;

      if let Some(target_info) = target.as_enum() {
        return target_info
          .from_name(name, format.ignore_case)
          .map(Some)
          .ok_or_else(|| undefined(name, target));
      }

      let scalar_target = target
        .as_scalar()
        .ok_or_else(|| unexpected_type(value, target))?;
      if scalar_target.kind() == ScalarKind::Str {
        return Ok(Some(Object::new(name.to_string())));
      }
      let discriminant = source_info
        .discriminant(value)
        .ok_or_else(|| unexpected_type(value, target))?;
      return scalar_target
        .from_scalar(Scalar::Int(i128::from(discriminant)), format)
        .map(Some);
    }

    let target_info = target
      .as_enum()
      .ok_or_else(|| unexpected_type(value, target))?;
    let scalar = source
      .as_scalar()
      .and_then(|info| info.to_scalar(value))
      .ok_or_else(|| unexpected_type(value, target))?;

    match scalar {
      Scalar::Str(text) => from_text(target_info, &text, target, format).map(Some),
      Scalar::Int(wide) => {
        let discriminant = i64::try_from(wide).map_err(|_| undefined(wide, target))?;
        target_info
          .from_discriminant(discriminant)
          .map(Some)
          .ok_or_else(|| undefined(discriminant, target))
      }
      _ => Err(unexpected_type(value, target)),
    }
  }
}
