//! Scalar values and the "convertible" rules that move between them.
//!
//! Every scalar type converts to and from the [`Scalar`] intermediate, so any
//! pair of scalars can be converted through two steps. The rules follow the
//! usual change-type conventions: integer narrowing is range-checked, floats
//! round half to even when they become integers, booleans map to `1` / `0`,
//! and strings are parsed using the [`Format`] in effect.

use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::types::{short_type_name, Reflect, Type};

use std::fmt::Display;

/// The intermediate representation shared by all scalar types.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
  Bool(bool),
  Char(char),
  Int(i128),
  Float(f64),
  Str(String),
}

impl Scalar {
  pub fn kind_name(&self) -> &'static str {
    match self {
      Scalar::Bool(_) => "bool",
      Scalar::Char(_) => "char",
      Scalar::Int(_) => "integer",
      Scalar::Float(_) => "float",
      Scalar::Str(_) => "String",
    }
  }

  /// Renders the value as text using the given format.
  pub fn render(&self, format: &Format) -> String {
    match self {
      Scalar::Bool(true) => format.true_text.clone(),
      Scalar::Bool(false) => format.false_text.clone(),
      Scalar::Char(c) => c.to_string(),
      Scalar::Int(i) => i.to_string(),
      Scalar::Float(f) => {
        let text = f.to_string();
        if format.decimal_separator == '.' {
          text
        } else {
          text.replace('.', &format.decimal_separator.to_string())
        }
      }
      Scalar::Str(s) => s.clone(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
  Bool,
  Char,
  Int { signed: bool, bits: u32 },
  Float { bits: u32 },
  Str,
}

impl ScalarKind {
  pub fn is_integer(&self) -> bool {
    matches!(self, ScalarKind::Int { .. })
  }

  pub fn is_numeric(&self) -> bool {
    matches!(self, ScalarKind::Int { .. } | ScalarKind::Float { .. })
  }
}

/// A reflected type that converts through [`Scalar`].
pub trait ScalarValue: Reflect {
  const KIND: ScalarKind;

  fn to_scalar(&self) -> Scalar;

  fn from_scalar(value: Scalar, format: &Format) -> Result<Self>;
}

fn target_name<T: 'static>() -> String {
  short_type_name(std::any::type_name::<T>())
}

fn invalid_cast<T: 'static>(from: &Scalar) -> ConvertError {
  ConvertError::InvalidCast {
    from: from.kind_name().to_string(),
    to: target_name::<T>(),
  }
}

fn overflow<T: 'static>(value: impl Display) -> ConvertError {
  ConvertError::Overflow {
    value: value.to_string(),
    target_type: target_name::<T>(),
  }
}

fn invalid_format<T: 'static>(input: &str) -> ConvertError {
  ConvertError::InvalidFormat {
    input: input.to_string(),
    target_type: target_name::<T>(),
  }
}

fn integer_from_scalar<T: 'static>(value: Scalar) -> Result<i128> {
  match value {
    Scalar::Int(i) => Ok(i),
    Scalar::Bool(b) => Ok(i128::from(b)),
    Scalar::Char(c) => Ok(i128::from(u32::from(c))),
    Scalar::Float(f) => {
      let rounded = f.round_ties_even();
      if !rounded.is_finite() || rounded.abs() >= 1e38 {
        return Err(overflow::<T>(f));
      }
      Ok(rounded as i128)
    }
    Scalar::Str(s) => s.trim().parse::<i128>().map_err(|_| invalid_format::<T>(&s)),
  }
}

fn float_from_scalar<T: 'static>(value: Scalar, format: &Format) -> Result<f64> {
  match value {
    Scalar::Float(f) => Ok(f),
    Scalar::Int(i) => Ok(i as f64),
    Scalar::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
    Scalar::Char(_) => Err(invalid_cast::<T>(&value)),
    Scalar::Str(s) => {
      let trimmed = s.trim();
      let parsed = if format.decimal_separator == '.' {
        trimmed.parse::<f64>()
      } else {
        trimmed.replace(format.decimal_separator, ".").parse::<f64>()
      };
      parsed.map_err(|_| invalid_format::<T>(&s))
    }
  }
}

macro_rules! impl_integer_scalar {
  ($($t:ty),* $(,)?) => {
    $(
      impl Reflect for $t {
        fn type_of() -> Type {
          Type::scalar::<$t>()
        }
      }

      impl ScalarValue for $t {
        const KIND: ScalarKind = ScalarKind::Int {
          signed: <$t>::MIN != 0,
          bits: <$t>::BITS,
        };

        fn to_scalar(&self) -> Scalar {
          Scalar::Int(*self as i128)
        }

        fn from_scalar(value: Scalar, _format: &Format) -> Result<Self> {
          let wide = integer_from_scalar::<$t>(value)?;
          <$t>::try_from(wide).map_err(|_| overflow::<$t>(wide))
        }
      }
    )*
  };
}

impl_integer_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Reflect for f64 {
  fn type_of() -> Type {
    Type::scalar::<f64>()
  }
}

impl ScalarValue for f64 {
  const KIND: ScalarKind = ScalarKind::Float { bits: 64 };

  fn to_scalar(&self) -> Scalar {
    Scalar::Float(*self)
  }

  fn from_scalar(value: Scalar, format: &Format) -> Result<Self> {
    float_from_scalar::<f64>(value, format)
  }
}

impl Reflect for f32 {
  fn type_of() -> Type {
    Type::scalar::<f32>()
  }
}

impl ScalarValue for f32 {
  const KIND: ScalarKind = ScalarKind::Float { bits: 32 };

  fn to_scalar(&self) -> Scalar {
    // Widen through the shortest decimal form so 0.1f32 stays 0.1.
    let widened = self.to_string().parse::<f64>().unwrap_or(f64::from(*self));
    Scalar::Float(widened)
  }

  fn from_scalar(value: Scalar, format: &Format) -> Result<Self> {
    float_from_scalar::<f32>(value, format).map(|f| f as f32)
  }
}

impl Reflect for bool {
  fn type_of() -> Type {
    Type::scalar::<bool>()
  }
}

impl ScalarValue for bool {
  const KIND: ScalarKind = ScalarKind::Bool;

  fn to_scalar(&self) -> Scalar {
    Scalar::Bool(*self)
  }

  fn from_scalar(value: Scalar, format: &Format) -> Result<Self> {
    match value {
      Scalar::Bool(b) => Ok(b),
      Scalar::Int(i) => Ok(i != 0),
      Scalar::Float(f) => Ok(f != 0.0),
      Scalar::Char(_) => Err(invalid_cast::<bool>(&value)),
      Scalar::Str(s) => {
        let trimmed = s.trim();
        if format.text_matches(&format.true_text, trimmed) || trimmed.eq_ignore_ascii_case("true") {
          Ok(true)
        } else if format.text_matches(&format.false_text, trimmed) || trimmed.eq_ignore_ascii_case("false") {
          Ok(false)
        } else {
          Err(invalid_format::<bool>(&s))
        }
      }
    }
  }
}

impl Reflect for char {
  fn type_of() -> Type {
    Type::scalar::<char>()
  }
}

impl ScalarValue for char {
  const KIND: ScalarKind = ScalarKind::Char;

  fn to_scalar(&self) -> Scalar {
    Scalar::Char(*self)
  }

  fn from_scalar(value: Scalar, _format: &Format) -> Result<Self> {
    match value {
      Scalar::Char(c) => Ok(c),
      Scalar::Int(i) => u32::try_from(i)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| overflow::<char>(i)),
      Scalar::Bool(_) | Scalar::Float(_) => Err(invalid_cast::<char>(&value)),
      Scalar::Str(s) => {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
          (Some(c), None) => Ok(c),
          _ => Err(invalid_format::<char>(&s)),
        }
      }
    }
  }
}

impl Reflect for String {
  fn type_of() -> Type {
    Type::scalar::<String>()
  }
}

impl ScalarValue for String {
  const KIND: ScalarKind = ScalarKind::Str;

  fn to_scalar(&self) -> Scalar {
    Scalar::Str(self.clone())
  }

  fn from_scalar(value: Scalar, format: &Format) -> Result<Self> {
    Ok(value.render(format))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn invariant() -> Format {
    Format::invariant()
  }

  #[test]
  fn integers_narrow_with_range_checks() {
    assert_eq!(u8::from_scalar(Scalar::Int(255), &invariant()), Ok(255));
    assert!(matches!(
      u8::from_scalar(Scalar::Int(256), &invariant()),
      Err(ConvertError::Overflow { .. })
    ));
    assert!(matches!(
      u32::from_scalar(Scalar::Int(-1), &invariant()),
      Err(ConvertError::Overflow { .. })
    ));
  }

  #[test]
  fn floats_round_half_to_even() {
    assert_eq!(i32::from_scalar(Scalar::Float(2.5), &invariant()), Ok(2));
    assert_eq!(i32::from_scalar(Scalar::Float(3.5), &invariant()), Ok(4));
    assert_eq!(i32::from_scalar(Scalar::Float(-2.5), &invariant()), Ok(-2));
    assert!(i64::from_scalar(Scalar::Float(f64::NAN), &invariant()).is_err());
  }

  #[test]
  fn strings_parse_with_format() {
    let comma = invariant().with_decimal_separator(',');
    assert_eq!(f64::from_scalar(Scalar::Str("1,25".into()), &comma), Ok(1.25));
    assert_eq!(Scalar::Float(1.25).render(&comma), "1,25");
    assert!(matches!(
      i32::from_scalar(Scalar::Str("12a".into()), &invariant()),
      Err(ConvertError::InvalidFormat { .. })
    ));
    assert_eq!(i32::from_scalar(Scalar::Str(" 42 ".into()), &invariant()), Ok(42));
  }

  #[test]
  fn booleans() {
    let german = invariant().with_bool_texts("wahr", "falsch");
    assert_eq!(bool::from_scalar(Scalar::Str("WAHR".into()), &german), Ok(true));
    assert_eq!(bool::from_scalar(Scalar::Str("false".into()), &german), Ok(false));
    assert_eq!(Scalar::Bool(true).render(&german), "wahr");
    assert_eq!(bool::from_scalar(Scalar::Int(7), &invariant()), Ok(true));
    assert_eq!(i8::from_scalar(Scalar::Bool(true), &invariant()), Ok(1));
  }

  #[test]
  fn chars_and_invalid_casts() {
    assert_eq!(u32::from_scalar(Scalar::Char('A'), &invariant()), Ok(65));
    assert_eq!(char::from_scalar(Scalar::Int(97), &invariant()), Ok('a'));
    assert_eq!(char::from_scalar(Scalar::Str("z".into()), &invariant()), Ok('z'));
    assert!(matches!(
      char::from_scalar(Scalar::Bool(true), &invariant()),
      Err(ConvertError::InvalidCast { .. })
    ));
    assert!(matches!(
      f64::from_scalar(Scalar::Char('x'), &invariant()),
      Err(ConvertError::InvalidCast { .. })
    ));
  }

  #[test]
  fn f32_widens_without_noise() {
    assert_eq!(0.1f32.to_scalar(), Scalar::Float(0.1));
  }
}
