use pretty_assertions::assert_eq;
use tessera_convert::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
  Red = 1,
  Green = 2,
  Blue = 4,
}

reflect_enum!(Color { Red, Green, Blue });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Light {
  Green,
  Red,
}

reflect_enum!(Light { Green, Red });

#[derive(Debug, Clone, PartialEq)]
struct Token(u64);

reflect_opaque!(Token);

fn manager() -> DefaultObjectConvertManager {
  DefaultObjectConvertManager::new()
}

#[test]
fn test_default_registration_order_and_priorities() {
  let manager = manager();
  let names: Vec<&str> = manager.converters().iter().map(|c| c.name()).collect();
  assert_eq!(
    names,
    vec![
      "EnumConverter",
      "NullableConverter",
      "EnumerableConverter",
      "ConvertibleConverter",
      "ToStringConverter",
      "NullConverter",
      "IdentityConverter",
    ]
  );

  let any = Type::any();
  let priorities: Vec<i32> = manager
    .converters()
    .iter()
    .map(|c| c.priority(None, &any).unwrap())
    .collect();
  assert_eq!(priorities, vec![0, 0, 0, 0, TO_STRING_PRIORITY, NULL_PRIORITY, IDENTITY_PRIORITY]);
}

#[test]
fn test_integer_to_string_uses_convertible_converter() {
  let manager = manager();
  let text: String = manager.convert_value(5i32).unwrap();
  assert_eq!(text, "5");
}

#[test]
fn test_format_aware_converter_beats_display_fallback() {
  // Both the convertible and the display converter claim f64 -> String; only the
  // convertible one honors the decimal separator, so its output identifies it.
  let manager = manager();
  let comma = Format::invariant().with_decimal_separator(',');

  let text: String = manager.convert_value_with_format(1.5f64, &comma).unwrap();

  assert_eq!(text, "1,5");
}

#[test]
fn test_display_fallback_takes_over_when_preferred_converter_is_absent() {
  let mut manager = ObjectConvertManager::new();
  manager.register_converter(ToStringConverter::with_priority(TO_STRING_PRIORITY));
  let comma = Format::invariant().with_decimal_separator(',');

  let text: String = manager.convert_value_with_format(1.5f64, &comma).unwrap();

  assert_eq!(text, "1.5");
}

#[test]
fn test_scalar_conversions() {
  let manager = manager();
  assert_eq!(manager.convert_value::<String, i64>(" -12 ".into()).unwrap(), -12);
  assert_eq!(manager.convert_value::<f64, i32>(2.5).unwrap(), 2);
  assert_eq!(manager.convert_value::<bool, u8>(true).unwrap(), 1);
  assert_eq!(manager.convert_value::<String, bool>("TRUE".into()).unwrap(), true);
  assert_eq!(manager.convert_value::<char, u32>('A').unwrap(), 65);
  assert_eq!(manager.convert_value::<f32, f64>(0.1).unwrap(), 0.1);

  let err = manager.convert_value::<i64, u8>(256).unwrap_err();
  match err {
    ConvertError::AllFailed { failures, .. } => {
      assert_eq!(failures.len(), 1);
      assert!(failures[0].starts_with("ConvertibleConverter: Value '256' is out of range"));
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_round_trip_for_lossless_pairs() {
  let manager = manager();
  let there: String = manager.convert_value(12345u32).unwrap();
  let back: u32 = manager.convert_value(there).unwrap();
  assert_eq!(back, 12345);

  let there: i64 = manager.convert_value(-7i16).unwrap();
  let back: i16 = manager.convert_value(there).unwrap();
  assert_eq!(back, -7);
}

#[test]
fn test_enum_conversions() {
  let manager = manager();

  assert_eq!(manager.convert_value::<Color, String>(Color::Blue).unwrap(), "Blue");
  assert_eq!(manager.convert_value::<Color, u8>(Color::Blue).unwrap(), 4);
  assert_eq!(manager.convert_value::<Color, f64>(Color::Green).unwrap(), 2.0);
  assert_eq!(manager.convert_value::<String, Color>("green".into()).unwrap(), Color::Green);
  assert_eq!(manager.convert_value::<String, Color>("4".into()).unwrap(), Color::Blue);
  assert_eq!(manager.convert_value::<i32, Color>(1).unwrap(), Color::Red);
  assert_eq!(manager.convert_value::<Color, Light>(Color::Red).unwrap(), Light::Red);

  assert!(manager.convert_value::<i32, Color>(3).is_err());
  assert!(manager.convert_value::<Color, Light>(Color::Blue).is_err());
  assert!(manager.convert_value::<String, Color>("purple".into()).is_err());
}

#[test]
fn test_enum_names_respect_case_sensitivity() {
  let manager = manager();
  let strict = Format::invariant().with_ignore_case(false);

  let err = manager
    .convert_value_with_format::<String, Color>("red".into(), &strict)
    .unwrap_err();
  assert!(err.to_string().contains("EnumConverter"));

  let exact: Color = manager.convert_value_with_format("Red".to_string(), &strict).unwrap();
  assert_eq!(exact, Color::Red);
}

#[test]
fn test_sequences_convert_element_wise() {
  let manager = manager();

  let numbers: Vec<i64> = manager.convert_value(vec!["1".to_string(), "2".to_string()]).unwrap();
  assert_eq!(numbers, vec![1, 2]);

  let colors: Vec<Color> = manager.convert_value(vec![1u8, 2]).unwrap();
  assert_eq!(colors, vec![Color::Red, Color::Green]);

  let nested: Vec<Vec<String>> = manager.convert_value(vec![vec![true], vec![]]).unwrap();
  assert_eq!(nested, vec![vec!["true".to_string()], vec![]]);

  let err = manager
    .convert_value::<Vec<String>, Vec<u8>>(vec!["7".into(), "x".into()])
    .unwrap_err();
  assert!(err.to_string().contains("element 1"), "{err}");
}

#[test]
fn test_heterogeneous_sequences_are_checked_per_element() {
  let manager = manager();
  let mixed = vec![Object::new(1u8), Object::new("2".to_string()), Object::new(3.0f64)];

  let numbers: Vec<i32> = manager.convert_value(mixed).unwrap();

  assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_option_wrapping_and_unwrapping() {
  let manager = manager();

  assert_eq!(manager.convert_value::<i32, Option<i64>>(5).unwrap(), Some(5));
  assert_eq!(manager.convert_value::<Option<i32>, String>(Some(9)).unwrap(), "9");
  assert_eq!(manager.convert_value::<Option<u8>, Option<String>>(None).unwrap(), None);
  assert_eq!(
    manager.convert_value::<Vec<Option<i32>>, Vec<Option<u16>>>(vec![Some(1), None]).unwrap(),
    vec![Some(1), None]
  );

  let err = manager.convert_value::<Option<i32>, i64>(None).unwrap_err();
  assert!(err.to_string().contains("NullableConverter"), "{err}");
}

#[test]
fn test_null_conversions() {
  let manager = manager();

  let empty: Option<String> = manager.convert_null(None).unwrap();
  assert_eq!(empty, None);

  let declared: Option<i32> = manager.convert_null(Some(&Type::of::<Option<u8>>())).unwrap();
  assert_eq!(declared, None);

  let err = manager.convert_null::<String>(None).unwrap_err();
  assert_eq!(
    err,
    ConvertError::NoConverter {
      source_type: "null".into(),
      target_type: "String".into(),
    }
  );

  let err = manager.convert_null::<String>(Some(&Type::of::<u8>())).unwrap_err();
  assert!(matches!(err, ConvertError::NullNotAllowed { .. }));
}

#[test]
fn test_opaque_values_only_pass_through() {
  let manager = manager();
  let token = Object::new(Token(9));

  let same: Object = manager.convert_object(&token).unwrap();
  assert!(same.ptr_eq(&token));
  assert_eq!(manager.convert_object::<Token>(&token).unwrap(), Token(9));

  let err = manager.convert_object::<String>(&token).unwrap_err();
  assert!(matches!(err, ConvertError::NoConverter { .. }));
}

#[test]
fn test_format_loads_from_config() {
  let format: Format = serde_yaml::from_str("decimal_separator: ','\ntrue_text: ja\n").unwrap();
  assert_eq!(format.decimal_separator, ',');
  assert_eq!(format.true_text, "ja");
  assert_eq!(format.false_text, "false");

  let json: Format = serde_json::from_str(r#"{"ignore_case": false}"#).unwrap();
  assert_eq!(json, Format::invariant().with_ignore_case(false));

  assert!(serde_json::from_str::<Format>(r#"{"culture": "de"}"#).is_err());
}

#[test]
fn test_custom_converters_extend_the_defaults() {
  #[derive(Debug, Clone, Copy)]
  struct TokenToNumber;

  impl ObjectConverter for TokenToNumber {
    fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
      Ok(10)
    }

    fn can_convert(&self, source: Option<&Type>, target: &Type, _manager: &dyn ConvertManager) -> Result<bool> {
      Ok(source.is_some_and(|s| s.is::<Token>()) && target.as_scalar().is_some())
    }

    fn convert(
      &self,
      value: Option<&Object>,
      _source: Option<&Type>,
      target: &Type,
      manager: &dyn ConvertManager,
      format: &Format,
    ) -> Result<Option<Object>> {
      let token = value
        .and_then(|v| v.downcast_ref::<Token>())
        .ok_or_else(|| ConvertError::custom("not a token"))?;
      manager.convert(Some(&Object::new(token.0)), None, target, format)
    }
  }

  let mut manager = manager();
  manager.register_converter(TokenToNumber);

  assert_eq!(manager.convert_value::<Token, String>(Token(42)).unwrap(), "42");
  assert_eq!(manager.convert_value::<Token, u8>(Token(42)).unwrap(), 42);
}
