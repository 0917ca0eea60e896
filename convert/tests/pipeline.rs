mod common;

use common::{init_tracing, CallLog, ScriptedConverter};
use pretty_assertions::assert_eq;
use tessera_convert::*;

fn text(value: &str) -> Object {
  Object::new(value.to_string())
}

fn produced_text(result: Result<Option<Object>>) -> String {
  result
    .unwrap()
    .expect("conversion produced null")
    .downcast::<String>()
    .unwrap()
}

#[test]
fn test_identity_only_returns_value_unchanged() {
  // Arrange
  let mut manager = ObjectConvertManager::new();
  manager.register_converter(IdentityConverter::new());
  let value = text("abc");

  // Act
  let result = manager
    .convert(Some(&value), None, &Type::any(), &Format::invariant())
    .unwrap()
    .unwrap();

  // Assert
  assert!(result.ptr_eq(&value));
  assert_eq!(result.downcast_ref::<String>().map(String::as_str), Some("abc"));
}

#[test]
fn test_higher_priority_wins_and_lower_is_never_called() {
  init_tracing();
  let log = CallLog::default();
  let mut manager = ObjectConvertManager::new();
  manager
    .register_converter(ScriptedConverter::producing("low", 1, text("from low"), &log))
    .register_converter(ScriptedConverter::producing("high", 5, text("from high"), &log));

  let result = manager.convert(Some(&Object::new(1i32)), None, &Type::of::<String>(), &Format::invariant());

  assert_eq!(produced_text(result), "from high");
  assert_eq!(log.conversions(), vec!["high:convert(true)"]);
}

#[test]
fn test_ties_keep_registration_order() {
  let log = CallLog::default();
  let mut manager = ObjectConvertManager::new();
  manager
    .register_converter(ScriptedConverter::producing("first", 0, text("first"), &log))
    .register_converter(ScriptedConverter::producing("second", 0, text("second"), &log));

  let result = manager.convert(Some(&Object::new(1i32)), None, &Type::of::<String>(), &Format::invariant());

  assert_eq!(produced_text(result), "first");
}

#[test]
fn test_failed_candidate_falls_back_to_next() {
  init_tracing();
  let log = CallLog::default();
  let mut manager = ObjectConvertManager::new();
  manager
    .register_converter(ScriptedConverter::producing("fallback", 1, text("fallback"), &log))
    .register_converter(ScriptedConverter::failing("preferred", 10, "boom", &log));

  let result = manager.convert(Some(&Object::new(7u8)), None, &Type::of::<String>(), &Format::invariant());

  assert_eq!(produced_text(result), "fallback");
  assert_eq!(
    log.conversions(),
    vec!["preferred:convert(true)", "fallback:convert(true)"]
  );
}

#[test]
fn test_all_failures_are_aggregated_in_order() {
  let log = CallLog::default();
  let mut manager = ObjectConvertManager::new();
  manager
    .register_converter(ScriptedConverter::failing("a", 1, "first problem", &log))
    .register_converter(ScriptedConverter::failing("b", 2, "second problem", &log));

  let err = manager
    .convert(Some(&Object::new(1i32)), None, &Type::of::<String>(), &Format::invariant())
    .unwrap_err();

  assert_eq!(
    err,
    ConvertError::AllFailed {
      source_type: "i32".into(),
      target_type: "String".into(),
      failures: vec!["b: second problem".into(), "a: first problem".into()],
    }
  );
  assert_eq!(
    err.to_string(),
    "All converters failed to convert from 'i32' to 'String':\nb: second problem\na: first problem"
  );
}

#[test]
fn test_no_candidates_reports_both_types() {
  let mut manager = ObjectConvertManager::new();
  manager.register_converter(ConvertibleConverter::new());

  let err = manager
    .convert(Some(&Object::new(vec![1u8])), None, &Type::of::<bool>(), &Format::invariant())
    .unwrap_err();

  assert_eq!(
    err,
    ConvertError::NoConverter {
      source_type: "Vec<u8>".into(),
      target_type: "bool".into(),
    }
  );
}

#[test]
fn test_null_with_non_nullable_source_fails_before_any_converter() {
  let log = CallLog::default();
  let mut manager = ObjectConvertManager::new();
  manager.register_converter(ScriptedConverter::producing("any", 0, text("x"), &log));

  let err = manager
    .convert(None, Some(&Type::of::<i32>()), &Type::of::<String>(), &Format::invariant())
    .unwrap_err();

  assert_eq!(
    err,
    ConvertError::NullNotAllowed {
      source_type: "i32".into()
    }
  );
  assert!(log.entries().is_empty(), "no converter may be consulted");
}

#[test]
fn test_declared_source_must_accept_runtime_type() {
  let mut manager = ObjectConvertManager::new();
  manager.register_converter(IdentityConverter::new());

  let err = manager
    .convert(
      Some(&Object::new(1u32)),
      Some(&Type::of::<String>()),
      &Type::any(),
      &Format::invariant(),
    )
    .unwrap_err();
  assert!(matches!(err, ConvertError::SourceTypeMismatch { .. }));

  // The universal type accepts anything as a declared source.
  let ok = manager.convert(
    Some(&Object::new(1u32)),
    Some(&Type::any()),
    &Type::any(),
    &Format::invariant(),
  );
  assert!(ok.unwrap().is_some());
}

#[test]
fn test_null_probe_passes_no_source_type_to_null_only_converters() {
  let log = CallLog::default();
  let mut null_only = ScriptedConverter::producing("null-only", 0, text("from null"), &log);
  null_only.applicable = Ok(false);
  null_only.null_applicable = true;

  let mut manager = ObjectConvertManager::new();
  manager.register_converter(null_only);

  let result = manager.convert(
    None,
    Some(&Type::of::<Option<i32>>()),
    &Type::of::<String>(),
    &Format::invariant(),
  );

  assert_eq!(produced_text(result), "from null");
  assert_eq!(
    log.entries(),
    vec![
      "null-only:can_convert(true)",
      "null-only:can_convert(false)",
      "null-only:convert(false)",
    ]
  );
}

#[test]
fn test_null_probe_only_happens_for_null_values() {
  let log = CallLog::default();
  let mut null_only = ScriptedConverter::producing("null-only", 0, text("x"), &log);
  null_only.applicable = Ok(false);
  null_only.null_applicable = true;

  let mut manager = ObjectConvertManager::new();
  manager.register_converter(null_only);

  let err = manager
    .convert(Some(&Object::new(3i32)), None, &Type::of::<String>(), &Format::invariant())
    .unwrap_err();

  assert!(matches!(err, ConvertError::NoConverter { .. }));
  assert_eq!(log.entries(), vec!["null-only:can_convert(true)"]);
}

#[test]
fn test_misbehaving_probes_degrade_gracefully() {
  let log = CallLog::default();

  let mut broken_probe = ScriptedConverter::producing("broken-probe", 100, text("never"), &log);
  broken_probe.applicable = Err(ConvertError::custom("probe exploded"));

  let mut broken_priority = ScriptedConverter::producing("broken-priority", 0, text("last"), &log);
  broken_priority.priority = Err(ConvertError::custom("priority exploded"));

  let mut manager = ObjectConvertManager::new();
  manager
    .register_converter(broken_probe)
    .register_converter(broken_priority)
    .register_converter(ScriptedConverter::failing("fragile", -5, "nope", &log));

  let result = manager.convert(Some(&Object::new(1i32)), None, &Type::of::<String>(), &Format::invariant());

  assert_eq!(produced_text(result), "last");
  assert_eq!(
    log.conversions(),
    vec!["fragile:convert(true)", "broken-priority:convert(true)"]
  );
  assert!(!manager.converters().is_empty());
}

#[test]
fn test_can_convert_requires_one_claim() {
  let mut manager = ObjectConvertManager::new();
  assert!(!manager.can_convert(Some(&Type::of::<i32>()), &Type::of::<i64>()));

  manager.register_converter(ConvertibleConverter::new());
  assert!(manager.can_convert(Some(&Type::of::<i32>()), &Type::of::<i64>()));
  assert!(manager.can_convert_types::<String, f32>());
  assert!(!manager.can_convert_types::<Vec<i32>, i64>());
}

#[test]
fn test_default_converter_names() {
  assert_eq!(IdentityConverter::new().name(), "IdentityConverter");
  assert_eq!(EnumerableConverter::new().name(), "EnumerableConverter");
}
