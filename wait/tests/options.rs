use pretty_assertions::assert_eq;
use std::time::Duration;
use tessera_wait::{WaitOptions, Waiter};

#[test]
fn test_defaults() {
  let options = WaitOptions::default();

  assert_eq!(options.timeout, Some(Duration::from_secs(30)));
  assert_eq!(options.interval, Duration::from_millis(100));
  assert_eq!(options.max_checks, None);
  assert_eq!(options.max_errors, Some(0));
  assert!(options.throw_on_failure);
  assert_eq!(Waiter::default().options(), &options);
}

#[test]
fn test_load_from_yaml_with_human_durations() {
  let yaml = "timeout: 1m 30s\ninterval: 250ms\nmax_checks: 10\nmax_errors: ~\nthrow_on_failure: false\n";

  let options: WaitOptions = serde_yaml::from_str(yaml).unwrap();

  assert_eq!(
    options,
    WaitOptions {
      timeout: Some(Duration::from_secs(90)),
      interval: Duration::from_millis(250),
      max_checks: Some(10),
      max_errors: None,
      throw_on_failure: false,
    }
  );
}

#[test]
fn test_missing_fields_keep_defaults_and_null_timeout_disables_it() {
  let options: WaitOptions = serde_json::from_str(r#"{"timeout": null}"#).unwrap();

  assert_eq!(options, WaitOptions::default().without_timeout());
}

#[test]
fn test_serializes_durations_in_human_form() {
  let json = serde_json::to_value(WaitOptions::default()).unwrap();

  assert_eq!(json["timeout"], "30s");
  assert_eq!(json["interval"], "100ms");
}

#[test]
fn test_rejects_unknown_fields_and_bad_durations() {
  assert!(serde_json::from_str::<WaitOptions>(r#"{"retries": 3}"#).is_err());
  assert!(serde_json::from_str::<WaitOptions>(r#"{"interval": "soon"}"#).is_err());
}
