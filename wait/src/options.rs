use crate::error::Result;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Controls how long and how often a [`Waiter`](crate::Waiter) polls.
///
/// Options can be loaded from configuration; durations are written in human
/// form such as `"250ms"` or `"1m 30s"`:
///
/// ```
/// use std::time::Duration;
/// use tessera_wait::WaitOptions;
///
/// let options: WaitOptions = serde_json::from_str(r#"{"timeout": "5s", "max_errors": 3}"#).unwrap();
/// assert_eq!(options.timeout, Some(Duration::from_secs(5)));
/// assert_eq!(options.interval, Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaitOptions {
  /// Total time budget. `None` waits without a deadline.
  #[serde(with = "optional_duration")]
  pub timeout: Option<Duration>,
  /// Pause between two checks.
  #[serde(with = "duration")]
  pub interval: Duration,
  /// Upper bound on the number of checks. `None` means unlimited.
  pub max_checks: Option<u32>,
  /// How many failing checks are tolerated. `None` tolerates any number.
  pub max_errors: Option<u32>,
  /// Whether a failed wait returns an error or the target's default value.
  pub throw_on_failure: bool,
}

impl Default for WaitOptions {
  fn default() -> Self {
    Self {
      timeout: Some(Duration::from_secs(30)),
      interval: Duration::from_millis(100),
      max_checks: None,
      max_errors: Some(0),
      throw_on_failure: true,
    }
  }
}

impl WaitOptions {
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  pub fn without_timeout(mut self) -> Self {
    self.timeout = None;
    self
  }

  pub fn with_interval(mut self, interval: Duration) -> Self {
    self.interval = interval;
    self
  }

  pub fn with_max_checks(mut self, max_checks: u32) -> Self {
    self.max_checks = Some(max_checks);
    self
  }

  pub fn with_max_errors(mut self, max_errors: u32) -> Self {
    self.max_errors = Some(max_errors);
    self
  }

  pub fn tolerate_all_errors(mut self) -> Self {
    self.max_errors = None;
    self
  }

  pub fn throw_on_failure(mut self, throw: bool) -> Self {
    self.throw_on_failure = throw;
    self
  }

  /// Checks that the options describe a wait that can make progress.
  pub fn validate(&self) -> Result<()> {
    tessera_guard::at_least(self.interval.as_nanos(), 1, "interval")?;
    if let Some(max_checks) = self.max_checks {
      tessera_guard::at_least(max_checks, 1, "max_checks")?;
    }
    Ok(())
  }
}

mod duration {
  use serde::{Deserialize, Deserializer, Serializer};
  use std::time::Duration;

  pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&humantime::format_duration(*value))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(&text).map_err(serde::de::Error::custom)
  }
}

mod optional_duration {
  use serde::{Deserialize, Deserializer, Serializer};
  use std::time::Duration;

  pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
      Some(value) => serializer.serialize_some(&humantime::format_duration(*value).to_string()),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    Option::<String>::deserialize(deserializer)?
      .map(|text| humantime::parse_duration(&text).map_err(serde::de::Error::custom))
      .transpose()
  }
}
