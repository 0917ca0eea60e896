#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tessera_convert::{ConvertError, ConvertManager, Format, Object, ObjectConverter, Result, Type};

/// Shared call log, so tests can observe which converters ran and in what order.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
  pub fn push(&self, entry: impl Into<String>) {
    self.0.lock().unwrap().push(entry.into());
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().unwrap().clone()
  }

  /// Only the `convert` calls, in order.
  pub fn conversions(&self) -> Vec<String> {
    self
      .entries()
      .into_iter()
      .filter(|entry| entry.contains(":convert("))
      .collect()
  }
}

/// What a scripted converter does when asked to convert.
#[derive(Clone)]
pub enum Outcome {
  Produce(Object),
  Fail(&'static str),
}

/// A converter whose every answer is scripted by the test.
#[derive(Clone)]
pub struct ScriptedConverter {
  pub label: &'static str,
  pub priority: Result<i32>,
  pub applicable: Result<bool>,
  pub null_applicable: bool,
  pub outcome: Outcome,
  pub log: CallLog,
}

impl ScriptedConverter {
  pub fn new(label: &'static str, priority: i32, outcome: Outcome, log: &CallLog) -> Self {
    Self {
      label,
      priority: Ok(priority),
      applicable: Ok(true),
      null_applicable: false,
      outcome,
      log: log.clone(),
    }
  }

  pub fn producing(label: &'static str, priority: i32, value: Object, log: &CallLog) -> Self {
    Self::new(label, priority, Outcome::Produce(value), log)
  }

  pub fn failing(label: &'static str, priority: i32, message: &'static str, log: &CallLog) -> Self {
    Self::new(label, priority, Outcome::Fail(message), log)
  }
}

impl ObjectConverter for ScriptedConverter {
  fn name(&self) -> &str {
    self.label
  }

  fn priority(&self, _source: Option<&Type>, _target: &Type) -> Result<i32> {
    self.priority.clone()
  }

  fn can_convert(&self, source: Option<&Type>, _target: &Type, _manager: &dyn ConvertManager) -> Result<bool> {
    self.log.push(format!("{}:can_convert({})", self.label, source.is_some()));
    match source {
      Some(_) => self.applicable.clone(),
      None => Ok(self.null_applicable),
    }
  }

  fn convert(
    &self,
    _value: Option<&Object>,
    source: Option<&Type>,
    _target: &Type,
    _manager: &dyn ConvertManager,
    _format: &Format,
  ) -> Result<Option<Object>> {
    self.log.push(format!("{}:convert({})", self.label, source.is_some()));
    match &self.outcome {
      Outcome::Produce(value) => Ok(Some(value.clone())),
      Outcome::Fail(message) => Err(ConvertError::custom(*message)),
    }
  }
}

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}
