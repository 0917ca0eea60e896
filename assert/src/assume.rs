use crate::base::AssertBase;
use crate::failure::AssertionFailure;

use parking_lot::Mutex;

/// Soft assertions: failures mark the check as inconclusive instead of
/// failing it.
///
/// Each failure is logged at `warn` level and kept, so the caller can decide
/// afterwards whether the outcome is meaningful.
///
/// ```
/// use tessera_assert::{AssertBase, Assume};
///
/// let assume = Assume::new();
/// assume.is_some(&std::env::var_os("TESSERA_SURELY_UNSET")).is_true(true);
///
/// assert!(assume.is_inconclusive());
/// assert_eq!(assume.failures()[0].assertion(), "is_some");
/// ```
#[derive(Debug, Default)]
pub struct Assume {
  message: Option<String>,
  failures: Mutex<Vec<AssertionFailure>>,
}

impl Assume {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_message(message: impl Into<String>) -> Self {
    Self {
      message: Some(message.into()),
      ..Self::default()
    }
  }

  /// Whether any assumption failed so far.
  pub fn is_inconclusive(&self) -> bool {
    !self.failures.lock().is_empty()
  }

  /// A copy of the recorded failures, oldest first.
  pub fn failures(&self) -> Vec<AssertionFailure> {
    self.failures.lock().clone()
  }

  pub fn into_failures(self) -> Vec<AssertionFailure> {
    self.failures.into_inner()
  }
}

impl AssertBase for Assume {
  fn handle_failure(&self, failure: AssertionFailure) {
    tracing::warn!(assertion = failure.assertion(), "inconclusive: {failure}");
    self.failures.lock().push(failure);
  }

  fn message(&self) -> Option<&str> {
    self.message.as_deref()
  }
}
