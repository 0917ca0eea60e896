use crate::base::AssertBase;
use crate::failure::AssertionFailure;

/// Hard assertions: every failure panics with the rendered failure.
///
/// ```should_panic
/// use tessera_assert::{Assert, AssertBase};
///
/// Assert::new().are_equal(4, 2 + 2).is_true(1 > 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assert {
  message: Option<String>,
}

impl Assert {
  pub fn new() -> Self {
    Self::default()
  }

  /// Attaches `message` to every failure raised through this instance.
  pub fn with_message(message: impl Into<String>) -> Self {
    Self {
      message: Some(message.into()),
    }
  }
}

impl AssertBase for Assert {
  fn handle_failure(&self, failure: AssertionFailure) {
    panic!("{failure}");
  }

  fn message(&self) -> Option<&str> {
    self.message.as_deref()
  }
}
