use std::error::Error;
use std::fmt;

/// A failed assertion, with enough context to explain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
  assertion: &'static str,
  message: Option<String>,
  expected: Option<String>,
  actual: Option<String>,
  details: Option<String>,
}

impl AssertionFailure {
  pub fn new(assertion: &'static str) -> Self {
    Self {
      assertion,
      message: None,
      expected: None,
      actual: None,
      details: None,
    }
  }

  pub fn with_message(mut self, message: Option<&str>) -> Self {
    self.message = message.map(str::to_owned);
    self
  }

  pub fn with_expected(mut self, expected: impl fmt::Debug) -> Self {
    self.expected = Some(format!("{expected:?}"));
    self
  }

  pub fn with_actual(mut self, actual: impl fmt::Debug) -> Self {
    self.actual = Some(format!("{actual:?}"));
    self
  }

  /// Like [`with_expected`](Self::with_expected) but taken verbatim.
  pub fn with_expected_text(mut self, expected: impl Into<String>) -> Self {
    self.expected = Some(expected.into());
    self
  }

  pub fn with_actual_text(mut self, actual: impl Into<String>) -> Self {
    self.actual = Some(actual.into());
    self
  }

  /// Free-form text rendered below the expected and actual lines.
  pub fn with_details(mut self, details: impl Into<String>) -> Self {
    self.details = Some(details.into());
    self
  }

  /// The name of the assertion that failed, e.g. `are_equal`.
  pub fn assertion(&self) -> &'static str {
    self.assertion
  }

  pub fn message(&self) -> Option<&str> {
    self.message.as_deref()
  }

  pub fn expected(&self) -> Option<&str> {
    self.expected.as_deref()
  }

  pub fn actual(&self) -> Option<&str> {
    self.actual.as_deref()
  }

  pub fn details(&self) -> Option<&str> {
    self.details.as_deref()
  }
}

impl fmt::Display for AssertionFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Assertion '{}' failed", self.assertion)?;
    if let Some(message) = &self.message {
      write!(f, ": {message}")?;
    }
    if let Some(expected) = &self.expected {
      write!(f, "\n  expected: {expected}")?;
    }
    if let Some(actual) = &self.actual {
      write!(f, "\n    actual: {actual}")?;
    }
    if let Some(details) = &self.details {
      write!(f, "\n{details}")?;
    }
    Ok(())
  }
}

impl Error for AssertionFailure {}
