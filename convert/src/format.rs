#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Culture-style formatting rules consulted by format-aware converters.
///
/// Plain `Display` based conversions ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Format {
  pub decimal_separator: char,
  pub true_text: String,
  pub false_text: String,
  /// Whether enum names and boolean texts are matched case-insensitively.
  pub ignore_case: bool,
}

impl Format {
  /// Culture-neutral rules: `.` as decimal separator, `true` / `false`.
  pub fn invariant() -> Self {
    Self {
      decimal_separator: '.',
      true_text: "true".to_string(),
      false_text: "false".to_string(),
      ignore_case: true,
    }
  }

  pub fn with_decimal_separator(mut self, separator: char) -> Self {
    self.decimal_separator = separator;
    self
  }

  pub fn with_bool_texts(mut self, true_text: impl Into<String>, false_text: impl Into<String>) -> Self {
    self.true_text = true_text.into();
    self.false_text = false_text.into();
    self
  }

  pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
    self.ignore_case = ignore_case;
    self
  }

  pub(crate) fn text_matches(&self, expected: &str, input: &str) -> bool {
    if self.ignore_case {
      expected.eq_ignore_ascii_case(input)
    } else {
      expected == input
    }
  }
}

impl Default for Format {
  fn default() -> Self {
    Self::invariant()
  }
}
