use std::time::Duration;
use tessera_guard::GuardError;
use thiserror::Error;

/// Why a wait gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
  #[error("timed out after {}", render_duration(.timeout))]
  Timeout { timeout: Duration },

  #[error("condition not met within {max_checks} check(s)")]
  CheckLimitExceeded { max_checks: u32 },

  #[error("check failed {errors} time(s), more than the {max_errors} tolerated{}", last_error_suffix(.last_error))]
  TooManyErrors {
    errors: u32,
    max_errors: u32,
    last_error: Option<String>,
  },

  #[error("cancelled{}", cancel_suffix(.reason))]
  Cancelled { reason: Option<String> },
}

fn render_duration(duration: &Duration) -> humantime::FormattedDuration {
  humantime::format_duration(*duration)
}

fn last_error_suffix(last_error: &Option<String>) -> String {
  last_error
    .as_ref()
    .map(|error| format!("; last error: {error}"))
    .unwrap_or_default()
}

fn cancel_suffix(reason: &Option<String>) -> String {
  reason.as_ref().map(|reason| format!(": {reason}")).unwrap_or_default()
}

/// Errors returned by [`Waiter`](crate::Waiter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
  #[error("Invalid wait options: {0}")]
  InvalidOptions(#[from] GuardError),

  #[error("Wait failed after {checks} check(s): {reason}")]
  Failed { reason: FailureReason, checks: u32 },
}

impl WaitError {
  /// The reason the wait failed, if it ran at all.
  pub fn reason(&self) -> Option<&FailureReason> {
    match self {
      WaitError::Failed { reason, .. } => Some(reason),
      WaitError::InvalidOptions(_) => None,
    }
  }

  /// How many times the check ran before the wait gave up.
  pub fn checks(&self) -> Option<u32> {
    match self {
      WaitError::Failed { checks, .. } => Some(*checks),
      WaitError::InvalidOptions(_) => None,
    }
  }
}

/// A specialized `Result` type for wait operations.
pub type Result<T, E = WaitError> = std::result::Result<T, E>;
