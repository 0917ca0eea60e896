use std::time::{Duration, Instant};

/// Progress of a running wait, handed to the check on every iteration.
///
/// The check can inspect how far the wait has come and stop it early with
/// [`cancel`](WaitingState::cancel).
#[derive(Debug)]
pub struct WaitingState {
  started: Instant,
  checks: u32,
  errors: u32,
  last_error: Option<String>,
  cancellation: Option<Option<String>>,
}

impl WaitingState {
  pub(crate) fn start() -> Self {
    Self {
      started: Instant::now(),
      checks: 0,
      errors: 0,
      last_error: None,
      cancellation: None,
    }
  }

  /// The number of checks run so far, including the one in progress.
  pub fn checks(&self) -> u32 {
    self.checks
  }

  /// How many checks have failed with an error.
  pub fn errors(&self) -> u32 {
    self.errors
  }

  pub fn elapsed(&self) -> Duration {
    self.started.elapsed()
  }

  /// The message of the most recent failing check.
  pub fn last_error(&self) -> Option<&str> {
    self.last_error.as_deref()
  }

  /// Stops the wait once the current check returns.
  pub fn cancel(&mut self) {
    self.cancellation = Some(None);
  }

  /// Stops the wait once the current check returns, recording why.
  pub fn cancel_with_reason(&mut self, reason: impl Into<String>) {
    self.cancellation = Some(Some(reason.into()));
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancellation.is_some()
  }

  pub(crate) fn begin_check(&mut self) {
    self.checks = self.checks.saturating_add(1);
  }

  pub(crate) fn record_error(&mut self, message: String) {
    self.errors = self.errors.saturating_add(1);
    self.last_error = Some(message);
  }

  pub(crate) fn take_cancellation(&mut self) -> Option<Option<String>> {
    self.cancellation.take()
  }
}
