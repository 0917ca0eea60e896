use crate::error::{FailureReason, Result, WaitError};
use crate::options::WaitOptions;
use crate::state::WaitingState;

use std::fmt::Display;
use std::thread;

/// Polls a check until it succeeds or the configured policy gives up.
///
/// Each iteration runs the check, then tests the stop conditions in a fixed
/// order: too many errors, cancellation, check limit, timeout. If none
/// applies, the waiter sleeps for the interval (never past the deadline) and
/// tries again.
#[derive(Debug, Clone, Default)]
pub struct Waiter {
  options: WaitOptions,
}

impl Waiter {
  /// Creates a waiter, rejecting options that could never make progress.
  pub fn new(options: WaitOptions) -> Result<Self> {
    options.validate()?;
    Ok(Self { options })
  }

  pub fn options(&self) -> &WaitOptions {
    &self.options
  }

  /// Runs `check` until it yields a value.
  ///
  /// `Ok(None)` means "not yet"; an `Err` counts against `max_errors`. When the
  /// wait fails and `throw_on_failure` is off, `T::default()` is returned and
  /// the failure is logged instead.
  pub fn wait_for<T, E, F>(&self, mut check: F) -> Result<T>
  where
    T: Default,
    E: Display,
    F: FnMut(&mut WaitingState) -> Result<Option<T>, E>,
  {
    let options = &self.options;
    let mut state = WaitingState::start();

    loop {
      state.begin_check();
      match check(&mut state) {
        Ok(Some(value)) => {
          tracing::debug!(checks = state.checks(), "wait condition met");
          return Ok(value);
        }
        Ok(None) => {}
        Err(err) => {
          let message = err.to_string();
          tracing::trace!(checks = state.checks(), error = %message, "wait check failed");
          state.record_error(message);
          if let Some(max_errors) = options.max_errors {
            if state.errors() > max_errors {
              let reason = FailureReason::TooManyErrors {
                errors: state.errors(),
                max_errors,
                last_error: state.last_error().map(str::to_owned),
              };
              return self.fail(reason, &state);
            }
          }
        }
      }

      if let Some(reason) = state.take_cancellation() {
        return self.fail(FailureReason::Cancelled { reason }, &state);
      }

      if let Some(max_checks) = options.max_checks {
        if state.checks() >= max_checks {
          return self.fail(FailureReason::CheckLimitExceeded { max_checks }, &state);
        }
      }

      let pause = match options.timeout {
        Some(timeout) => {
          let elapsed = state.elapsed();
          if elapsed >= timeout {
            return self.fail(FailureReason::Timeout { timeout }, &state);
          }
          options.interval.min(timeout - elapsed)
        }
        None => options.interval,
      };
      thread::sleep(pause);
    }
  }

  /// Runs `check` until it returns `true`.
  ///
  /// Returns `Ok(false)` when the wait fails and `throw_on_failure` is off.
  pub fn wait_until<E, F>(&self, mut check: F) -> Result<bool>
  where
    E: Display,
    F: FnMut(&mut WaitingState) -> Result<bool, E>,
  {
    self.wait_for(|state| check(state).map(|done| done.then_some(true)))
  }

  fn fail<T: Default>(&self, reason: FailureReason, state: &WaitingState) -> Result<T> {
    let checks = state.checks();
    if self.options.throw_on_failure {
      return Err(WaitError::Failed { reason, checks });
    }
    tracing::warn!(
      checks,
      elapsed = ?state.elapsed(),
      %reason,
      "wait failed, returning the default value"
    );
    Ok(T::default())
  }
}
