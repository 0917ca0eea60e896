use crate::failure::AssertionFailure;

use std::any::{type_name, Any};
use std::fmt::Debug;
use std::panic::{self, UnwindSafe};
use std::sync::Arc;
use tessera_guard::IsEmpty;

/// Fluent assertions over a single failure hook.
///
/// Implementors decide what a failure means by providing
/// [`handle_failure`](AssertBase::handle_failure): [`Assert`](crate::Assert)
/// panics, [`Assume`](crate::Assume) records the check as inconclusive. Every
/// assertion returns `&Self` so checks can be chained.
pub trait AssertBase {
  /// Called once for every failed assertion.
  fn handle_failure(&self, failure: AssertionFailure);

  /// A message attached to failures that do not carry their own.
  fn message(&self) -> Option<&str> {
    None
  }

  fn is_true(&self, condition: bool) -> &Self {
    if !condition {
      report(self, AssertionFailure::new("is_true").with_expected(true).with_actual(false));
    }
    self
  }

  fn is_false(&self, condition: bool) -> &Self {
    if condition {
      report(self, AssertionFailure::new("is_false").with_expected(false).with_actual(true));
    }
    self
  }

  fn is_none<T: Debug>(&self, value: &Option<T>) -> &Self {
    if value.is_some() {
      report(self, AssertionFailure::new("is_none").with_expected_text("None").with_actual(value));
    }
    self
  }

  fn is_some<T: Debug>(&self, value: &Option<T>) -> &Self {
    if value.is_none() {
      report(self, AssertionFailure::new("is_some").with_expected_text("Some(_)").with_actual_text("None"));
    }
    self
  }

  fn are_equal<E, A>(&self, expected: E, actual: A) -> &Self
  where
    E: Debug,
    A: PartialEq<E> + Debug,
  {
    if actual != expected {
      let failure = AssertionFailure::new("are_equal").with_expected(&expected).with_actual(&actual);
      #[cfg(feature = "diff")]
      let failure = failure.with_details(pretty_assertions::Comparison::new(&expected, &actual).to_string());
      report(self, failure);
    }
    self
  }

  fn are_not_equal<E, A>(&self, unexpected: E, actual: A) -> &Self
  where
    E: Debug,
    A: PartialEq<E> + Debug,
  {
    if actual == unexpected {
      report(
        self,
        AssertionFailure::new("are_not_equal")
          .with_expected_text(format!("any value but {unexpected:?}"))
          .with_actual(&actual),
      );
    }
    self
  }

  /// Passes when both handles point at the same allocation.
  fn are_same<T: ?Sized>(&self, expected: &Arc<T>, actual: &Arc<T>) -> &Self {
    if !Arc::ptr_eq(expected, actual) {
      report(
        self,
        AssertionFailure::new("are_same")
          .with_expected_text(format!("{:p}", Arc::as_ptr(expected)))
          .with_actual_text(format!("{:p}", Arc::as_ptr(actual))),
      );
    }
    self
  }

  fn are_not_same<T: ?Sized>(&self, unexpected: &Arc<T>, actual: &Arc<T>) -> &Self {
    if Arc::ptr_eq(unexpected, actual) {
      report(
        self,
        AssertionFailure::new("are_not_same")
          .with_expected_text("a different instance")
          .with_actual_text(format!("{:p}", Arc::as_ptr(actual))),
      );
    }
    self
  }

  fn is_instance_of<T: Any>(&self, value: &dyn Any) -> &Self {
    if !value.is::<T>() {
      report(
        self,
        AssertionFailure::new("is_instance_of")
          .with_expected_text(type_name::<T>())
          .with_actual_text("a value of another type"),
      );
    }
    self
  }

  fn contains<T: PartialEq + Debug>(&self, items: &[T], item: &T) -> &Self {
    if !items.contains(item) {
      report(
        self,
        AssertionFailure::new("contains")
          .with_expected_text(format!("a collection containing {item:?}"))
          .with_actual(items),
      );
    }
    self
  }

  fn contains_str(&self, text: &str, fragment: &str) -> &Self {
    if !text.contains(fragment) {
      report(
        self,
        AssertionFailure::new("contains_str")
          .with_expected_text(format!("text containing {fragment:?}"))
          .with_actual(text),
      );
    }
    self
  }

  fn is_empty<C: IsEmpty + Debug + ?Sized>(&self, value: &C) -> &Self {
    if !value.is_empty_value() {
      report(self, AssertionFailure::new("is_empty").with_expected_text("empty").with_actual(value));
    }
    self
  }

  fn is_not_empty<C: IsEmpty + Debug + ?Sized>(&self, value: &C) -> &Self {
    if value.is_empty_value() {
      report(self, AssertionFailure::new("is_not_empty").with_expected_text("not empty").with_actual(value));
    }
    self
  }

  /// Passes when `action` returns an error.
  fn throws<T: Debug, E>(&self, action: impl FnOnce() -> Result<T, E>) -> &Self {
    self.throws_error(action);
    self
  }

  /// Like [`throws`](AssertBase::throws), handing the error back for
  /// further checks. Returns `None` when the action succeeded.
  fn throws_error<T: Debug, E>(&self, action: impl FnOnce() -> Result<T, E>) -> Option<E> {
    match action() {
      Ok(value) => {
        report(
          self,
          AssertionFailure::new("throws")
            .with_expected_text("an error")
            .with_actual_text(format!("Ok({value:?})")),
        );
        None
      }
      Err(err) => Some(err),
    }
  }

  /// Passes when `action` returns an error accepted by `predicate`.
  fn throws_matching<T: Debug, E: Debug>(
    &self,
    action: impl FnOnce() -> Result<T, E>,
    predicate: impl FnOnce(&E) -> bool,
  ) -> &Self {
    let actual = match action() {
      Ok(value) => format!("Ok({value:?})"),
      Err(err) => {
        if predicate(&err) {
          return self;
        }
        format!("Err({err:?})")
      }
    };
    report(
      self,
      AssertionFailure::new("throws_matching")
        .with_expected_text("a matching error")
        .with_actual_text(actual),
    )
  }

  fn does_not_throw<T, E: Debug>(&self, action: impl FnOnce() -> Result<T, E>) -> &Self {
    if let Err(err) = action() {
      report(
        self,
        AssertionFailure::new("does_not_throw")
          .with_expected_text("Ok(_)")
          .with_actual_text(format!("Err({err:?})")),
      );
    }
    self
  }

  /// Passes when `action` panics. The panic is caught and discarded.
  fn panics(&self, action: impl FnOnce() + UnwindSafe) -> &Self {
    if panic::catch_unwind(action).is_ok() {
      report(
        self,
        AssertionFailure::new("panics")
          .with_expected_text("a panic")
          .with_actual_text("returned normally"),
      );
    }
    self
  }

  /// Fails unconditionally.
  fn fail(&self, message: &str) -> &Self {
    report(self, AssertionFailure::new("fail").with_message(Some(message)))
  }
}

fn report<'a, A: AssertBase + ?Sized>(assert: &'a A, failure: AssertionFailure) -> &'a A {
  let failure = match failure.message() {
    Some(_) => failure,
    None => failure.with_message(assert.message()),
  };
  assert.handle_failure(failure);
  assert
}
