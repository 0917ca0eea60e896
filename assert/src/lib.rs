//! # Tessera Assert
//!
//! Fluent assertions that produce structured [`AssertionFailure`]s and hand
//! them to a pluggable failure hook.
//!
//! - [`Assert`] panics on the first failure, for hard test expectations.
//! - [`Assume`] records failures and marks the run inconclusive.
//! - Custom behavior is one [`AssertBase::handle_failure`] implementation away.
//!
//! With the `diff` feature, `are_equal` failures include a line diff of the
//! two values.
//!
//! ```
//! use tessera_assert::{Assert, AssertBase};
//!
//! let parsed: Result<u8, _> = "300".parse::<u8>();
//!
//! Assert::with_message("parsing")
//!   .throws(|| parsed.clone())
//!   .contains_str("tessera-assert", "assert")
//!   .are_equal(vec![1, 2], vec![1, 2]);
//! ```

mod assert;
mod assume;
mod base;
mod failure;

pub use assert::Assert;
pub use assume::Assume;
pub use base::AssertBase;
pub use failure::AssertionFailure;
