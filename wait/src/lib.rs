//! # Tessera Wait
//!
//! Polls a condition until it holds, with a configurable timeout, check limit
//! and tolerance for failing checks.
//!
//! ```
//! use std::time::Duration;
//! use tessera_wait::{WaitOptions, Waiter};
//!
//! let waiter = Waiter::new(
//!   WaitOptions::default()
//!     .with_interval(Duration::from_millis(1))
//!     .with_max_errors(2),
//! )
//! .unwrap();
//!
//! // The check fails twice, reports "not yet" once, then succeeds.
//! let mut attempts = 0;
//! let value = waiter
//!   .wait_for(|_state| {
//!     attempts += 1;
//!     match attempts {
//!       1 | 2 => Err("connection refused"),
//!       3 => Ok(None),
//!       _ => Ok(Some(attempts)),
//!     }
//!   })
//!   .unwrap();
//! assert_eq!(value, 4);
//! ```

pub mod error;
mod options;
mod state;
mod waiter;

pub use error::{FailureReason, Result, WaitError};
pub use options::WaitOptions;
pub use state::WaitingState;
pub use waiter::Waiter;
