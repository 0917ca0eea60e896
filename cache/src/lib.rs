//! A small, thread-safe runtime cache for values of any type.
//!
//! # Features
//! - **Heterogeneous**: One cache holds values of different types under string keys.
//! - **Typed reads**: Values are read back as a concrete type, falling back to
//!   `Default` when the key is missing or holds something else.
//! - **Disposal**: Removed and replaced values are reported to an optional
//!   [`RemovalListener`] and dropped outside the cache lock.
//! - **Async population**: With the `tokio` feature, misses can be filled by an
//!   async factory; populations are serialized across all keys.
//!
//! ```
//! use tessera_cache::Cache;
//!
//! let cache = Cache::new();
//! cache.set_value("answer", 42u32).unwrap();
//!
//! assert_eq!(cache.get_value::<u32>("answer"), 42);
//! assert_eq!(cache.get_value::<u32>("missing"), 0);
//! assert_eq!(cache.try_get_value::<String>("answer"), None);
//! ```

mod cache;
pub mod error;
pub mod listener;

pub use cache::Cache;
pub use error::{CacheError, Result};
pub use listener::{RemovalListener, RemovalReason};
