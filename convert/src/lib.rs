//! # Tessera Convert
//!
//! A pluggable object conversion pipeline.
//!
//! Several [`ObjectConverter`]s can compete for the same conversion. The
//! [`ObjectConvertManager`] collects the converters that claim a
//! `(source type, target type)` pair, orders them by priority (highest first,
//! registration order on ties), and returns the first result that succeeds. A
//! converter that fails hands over to the next one; only when every candidate
//! has failed does the caller see an error listing each attempt.
//!
//! ## Runtime types
//!
//! Conversions are decided at runtime, so values travel as type-erased
//! [`Object`]s tagged with a [`Type`] descriptor. [`Reflect`] produces those
//! descriptors for scalars, `String`, `Vec<T>` and `Option<T>`; register your
//! own enums with [`reflect_enum!`] and other types with [`reflect_opaque!`].
//! Null is `None` wherever an `Option<&Object>` is taken or returned.
//!
//! ## Quick Start
//!
//! ```
//! use tessera_convert::{ConvertManagerExt, DefaultObjectConvertManager};
//!
//! let manager = DefaultObjectConvertManager::new();
//!
//! let n: u8 = manager.convert_value("42".to_string()).unwrap();
//! assert_eq!(n, 42);
//!
//! let widened: Vec<Option<i64>> = manager.convert_value(vec![1i32, 2, 3]).unwrap();
//! assert_eq!(widened, vec![Some(1), Some(2), Some(3)]);
//!
//! assert!(manager.convert_value::<i32, u8>(300).is_err());
//! ```

pub mod converters;
pub mod error;

mod converter;
mod default;
mod format;
mod macros;
mod manager;
mod scalar;
mod types;

pub use converter::ObjectConverter;
pub use converters::{
  ConvertibleConverter, EnumConverter, EnumerableConverter, IdentityConverter, NullConverter,
  NullableConverter, ToStringConverter,
};
pub use default::{DefaultObjectConvertManager, IDENTITY_PRIORITY, NULL_PRIORITY, TO_STRING_PRIORITY};
pub use error::{ConvertError, Result};
pub use format::Format;
pub use manager::{ConvertManager, ConvertManagerExt, ObjectConvertManager};
pub use scalar::{Scalar, ScalarKind, ScalarValue};
pub use types::{
  EnumInfo, EnumValue, Object, OptionalInfo, Reflect, ScalarInfo, SequenceInfo, Type, TypeKind,
};
