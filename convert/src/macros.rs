//! Macros for registering user types with the runtime type registry.

/// Registers a fieldless enum so it can take part in conversions.
///
/// The enum must be `Clone + Send + Sync + 'static`, and every variant must be
/// listed.
///
/// # Examples
///
/// ```
/// use tessera_convert::{reflect_enum, ConvertManagerExt, DefaultObjectConvertManager};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Level {
///   Low = 1,
///   High = 10,
/// }
///
/// reflect_enum!(Level { Low, High });
///
/// let manager = DefaultObjectConvertManager::new();
/// let level: Level = manager.convert_value("high".to_string()).unwrap();
/// assert_eq!(level, Level::High);
/// let code: i32 = manager.convert_value(Level::High).unwrap();
/// assert_eq!(code, 10);
/// ```
#[macro_export]
macro_rules! reflect_enum {
  ($ty:ident { $($variant:ident),+ $(,)? }) => {
    impl $crate::EnumValue for $ty {
      const VARIANTS: &'static [(&'static str, i64)] =
        &[$((stringify!($variant), $ty::$variant as i64)),+];

      fn discriminant(&self) -> i64 {
        match self {
          $($ty::$variant => $ty::$variant as i64,)+
        }
      }

      fn from_discriminant(value: i64) -> Option<Self> {
        $(
          if value == $ty::$variant as i64 {
            return Some($ty::$variant);
          }
        )+
        None
      }
    }

    impl $crate::Reflect for $ty {
      fn type_of() -> $crate::Type {
        $crate::Type::enumeration::<$ty>()
      }
    }
  };
}

/// Registers a type with no conversion capabilities of its own.
///
/// Opaque values still pass through identity conversions, and with the
/// `display` flag they can be rendered as strings.
///
/// ```
/// use tessera_convert::{reflect_opaque, ConvertManagerExt, DefaultObjectConvertManager};
///
/// #[derive(Clone)]
/// struct Point(i32, i32);
///
/// impl std::fmt::Display for Point {
///   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///     write!(f, "({}, {})", self.0, self.1)
///   }
/// }
///
/// reflect_opaque!(Point, display);
///
/// let manager = DefaultObjectConvertManager::new();
/// let text: String = manager.convert_value(Point(1, 2)).unwrap();
/// assert_eq!(text, "(1, 2)");
/// ```
#[macro_export]
macro_rules! reflect_opaque {
  ($ty:ty, display) => {
    impl $crate::Reflect for $ty {
      fn type_of() -> $crate::Type {
        $crate::Type::opaque_display::<$ty>()
      }
    }
  };

  ($ty:ty) => {
    impl $crate::Reflect for $ty {
      fn type_of() -> $crate::Type {
        $crate::Type::opaque::<$ty>()
      }
    }
  };
}
