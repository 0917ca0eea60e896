//! The runtime type registry: [`Type`] descriptors, the [`Reflect`] trait that
//! produces them, and the type-erased [`Object`] they describe.

use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::scalar::{Scalar, ScalarKind, ScalarValue};

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

type DisplayFn = fn(&dyn Any) -> Option<String>;

/// A type that can describe itself to the conversion pipeline.
///
/// Implemented for all scalars, `String`, `Vec<T>`, `Option<T>` and [`Object`].
/// Use [`reflect_enum!`](crate::reflect_enum) and
/// [`reflect_opaque!`](crate::reflect_opaque) for your own types.
pub trait Reflect: Any + Clone + Send + Sync {
  fn type_of() -> Type;

  fn into_object(self) -> Object {
    Object::wrap(self, Self::type_of())
  }

  fn from_object(object: Object) -> std::result::Result<Self, Object> {
    object.downcast::<Self>()
  }

  /// The value null maps to, for nullable types.
  fn null_value() -> Option<Self> {
    None
  }
}

/// Fieldless enums registered through [`reflect_enum!`](crate::reflect_enum).
pub trait EnumValue: Reflect {
  const VARIANTS: &'static [(&'static str, i64)];

  fn discriminant(&self) -> i64;

  fn from_discriminant(value: i64) -> Option<Self>;
}

/// The shape of a [`Type`] and the capabilities that come with it.
#[derive(Clone)]
pub enum TypeKind {
  /// The universal object type. Every type is assignable to it.
  Any,
  Scalar(ScalarInfo),
  Enum(EnumInfo),
  Sequence(SequenceInfo),
  Optional(OptionalInfo),
  Opaque,
}

#[derive(Clone)]
pub struct ScalarInfo {
  kind: ScalarKind,
  to_scalar: fn(&dyn Any) -> Option<Scalar>,
  from_scalar: fn(Scalar, &Format) -> Result<Object>,
}

impl ScalarInfo {
  pub fn kind(&self) -> ScalarKind {
    self.kind
  }

  pub fn to_scalar(&self, value: &Object) -> Option<Scalar> {
    (self.to_scalar)(value.as_any())
  }

  pub fn from_scalar(&self, value: Scalar, format: &Format) -> Result<Object> {
    (self.from_scalar)(value, format)
  }
}

#[derive(Clone)]
pub struct EnumInfo {
  variants: &'static [(&'static str, i64)],
  discriminant: fn(&dyn Any) -> Option<i64>,
  from_discriminant: fn(i64) -> Option<Object>,
}

impl EnumInfo {
  pub fn variants(&self) -> &'static [(&'static str, i64)] {
    self.variants
  }

  pub fn discriminant(&self, value: &Object) -> Option<i64> {
    (self.discriminant)(value.as_any())
  }

  pub fn name_of(&self, value: &Object) -> Option<&'static str> {
    let discriminant = self.discriminant(value)?;
    self
      .variants
      .iter()
      .find(|(_, d)| *d == discriminant)
      .map(|(name, _)| *name)
  }

  pub fn from_discriminant(&self, value: i64) -> Option<Object> {
    (self.from_discriminant)(value)
  }

  pub fn from_name(&self, name: &str, ignore_case: bool) -> Option<Object> {
    let (_, discriminant) = self.variants.iter().find(|(candidate, _)| {
      if ignore_case {
        candidate.eq_ignore_ascii_case(name)
      } else {
        *candidate == name
      }
    })?;
    self.from_discriminant(*discriminant)
  }
}

#[derive(Clone)]
pub struct SequenceInfo {
  element: Type,
  split: fn(&dyn Any) -> Option<Vec<Object>>,
  collect: fn(Vec<Object>) -> Result<Object>,
}

impl SequenceInfo {
  pub fn element(&self) -> &Type {
    &self.element
  }

  pub fn split(&self, value: &Object) -> Option<Vec<Object>> {
    (self.split)(value.as_any())
  }

  pub fn collect(&self, elements: Vec<Object>) -> Result<Object> {
    (self.collect)(elements)
  }
}

#[derive(Clone)]
pub struct OptionalInfo {
  inner: Type,
  unwrap: fn(&dyn Any) -> Option<Option<Object>>,
  wrap: fn(Option<Object>) -> Result<Object>,
}

impl OptionalInfo {
  pub fn inner(&self) -> &Type {
    &self.inner
  }

  /// `None` if `value` is not of this optional type, `Some(None)` if it is empty.
  pub fn unwrap(&self, value: &Object) -> Option<Option<Object>> {
    (self.unwrap)(value.as_any())
  }

  pub fn wrap(&self, inner: Option<Object>) -> Result<Object> {
    (self.wrap)(inner)
  }
}

struct TypeInfo {
  id: TypeId,
  name: &'static str,
  kind: TypeKind,
  display: Option<DisplayFn>,
}

/// A runtime type descriptor. Cheap to clone; compares by `TypeId`.
#[derive(Clone)]
pub struct Type(Arc<TypeInfo>);

impl Type {
  /// The descriptor of any reflected type.
  pub fn of<T: Reflect>() -> Type {
    T::type_of()
  }

  /// The universal object type.
  pub fn any() -> Type {
    Type(Arc::new(TypeInfo {
      id: TypeId::of::<Object>(),
      name: "object",
      kind: TypeKind::Any,
      display: None,
    }))
  }

  pub fn scalar<T: ScalarValue + fmt::Display>() -> Type {
    Self::build::<T>(
      TypeKind::Scalar(ScalarInfo {
        kind: T::KIND,
        to_scalar: erased_to_scalar::<T>,
        from_scalar: erased_from_scalar::<T>,
      }),
      Some(erased_display::<T>),
    )
  }

  pub fn enumeration<T: EnumValue>() -> Type {
    Self::build::<T>(
      TypeKind::Enum(EnumInfo {
        variants: T::VARIANTS,
        discriminant: erased_discriminant::<T>,
        from_discriminant: erased_from_discriminant::<T>,
      }),
      None,
    )
  }

  pub fn sequence<T: Reflect>() -> Type {
    Self::build::<Vec<T>>(
      TypeKind::Sequence(SequenceInfo {
        element: T::type_of(),
        split: erased_split::<T>,
        collect: erased_collect::<T>,
      }),
      None,
    )
  }

  pub fn optional<T: Reflect>() -> Type {
    Self::build::<Option<T>>(
      TypeKind::Optional(OptionalInfo {
        inner: T::type_of(),
        unwrap: erased_unwrap::<T>,
        wrap: erased_wrap::<T>,
      }),
      None,
    )
  }

  /// A type with no conversion capabilities of its own.
  pub fn opaque<T: Reflect>() -> Type {
    Self::build::<T>(TypeKind::Opaque, None)
  }

  /// An opaque type that can still be rendered as a string.
  pub fn opaque_display<T: Reflect + fmt::Display>() -> Type {
    Self::build::<T>(TypeKind::Opaque, Some(erased_display::<T>))
  }

  fn build<T: Any>(kind: TypeKind, display: Option<DisplayFn>) -> Type {
    Type(Arc::new(TypeInfo {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
      kind,
      display,
    }))
  }

  pub fn id(&self) -> TypeId {
    self.0.id
  }

  /// The fully qualified Rust type name.
  pub fn name(&self) -> &'static str {
    self.0.name
  }

  pub fn kind(&self) -> &TypeKind {
    &self.0.kind
  }

  pub fn is<T: Any>(&self) -> bool {
    self.0.id == TypeId::of::<T>()
  }

  pub fn is_any(&self) -> bool {
    matches!(self.0.kind, TypeKind::Any)
  }

  /// Whether null is a valid value of this type.
  pub fn is_nullable(&self) -> bool {
    matches!(self.0.kind, TypeKind::Any | TypeKind::Optional(_))
  }

  pub fn is_assignable_from(&self, other: &Type) -> bool {
    self.is_any() || self.0.id == other.0.id
  }

  pub fn as_scalar(&self) -> Option<&ScalarInfo> {
    match &self.0.kind {
      TypeKind::Scalar(info) => Some(info),
      _ => None,
    }
  }

  pub fn as_enum(&self) -> Option<&EnumInfo> {
    match &self.0.kind {
      TypeKind::Enum(info) => Some(info),
      _ => None,
    }
  }

  pub fn as_sequence(&self) -> Option<&SequenceInfo> {
    match &self.0.kind {
      TypeKind::Sequence(info) => Some(info),
      _ => None,
    }
  }

  pub fn as_optional(&self) -> Option<&OptionalInfo> {
    match &self.0.kind {
      TypeKind::Optional(info) => Some(info),
      _ => None,
    }
  }

  /// Whether values of this type can be rendered as strings.
  pub fn has_display(&self) -> bool {
    self.0.display.is_some() || matches!(self.0.kind, TypeKind::Enum(_))
  }

  pub fn display_value(&self, value: &Object) -> Option<String> {
    if let Some(display) = self.0.display {
      return display(value.as_any());
    }
    self
      .as_enum()
      .and_then(|info| info.name_of(value))
      .map(str::to_owned)
  }

  /// The object null becomes when stored as this type, if the type can hold one.
  pub fn null_object(&self) -> Option<Object> {
    self.as_optional().and_then(|info| info.wrap(None).ok())
  }
}

impl PartialEq for Type {
  fn eq(&self, other: &Self) -> bool {
    self.0.id == other.0.id
  }
}

impl Eq for Type {}

impl Hash for Type {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.0.id.hash(state);
  }
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&short_type_name(self.0.name))
  }
}

impl fmt::Debug for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Type({})", self)
  }
}

/// A non-null, type-erased value together with its [`Type`].
///
/// Cloning is cheap: the value itself is shared.
#[derive(Clone)]
pub struct Object {
  value: Arc<dyn Any + Send + Sync>,
  ty: Type,
}

impl Object {
  pub fn new<T: Reflect>(value: T) -> Self {
    value.into_object()
  }

  pub(crate) fn wrap<T: Any + Send + Sync>(value: T, ty: Type) -> Self {
    Self {
      value: Arc::new(value),
      ty,
    }
  }

  pub fn ty(&self) -> &Type {
    &self.ty
  }

  pub fn as_any(&self) -> &(dyn Any + Send + Sync) {
    self.value.as_ref()
  }

  pub fn is<T: Any>(&self) -> bool {
    self.value.is::<T>()
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.value.downcast_ref::<T>()
  }

  /// Extracts the value, cloning it only if the object is shared.
  pub fn downcast<T: Any + Clone + Send + Sync>(self) -> std::result::Result<T, Object> {
    let Object { value, ty } = self;
    match value.downcast::<T>() {
      Ok(arc) => Ok(Arc::try_unwrap(arc).unwrap_or_else(|shared| (*shared).clone())),
      Err(value) => Err(Object { value, ty }),
    }
  }

  /// Whether both objects share the same underlying value.
  pub fn ptr_eq(&self, other: &Object) -> bool {
    Arc::ptr_eq(&self.value, &other.value)
  }
}

impl fmt::Debug for Object {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.ty.display_value(self) {
      Some(rendered) => write!(f, "Object({}: {:?})", self.ty, rendered),
      None => write!(f, "Object({})", self.ty),
    }
  }
}

// --- Reflect implementations for the built-in shapes ---

impl Reflect for Object {
  fn type_of() -> Type {
    Type::any()
  }

  fn into_object(self) -> Object {
    self
  }

  fn from_object(object: Object) -> std::result::Result<Self, Object> {
    Ok(object)
  }
}

impl<T: Reflect> Reflect for Vec<T> {
  fn type_of() -> Type {
    Type::sequence::<T>()
  }
}

impl<T: Reflect> Reflect for Option<T> {
  fn type_of() -> Type {
    Type::optional::<T>()
  }

  fn null_value() -> Option<Self> {
    Some(None)
  }
}

// --- Type-erased capability shims ---

fn erased_display<T: fmt::Display + Any>(value: &dyn Any) -> Option<String> {
  value.downcast_ref::<T>().map(T::to_string)
}

fn erased_to_scalar<T: ScalarValue>(value: &dyn Any) -> Option<Scalar> {
  value.downcast_ref::<T>().map(T::to_scalar)
}

fn erased_from_scalar<T: ScalarValue>(value: Scalar, format: &Format) -> Result<Object> {
  T::from_scalar(value, format).map(Object::new)
}

fn erased_discriminant<T: EnumValue>(value: &dyn Any) -> Option<i64> {
  value.downcast_ref::<T>().map(T::discriminant)
}

fn erased_from_discriminant<T: EnumValue>(value: i64) -> Option<Object> {
  T::from_discriminant(value).map(Object::new)
}

fn erased_split<T: Reflect>(value: &dyn Any) -> Option<Vec<Object>> {
  value
    .downcast_ref::<Vec<T>>()
    .map(|items| items.iter().cloned().map(Reflect::into_object).collect())
}

fn erased_collect<T: Reflect>(elements: Vec<Object>) -> Result<Object> {
  let items = elements
    .into_iter()
    .map(|element| T::from_object(element).map_err(|rejected| mismatch::<T>(&rejected)))
    .collect::<Result<Vec<T>>>()?;
  Ok(Object::new(items))
}

fn erased_unwrap<T: Reflect>(value: &dyn Any) -> Option<Option<Object>> {
  value
    .downcast_ref::<Option<T>>()
    .map(|inner| inner.clone().map(Reflect::into_object))
}

fn erased_wrap<T: Reflect>(inner: Option<Object>) -> Result<Object> {
  match inner {
    None => Ok(Object::new(None::<T>)),
    Some(object) => T::from_object(object)
      .map(|value| Object::new(Some(value)))
      .map_err(|rejected| mismatch::<T>(&rejected)),
  }
}

fn mismatch<T: Reflect>(rejected: &Object) -> ConvertError {
  ConvertError::InvalidCast {
    from: rejected.ty().to_string(),
    to: T::type_of().to_string(),
  }
}

/// Strips module paths from a type name: `alloc::vec::Vec<alloc::string::String>`
/// becomes `Vec<String>`.
pub(crate) fn short_type_name(full: &str) -> String {
  let mut out = String::with_capacity(full.len());
  let mut segment_start = 0;
  for (i, c) in full.char_indices() {
    if matches!(c, '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';') {
      out.push_str(last_path_segment(&full[segment_start..i]));
      out.push(c);
      segment_start = i + c.len_utf8();
    }
  }
  out.push_str(last_path_segment(&full[segment_start..]));
  out
}

fn last_path_segment(path: &str) -> &str {
  path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_names_strip_paths_inside_generics() {
    assert_eq!(short_type_name("alloc::string::String"), "String");
    assert_eq!(
      short_type_name("alloc::vec::Vec<core::option::Option<alloc::string::String>>"),
      "Vec<Option<String>>"
    );
    assert_eq!(short_type_name("(i32, my::Thing)"), "(i32, Thing)");
  }

  #[test]
  fn types_compare_by_identity() {
    assert_eq!(Type::of::<i32>(), Type::of::<i32>());
    assert_ne!(Type::of::<i32>(), Type::of::<i64>());
    assert!(Type::any().is_assignable_from(&Type::of::<String>()));
    assert!(!Type::of::<String>().is_assignable_from(&Type::any()));
  }

  #[test]
  fn nullability_follows_shape() {
    assert!(Type::any().is_nullable());
    assert!(Type::of::<Option<u8>>().is_nullable());
    assert!(!Type::of::<u8>().is_nullable());
    assert!(!Type::of::<Vec<u8>>().is_nullable());
  }

  #[test]
  fn object_downcast_clones_only_when_shared() {
    let object = Object::new(String::from("abc"));
    let shared = object.clone();
    assert!(object.ptr_eq(&shared));
    assert_eq!(object.downcast::<String>().unwrap(), "abc");
    assert!(shared.downcast::<i32>().is_err());
  }

  #[test]
  fn sequence_round_trips_through_objects() {
    let ty = Type::of::<Vec<u16>>();
    let info = ty.as_sequence().unwrap();
    let parts = info.split(&Object::new(vec![1u16, 2, 3])).unwrap();
    assert_eq!(parts.len(), 3);
    let rebuilt = info.collect(parts).unwrap();
    assert_eq!(rebuilt.downcast_ref::<Vec<u16>>(), Some(&vec![1, 2, 3]));
  }

  #[test]
  fn optional_wraps_and_unwraps() {
    let ty = Type::of::<Option<bool>>();
    let info = ty.as_optional().unwrap();
    let some = info.wrap(Some(Object::new(true))).unwrap();
    assert_eq!(some.downcast_ref::<Option<bool>>(), Some(&Some(true)));
    assert!(matches!(info.unwrap(&some), Some(Some(_))));
    let none = ty.null_object().unwrap();
    assert!(matches!(info.unwrap(&none), Some(None)));
  }
}
