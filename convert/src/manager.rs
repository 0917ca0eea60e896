//! The conversion manager: a registry of converters and the resolution
//! algorithm that picks between them.

use crate::converter::ObjectConverter;
use crate::error::{ConvertError, Result};
use crate::format::Format;
use crate::types::{Object, Reflect, Type};

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

/// The conversion capability handed to converters and application code.
pub trait ConvertManager: Send + Sync {
  /// Whether at least one registered converter claims the conversion.
  fn can_convert(&self, source: Option<&Type>, target: &Type) -> bool;

  /// Converts `value` (null when `None`) to `target`.
  ///
  /// `source` is the declared type of the value; it is inferred from the
  /// object when omitted.
  fn convert(
    &self,
    value: Option<&Object>,
    source: Option<&Type>,
    target: &Type,
    format: &Format,
  ) -> Result<Option<Object>>;
}

/// Typed conveniences on top of any [`ConvertManager`].
pub trait ConvertManagerExt: ConvertManager {
  fn can_convert_types<S: Reflect, T: Reflect>(&self) -> bool {
    self.can_convert(Some(&S::type_of()), &T::type_of())
  }

  fn convert_value<S: Reflect, T: Reflect>(&self, value: S) -> Result<T> {
    self.convert_value_with_format(value, &Format::invariant())
  }

  fn convert_value_with_format<S: Reflect, T: Reflect>(&self, value: S, format: &Format) -> Result<T> {
    let object = value.into_object();
    let target = T::type_of();
    let result = self.convert(Some(&object), Some(&S::type_of()), &target, format)?;
    materialize(result, &target)
  }

  fn convert_object<T: Reflect>(&self, value: &Object) -> Result<T> {
    let target = T::type_of();
    let result = self.convert(Some(value), None, &target, &Format::invariant())?;
    materialize(result, &target)
  }

  /// Converts null, optionally declared as `source`, to `T`.
  fn convert_null<T: Reflect>(&self, source: Option<&Type>) -> Result<T> {
    let target = T::type_of();
    let result = self.convert(None, source, &target, &Format::invariant())?;
    materialize(result, &target)
  }
}

impl<M: ConvertManager + ?Sized> ConvertManagerExt for M {}

fn materialize<T: Reflect>(result: Option<Object>, target: &Type) -> Result<T> {
  match result {
    Some(object) => T::from_object(object).map_err(|rejected| ConvertError::InvalidCast {
      from: rejected.ty().to_string(),
      to: target.to_string(),
    }),
    None => T::null_value().ok_or_else(|| ConvertError::NullResult {
      target_type: target.to_string(),
    }),
  }
}

fn describe(source: Option<&Type>) -> String {
  source.map_or_else(|| "null".to_string(), Type::to_string)
}

struct Candidate<'a> {
  converter: &'a Arc<dyn ObjectConverter>,
  source: Option<Type>,
  priority: i32,
}

/// An insertion-ordered registry of converters.
///
/// Registration needs `&mut self`, so it completes before the manager is
/// shared for concurrent conversions.
#[derive(Default, Clone)]
pub struct ObjectConvertManager {
  converters: Vec<Arc<dyn ObjectConverter>>,
}

impl ObjectConvertManager {
  /// Creates a manager with no converters.
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a converter. Later registrations lose priority ties.
  pub fn register_converter<C: ObjectConverter + 'static>(&mut self, converter: C) -> &mut Self {
    self.register_shared(Arc::new(converter))
  }

  /// Appends a converter that is shared with other managers.
  pub fn register_shared(&mut self, converter: Arc<dyn ObjectConverter>) -> &mut Self {
    tracing::trace!(converter = converter.name(), "registering converter");
    self.converters.push(converter);
    self
  }

  /// The registered converters, in registration order.
  pub fn converters(&self) -> &[Arc<dyn ObjectConverter>] {
    &self.converters
  }

  fn claims(&self, converter: &dyn ObjectConverter, source: Option<&Type>, target: &Type) -> bool {
    match converter.can_convert(source, target, self) {
      Ok(claimed) => claimed,
      Err(error) => {
        tracing::trace!(
          converter = converter.name(),
          source = %describe(source),
          target = %target,
          %error,
          "can_convert failed, treating converter as not applicable"
        );
        false
      }
    }
  }

  fn rank(&self, converter: &dyn ObjectConverter, source: Option<&Type>, target: &Type) -> i32 {
    match converter.priority(source, target) {
      Ok(priority) => priority,
      Err(error) => {
        tracing::trace!(
          converter = converter.name(),
          %error,
          "priority failed, ranking converter last"
        );
        i32::MIN
      }
    }
  }

  fn candidates(&self, value_is_null: bool, source: Option<&Type>, target: &Type) -> Vec<Candidate<'_>> {
    let mut candidates: Vec<Candidate<'_>> = self
      .converters
      .iter()
      .filter_map(|converter| {
        let matches_type = self.claims(converter.as_ref(), source, target);
        let matches_null = !matches_type
          && value_is_null
          && source.is_some()
          && self.claims(converter.as_ref(), None, target);
        if !matches_type && !matches_null {
          return None;
        }
        let source = if matches_type { source.cloned() } else { None };
        let priority = self.rank(converter.as_ref(), source.as_ref(), target);
        Some(Candidate {
          converter,
          source,
          priority,
        })
      })
      .collect();
    // Stable: equal priorities keep registration order.
    candidates.sort_by_key(|candidate| Reverse(candidate.priority));
    candidates
  }
}

impl ConvertManager for ObjectConvertManager {
  fn can_convert(&self, source: Option<&Type>, target: &Type) -> bool {
    self
      .converters
      .iter()
      .any(|converter| self.claims(converter.as_ref(), source, target))
  }

  fn convert(
    &self,
    value: Option<&Object>,
    source: Option<&Type>,
    target: &Type,
    format: &Format,
  ) -> Result<Option<Object>> {
    let source = match value {
      None => {
        if let Some(declared) = source.filter(|declared| !declared.is_nullable()) {
          return Err(ConvertError::NullNotAllowed {
            source_type: declared.to_string(),
          });
        }
        source.cloned()
      }
      Some(object) => match source {
        None => Some(object.ty().clone()),
        Some(declared) if declared.is_assignable_from(object.ty()) => Some(declared.clone()),
        Some(declared) => {
          return Err(ConvertError::SourceTypeMismatch {
            expected: declared.to_string(),
            actual: object.ty().to_string(),
          })
        }
      },
    };

    let candidates = self.candidates(value.is_none(), source.as_ref(), target);
    if candidates.is_empty() {
      return Err(ConvertError::NoConverter {
        source_type: describe(source.as_ref()),
        target_type: target.to_string(),
      });
    }

    let mut failures = Vec::new();
    for candidate in candidates {
      let name = candidate.converter.name();
      match candidate
        .converter
        .convert(value, candidate.source.as_ref(), target, self, format)
      {
        Ok(result) => {
          tracing::trace!(
            converter = name,
            priority = candidate.priority,
            target = %target,
            "conversion succeeded"
          );
          return Ok(result);
        }
        Err(error) => {
          tracing::debug!(
            converter = name,
            priority = candidate.priority,
            source = %describe(candidate.source.as_ref()),
            target = %target,
            %error,
            "converter failed, trying next candidate"
          );
          failures.push(format!("{}: {}", name, error));
        }
      }
    }

    Err(ConvertError::AllFailed {
      source_type: describe(source.as_ref()),
      target_type: target.to_string(),
      failures,
    })
  }
}

impl fmt::Debug for ObjectConvertManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list()
      .entries(self.converters.iter().map(|converter| converter.name()))
      .finish()
  }
}
