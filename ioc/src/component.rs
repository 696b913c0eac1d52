//! The `Component` trait and the shared handle types built on it.

use crate::error::{Error, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An opaque value: a positional factory argument or a factory context.
pub type Value = Arc<dyn Any + Send + Sync>;

/// A shared handle to something a factory produced.
///
/// Two instances are "the same instance" when `Arc::ptr_eq` holds.
pub type Instance = Arc<dyn Component>;

/// Type-erasure helper, implemented for every `Any + Send + Sync` type.
pub trait AsAny: Any + Send + Sync {
  fn as_any(&self) -> &(dyn Any + Send + Sync);
  fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
  fn as_any(&self) -> &(dyn Any + Send + Sync) {
    self
  }

  fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
    self
  }
}

/// Anything a factory can produce.
///
/// Both methods have defaults, so `impl Component for MyService {}` is enough
/// for types that take no property injections and expose no index fields.
///
/// # Examples
///
/// ```
/// use keyed_ioc::{downcast, Component, Error, Instance};
/// use std::sync::Arc;
///
/// struct Namer;
/// impl Component for Namer {}
///
/// #[derive(Default)]
/// struct Greeter {
///   namer: Option<Arc<Namer>>,
/// }
///
/// impl Component for Greeter {
///   fn inject(&mut self, property: &str, instance: Instance) -> Result<(), Error> {
///     match property {
///       "namer" => {
///         self.namer = downcast(&instance);
///         Ok(())
///       }
///       _ => Err(Error::UnknownProperty {
///         type_name: std::any::type_name::<Self>(),
///         property: property.to_owned(),
///       }),
///     }
///   }
/// }
/// ```
pub trait Component: AsAny {
  /// Receives a property injection after construction.
  fn inject(&mut self, property: &str, instance: Instance) -> Result<()> {
    let _ = instance;
    Err(Error::UnknownProperty {
      type_name: std::any::type_name::<Self>(),
      property: property.to_owned(),
    })
  }

  /// Returns the value of `field`, used as the key in indexed instance maps.
  fn index_field(&self, field: &str) -> Option<String> {
    let _ = field;
    None
  }
}

impl fmt::Debug for dyn Component {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Component")
      .field("type_id", &Any::type_id(AsAny::as_any(self)))
      .finish_non_exhaustive()
  }
}

/// Recovers the concrete type behind an instance handle.
pub fn downcast<T: Any + Send + Sync>(instance: &Instance) -> Option<Arc<T>> {
  AsAny::into_any(Arc::clone(instance)).downcast::<T>().ok()
}

/// Borrows the concrete type behind an instance handle.
pub fn downcast_ref<T: Any + Send + Sync>(instance: &Instance) -> Option<&T> {
  AsAny::as_any(&**instance).downcast_ref::<T>()
}

macro_rules! plain_components {
  ($($ty:ty),* $(,)?) => {
    $(impl Component for $ty {})*
  };
}

plain_components!(
  (),
  bool,
  char,
  String,
  &'static str,
  i8,
  i16,
  i32,
  i64,
  i128,
  isize,
  u8,
  u16,
  u32,
  u64,
  u128,
  usize,
  f32,
  f64,
);
