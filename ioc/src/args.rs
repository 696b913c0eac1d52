//! Argument lists handed to factories.

use crate::component::{downcast, Instance, Value};
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;

/// The aggregate of constructor injections, keyed by property name.
///
/// When a registration declares constructor injections, the resolver passes
/// this object as the first positional argument of the factory.
#[derive(Clone, Default)]
pub struct Injections {
  values: IndexMap<String, Instance>,
}

impl Injections {
  pub(crate) fn insert(&mut self, property: String, instance: Instance) {
    self.values.insert(property, instance);
  }

  pub fn get(&self, property: &str) -> Option<&Instance> {
    self.values.get(property)
  }

  /// Returns the injected instance downcast to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, property: &str) -> Option<Arc<T>> {
    self.values.get(property).and_then(downcast::<T>)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Iterates over `(property, instance)` pairs in declaration order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Instance)> {
    self.values.iter().map(|(k, v)| (k.as_str(), v))
  }
}

/// The invocation a factory receives: positional values plus the context the
/// registration was bound to.
#[derive(Clone, Default)]
pub struct Args {
  context: Option<Value>,
  values: Vec<Value>,
}

impl Args {
  pub fn new(values: Vec<Value>) -> Self {
    Self {
      context: None,
      values,
    }
  }

  pub(crate) fn with_context(context: Option<Value>, values: Vec<Value>) -> Self {
    Self { context, values }
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The raw value at `index`.
  pub fn value(&self, index: usize) -> Option<&Value> {
    self.values.get(index)
  }

  /// Borrows the value at `index` as a `T`.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Option<&T> {
    self.values.get(index).and_then(|v| v.downcast_ref::<T>())
  }

  /// Clones the value at `index` out as an `Arc<T>`.
  pub fn get_arc<T: Any + Send + Sync>(&self, index: usize) -> Option<Arc<T>> {
    self
      .values
      .get(index)
      .and_then(|v| Arc::clone(v).downcast::<T>().ok())
  }

  /// The constructor-injection aggregate, present at position 0 when the
  /// registration declares constructor injections.
  pub fn injections(&self) -> Option<&Injections> {
    self.get::<Injections>(0)
  }

  /// The factory context, if one was configured and it is a `T`.
  pub fn context<T: Any + Send + Sync>(&self) -> Option<&T> {
    self.context.as_ref().and_then(|c| c.downcast_ref::<T>())
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Value> {
    self.values.iter()
  }

  pub fn into_values(self) -> Vec<Value> {
    self.values
  }
}
