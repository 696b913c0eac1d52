//! Registration policy: lifecycle flags, interfaces and injections.

use crate::component::Value;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A capability a registration satisfies.
///
/// Each descriptor can keep its own indexed collection of the instances
/// created through any registration that declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
  pub tag: String,
  pub map_instances: bool,
  pub instance_index_field: Option<String>,
}

impl Interface {
  pub fn new(tag: impl Into<String>) -> Self {
    Self {
      tag: tag.into(),
      map_instances: false,
      instance_index_field: None,
    }
  }

  /// Retain every instance created under this interface.
  pub fn map_instances(mut self) -> Self {
    self.map_instances = true;
    self
  }

  /// Index retained instances by a field of the instance instead of a counter.
  pub fn index_by(mut self, field: impl Into<String>) -> Self {
    self.instance_index_field = Some(field.into());
    self
  }
}

impl From<&str> for Interface {
  fn from(tag: &str) -> Self {
    Interface::new(tag)
  }
}

impl From<String> for Interface {
  fn from(tag: String) -> Self {
    Interface::new(tag)
  }
}

/// Where an injected dependency comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  Key(String),
  Interface(String),
}

/// A declared dependency.
///
/// A bare string converts into a property injection by key.
#[derive(Clone)]
pub struct Injection {
  pub target: Target,
  /// Deliver through the constructor aggregate instead of `Component::inject`.
  pub constructor: bool,
  /// Arguments used when resolving a key target.
  pub constructor_args: Vec<Value>,
}

impl Injection {
  pub fn key(key: impl Into<String>) -> Self {
    Self {
      target: Target::Key(key.into()),
      constructor: false,
      constructor_args: Vec::new(),
    }
  }

  pub fn interface(tag: impl Into<String>) -> Self {
    Self {
      target: Target::Interface(tag.into()),
      constructor: false,
      constructor_args: Vec::new(),
    }
  }

  pub fn constructor(mut self) -> Self {
    self.constructor = true;
    self
  }

  pub fn with_args(mut self, args: Vec<Value>) -> Self {
    self.constructor_args = args;
    self
  }
}

impl From<&str> for Injection {
  fn from(key: &str) -> Self {
    Injection::key(key)
  }
}

impl From<String> for Injection {
  fn from(key: String) -> Self {
    Injection::key(key)
  }
}

impl fmt::Debug for Injection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Injection")
      .field("target", &self.target)
      .field("constructor", &self.constructor)
      .field("constructor_args", &self.constructor_args.len())
      .finish()
  }
}

/// The policy block attached to a registration.
///
/// Defaults: transient, no interfaces, no injections, no factory args and no
/// factory context.
#[derive(Clone, Default)]
pub struct Options {
  pub singleton: bool,
  pub map_instances: bool,
  pub instance_index_field: Option<String>,
  pub interfaces: Vec<Interface>,
  pub injections: IndexMap<String, Injection>,
  pub factory_args: Vec<Value>,
  pub factory_context: Option<Value>,
  /// Free-form metadata, visible to selectors.
  pub attributes: BTreeMap<String, String>,
}

impl Options {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn singleton(mut self) -> Self {
    self.singleton = true;
    self
  }

  pub fn map_instances(mut self) -> Self {
    self.map_instances = true;
    self
  }

  pub fn index_by(mut self, field: impl Into<String>) -> Self {
    self.instance_index_field = Some(field.into());
    self
  }

  pub fn interface(mut self, interface: impl Into<Interface>) -> Self {
    self.interfaces.push(interface.into());
    self
  }

  /// Declares an injection for `property`. Later declarations for the same
  /// property replace earlier ones but keep their position.
  pub fn inject(mut self, property: impl Into<String>, injection: impl Into<Injection>) -> Self {
    self.injections.insert(property.into(), injection.into());
    self
  }

  pub fn factory_args(mut self, args: Vec<Value>) -> Self {
    self.factory_args = args;
    self
  }

  pub fn factory_context<C: std::any::Any + Send + Sync>(mut self, context: C) -> Self {
    self.factory_context = Some(Arc::new(context));
    self
  }

  pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.attributes.insert(name.into(), value.into());
    self
  }

  pub fn attribute_value(&self, name: &str) -> Option<&str> {
    self.attributes.get(name).map(String::as_str)
  }
}

impl fmt::Debug for Options {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Options")
      .field("singleton", &self.singleton)
      .field("map_instances", &self.map_instances)
      .field("instance_index_field", &self.instance_index_field)
      .field("interfaces", &self.interfaces)
      .field("injections", &self.injections)
      .field("factory_args", &self.factory_args.len())
      .field("factory_context", &self.factory_context.is_some())
      .field("attributes", &self.attributes)
      .finish()
  }
}
