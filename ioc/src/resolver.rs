//! Resolution: building instances, satisfying their injections and looking
//! them up by interface.

use crate::args::{Args, Injections};
use crate::component::{downcast, Instance, Value};
use crate::container::Container;
use crate::core::ResolutionGuard;
use crate::error::{Error, Result};
use crate::options::Target;
use crate::selector::Candidate;
use std::any::{type_name, Any};
use std::sync::Arc;

impl Container {
  /// Creates (or, for singletons, returns) the instance registered under `key`
  /// using the registration's default factory arguments.
  ///
  /// Returns `Ok(None)` when `key` only exists as an interface tag.
  pub fn create(&self, key: &str) -> Result<Option<Instance>> {
    self.create_with(key, Vec::new())
  }

  /// Alias of [`create`](Self::create).
  pub fn get(&self, key: &str) -> Result<Option<Instance>> {
    self.create(key)
  }

  /// Creates an instance with explicit positional arguments.
  ///
  /// Non-empty `args` replace the registration's `factory_args`. When the
  /// registration declares constructor injections, their aggregate is always
  /// inserted at position 0, ahead of the positional arguments.
  ///
  /// Dependencies are resolved depth-first before the factory runs. If the
  /// factory or a later step fails, nothing is recorded for `key`, but
  /// dependencies that were already created stay cached.
  pub fn create_with(&self, key: &str, args: Vec<Value>) -> Result<Option<Instance>> {
    let slot = self
      .store
      .slot(key)
      .ok_or_else(|| Error::UnknownKey(key.to_owned()))?;
    let Some(registration) = slot.registration.as_ref() else {
      return Ok(None);
    };
    let options = &registration.options;

    if options.singleton {
      if let Some(instance) = slot.first_instance() {
        tracing::trace!(key, "returning cached singleton");
        return Ok(Some(instance));
      }
    }

    let _guard = if self.config.detect_cycles {
      Some(ResolutionGuard::enter(self.store_id(), key)?)
    } else {
      None
    };

    tracing::trace!(key, "resolving");

    let mut constructor_injections = Injections::default();
    let mut property_injections: Vec<(&str, Instance)> = Vec::new();
    for (property, injection) in &options.injections {
      let resolved = match &injection.target {
        Target::Key(dependency) => self.create_with(dependency, injection.constructor_args.clone())?,
        Target::Interface(tag) => self.instance_by_interface(tag)?,
      };
      let instance = resolved.ok_or_else(|| Error::UnresolvedInjection {
        key: key.to_owned(),
        property: property.clone(),
      })?;
      if injection.constructor {
        constructor_injections.insert(property.clone(), instance);
      } else {
        property_injections.push((property.as_str(), instance));
      }
    }

    let mut values = if args.is_empty() {
      options.factory_args.clone()
    } else {
      args
    };
    if !constructor_injections.is_empty() {
      values.insert(0, Arc::new(constructor_injections));
    }

    let mut instance = (registration.factory)(Args::with_context(
      options.factory_context.clone(),
      values,
    ))
    .map_err(|source| Error::Factory {
      key: key.to_owned(),
      source,
    })?;

    for (property, dependency) in property_injections {
      let target = Arc::get_mut(&mut instance).ok_or_else(|| Error::SharedInstance {
        key: key.to_owned(),
        property: property.to_owned(),
      })?;
      target.inject(property, dependency)?;
    }

    if options.singleton || options.map_instances {
      slot.record(key, &instance, options.instance_index_field.as_deref());
    }
    for interface in options.interfaces.iter().filter(|i| i.map_instances) {
      if let Some(tag_slot) = self.store.slot(&interface.tag) {
        tag_slot.record(
          &interface.tag,
          &instance,
          interface.instance_index_field.as_deref(),
        );
      }
    }

    Ok(Some(instance))
  }

  /// Creates the instance under `key` and downcasts it to `T`.
  pub fn resolve<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
    let instance = self
      .create(key)?
      .ok_or_else(|| Error::NoFactory(key.to_owned()))?;
    downcast::<T>(&instance).ok_or_else(|| Error::TypeMismatch {
      key: key.to_owned(),
      expected: type_name::<T>(),
    })
  }

  // --- Interfaces ---

  fn candidates(&self, tag: &str) -> Result<Vec<Candidate>> {
    let candidates = self
      .store
      .interface_keys(tag)
      .into_iter()
      .filter_map(|key| {
        let options = self.store.options(&key)?;
        Some(Candidate { key, options })
      })
      .collect();
    self.selectors.run(tag, candidates)
  }

  /// Registration keys that satisfy `tag`, narrowed by its selector chain.
  ///
  /// Unknown tags yield an empty list.
  pub fn keys_by_interface(&self, tag: &str) -> Result<Vec<String>> {
    Ok(
      self
        .candidates(tag)?
        .into_iter()
        .map(|candidate| candidate.key)
        .collect(),
    )
  }

  /// Creates an instance of the registration chosen for `tag`.
  ///
  /// When the selector chain leaves more than one candidate, the first one is
  /// used and a warning is logged. Returns `Ok(None)` if no candidate remains.
  pub fn instance_by_interface(&self, tag: &str) -> Result<Option<Instance>> {
    let keys = self.keys_by_interface(tag)?;
    if keys.len() > 1 && self.config.warn_on_ambiguity {
      tracing::warn!(
        interface = tag,
        candidates = ?keys,
        "found more than one candidate for interface, using the first; consider adding a selector"
      );
    }
    match keys.first() {
      Some(key) => self.create(key),
      None => Ok(None),
    }
  }

  /// Like [`instance_by_interface`](Self::instance_by_interface), downcast to `T`.
  pub fn resolve_by_interface<T: Any + Send + Sync>(&self, tag: &str) -> Result<Arc<T>> {
    let instance = self
      .instance_by_interface(tag)?
      .ok_or_else(|| Error::NoCandidate(tag.to_owned()))?;
    downcast::<T>(&instance).ok_or_else(|| Error::TypeMismatch {
      key: tag.to_owned(),
      expected: type_name::<T>(),
    })
  }
}
