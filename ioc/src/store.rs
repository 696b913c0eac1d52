//! The instance store: registrations, the interface index and materialized
//! instances.

use crate::args::Args;
use crate::component::{Component, Instance};
use crate::core::InstanceIndex;
use crate::error::{BoxError, Error, Result};
use crate::options::Options;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub(crate) type Factory = Arc<dyn Fn(Args) -> Result<Instance, BoxError> + Send + Sync>;

pub(crate) struct Registration {
  pub(crate) factory: Factory,
  pub(crate) options: Arc<Options>,
}

/// One entry of the store.
///
/// A slot is created either by a registration or as the index entry of an
/// interface tag; a key can be both.
pub(crate) struct Slot {
  pub(crate) registration: Option<Registration>,
  keys: Mutex<Vec<String>>,
  instances: Mutex<IndexMap<InstanceIndex, Instance>>,
}

impl Slot {
  fn registered(registration: Registration) -> Self {
    Self {
      registration: Some(registration),
      keys: Mutex::new(Vec::new()),
      instances: Mutex::new(IndexMap::new()),
    }
  }

  fn interface() -> Self {
    Self {
      registration: None,
      keys: Mutex::new(Vec::new()),
      instances: Mutex::new(IndexMap::new()),
    }
  }

  pub(crate) fn first_instance(&self) -> Option<Instance> {
    self.instances.lock().first().map(|(_, i)| Arc::clone(i))
  }

  /// Keeps `instance`, indexed by a counter or by `index_field` of the
  /// instance. An existing index is overwritten in place.
  pub(crate) fn record(&self, owner: &str, instance: &Instance, index_field: Option<&str>) {
    // User code runs before the lock is taken.
    let field_value = index_field.and_then(|field| {
      let value = instance.index_field(field);
      if value.is_none() {
        tracing::warn!(
          key = owner,
          field,
          "instance has no value for its index field, falling back to a sequential index"
        );
      }
      value
    });

    let mut instances = self.instances.lock();
    let index = match field_value {
      Some(value) => InstanceIndex::Field(value),
      None => InstanceIndex::Seq(instances.len()),
    };
    instances.insert(index.clone(), Arc::clone(instance));
    drop(instances);
    tracing::trace!(key = owner, ?index, "recorded instance");
  }

  fn instances(&self) -> Vec<Instance> {
    self.instances.lock().values().cloned().collect()
  }

  fn keys(&self) -> Vec<String> {
    self.keys.lock().clone()
  }
}

/// The table every container reads from and writes to.
///
/// Stores are shared through `Arc` and may back any number of containers.
/// The store behind the global container is process-wide state; `clear`
/// returns any store to its empty initial state.
#[derive(Default)]
pub struct InstanceStore {
  slots: DashMap<String, Arc<Slot>>,
}

impl InstanceStore {
  /// Creates a new, empty store.
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of slots, counting registrations and interface tags.
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.slots.contains_key(key)
  }

  /// A sorted snapshot of every slot key.
  pub fn keys(&self) -> Vec<String> {
    let mut keys: Vec<String> = self.slots.iter().map(|e| e.key().clone()).collect();
    keys.sort();
    keys
  }

  /// Removes every registration, interface entry and instance.
  ///
  /// Must not be called while a resolution against this store is running.
  pub fn clear(&self) {
    self.slots.clear();
  }

  /// Instances retained under a registration key or an interface tag, in
  /// index order. Unknown keys yield an empty list.
  pub fn instances(&self, key: &str) -> Vec<Instance> {
    self.slot(key).map(|slot| slot.instances()).unwrap_or_default()
  }

  /// Registration keys that declared the interface `tag`, in registration order.
  pub fn interface_keys(&self, tag: &str) -> Vec<String> {
    self.slot(tag).map(|slot| slot.keys()).unwrap_or_default()
  }

  pub(crate) fn slot(&self, key: &str) -> Option<Arc<Slot>> {
    self.slots.get(key).map(|slot| Arc::clone(slot.value()))
  }

  pub(crate) fn options(&self, key: &str) -> Option<Arc<Options>> {
    self
      .slot(key)
      .and_then(|slot| slot.registration.as_ref().map(|r| Arc::clone(&r.options)))
  }

  pub(crate) fn insert(&self, key: &str, factory: Factory, options: Options) -> Result<()> {
    let options = Arc::new(options);
    match self.slots.entry(key.to_owned()) {
      Entry::Occupied(_) => return Err(Error::DuplicateKey(key.to_owned())),
      Entry::Vacant(vacant) => {
        vacant.insert(Arc::new(Slot::registered(Registration {
          factory,
          options: Arc::clone(&options),
        })));
      }
    }

    // The entry guard above is released before touching other shards.
    for interface in &options.interfaces {
      let slot = Arc::clone(
        self
          .slots
          .entry(interface.tag.clone())
          .or_insert_with(|| Arc::new(Slot::interface()))
          .value(),
      );
      slot.keys.lock().push(key.to_owned());
    }
    Ok(())
  }
}

impl Component for InstanceStore {}

impl fmt::Debug for InstanceStore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("InstanceStore")
      .field("keys", &self.keys())
      .finish()
  }
}
