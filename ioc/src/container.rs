//! The main `Container` struct: registration, bootstrap and selectors.

use crate::args::Args;
use crate::component::{Component, Instance};
use crate::config::ContainerConfig;
use crate::error::{BoxError, Result};
use crate::options::{Injection, Options};
use crate::selector::{Candidate, Selector, SelectorChains};
use crate::store::InstanceStore;
use std::fmt;
use std::sync::Arc;

/// A type the container can build from an argument list.
///
/// `construct` receives every argument of the invocation, so there is no
/// limit on how many positional arguments a type accepts.
pub trait Constructible: Component + Sized {
  fn construct(args: Args) -> Result<Self, BoxError>;
}

/// The key a type registers under: its name without the module path.
///
/// ```
/// assert_eq!(keyed_ioc::type_key::<keyed_ioc::Container>(), "Container");
/// ```
pub fn type_key<T: ?Sized>() -> String {
  let full = std::any::type_name::<T>();
  let base_end = full.find('<').unwrap_or(full.len());
  let start = full[..base_end].rfind("::").map_or(0, |i| i + 2);
  full[start..].to_owned()
}

/// The Inversion of Control (IoC) container.
///
/// A container is a view over an [`InstanceStore`] plus the selector chains
/// used to pick between interface candidates. Every container registers
/// itself in its store, so `create("Container")` hands out a new, independent
/// container backed by whichever store the `instanceStore` interface resolves
/// to.
pub struct Container {
  pub(crate) store: Arc<InstanceStore>,
  pub(crate) selectors: SelectorChains,
  pub(crate) config: ContainerConfig,
}

impl Container {
  /// Key of the provider that hands out a container's own store.
  pub const DEFAULT_STORE_KEY: &'static str = "DefaultInstanceStore";
  /// Interface tag satisfied by store providers.
  pub const STORE_INTERFACE: &'static str = "instanceStore";

  /// Creates a new container over a fresh store.
  pub fn new() -> Self {
    Self::with_config(ContainerConfig::default())
  }

  /// Creates a new container over a fresh store with the given behavior.
  ///
  /// # Panics
  ///
  /// Bootstrapping only fails when its keys are already taken, which a fresh
  /// store rules out. The panic marks that broken invariant.
  pub fn with_config(config: ContainerConfig) -> Self {
    match Self::with_store_and_config(Arc::new(InstanceStore::new()), config) {
      Ok(container) => container,
      Err(err) => panic!("Failed to bootstrap a container over a fresh store: {}", err),
    }
  }

  /// Creates a container over an existing store.
  ///
  /// Fails with `Error::DuplicateKey` if another container already
  /// bootstrapped itself into `store`.
  pub fn with_store(store: Arc<InstanceStore>) -> Result<Self> {
    Self::with_store_and_config(store, ContainerConfig::default())
  }

  pub fn with_store_and_config(store: Arc<InstanceStore>, config: ContainerConfig) -> Result<Self> {
    let container = Self::from_parts(store, config);
    container.bootstrap()?;
    Ok(container)
  }

  fn from_parts(store: Arc<InstanceStore>, config: ContainerConfig) -> Self {
    Self {
      store,
      selectors: SelectorChains::default(),
      config,
    }
  }

  fn bootstrap(&self) -> Result<()> {
    self.register_type::<Container>(
      Options::new()
        .inject(
          Self::STORE_INTERFACE,
          Injection::interface(Self::STORE_INTERFACE).constructor(),
        )
        .factory_context(self.config),
    )?;

    // Held weakly: the store owns this factory.
    let store = Arc::downgrade(&self.store);
    self.register(
      Self::DEFAULT_STORE_KEY,
      move |_| match store.upgrade() {
        Some(store) => Ok(store as Instance),
        None => Err("the instance store was dropped".into()),
      },
      Options::new().interface(Self::STORE_INTERFACE),
    )
  }

  pub fn store(&self) -> &Arc<InstanceStore> {
    &self.store
  }

  pub fn config(&self) -> ContainerConfig {
    self.config
  }

  pub(crate) fn store_id(&self) -> usize {
    Arc::as_ptr(&self.store) as usize
  }

  // --- Registration ---

  /// Registers `factory` under `key`.
  ///
  /// A key can be registered exactly once; a second registration fails with
  /// `Error::DuplicateKey` and leaves the first one untouched. Every interface
  /// in `options` records `key` as one of its candidates.
  pub fn register<F>(&self, key: &str, factory: F, options: Options) -> Result<()>
  where
    F: Fn(Args) -> Result<Instance, BoxError> + Send + Sync + 'static,
  {
    let tags: Vec<String> = options.interfaces.iter().map(|i| i.tag.clone()).collect();
    self.store.insert(key, Arc::new(factory), options)?;
    tracing::debug!(key, interfaces = ?tags, "registered factory");
    Ok(())
  }

  /// Registers a constructible type under its own name.
  pub fn register_type<T: Constructible>(&self, options: Options) -> Result<()> {
    self.register_type_as::<T>(&type_key::<T>(), options)
  }

  /// Registers a constructible type under an explicit key.
  pub fn register_type_as<T: Constructible>(&self, key: &str, options: Options) -> Result<()> {
    self.register(
      key,
      |args| Ok(Arc::new(T::construct(args)?) as Instance),
      options,
    )
  }

  // --- Selectors ---

  /// Appends a closure to the selector chain of `tag`.
  pub fn add_selector<F>(&self, tag: &str, selector: F)
  where
    F: Fn(Vec<Candidate>) -> Result<Vec<Candidate>, BoxError> + Send + Sync + 'static,
  {
    self.selectors.push(tag, Arc::new(selector));
    tracing::debug!(interface = tag, "added selector");
  }

  /// Appends selectors to the chains of their tags, in order.
  pub fn add_selectors<I, T>(&self, selectors: I)
  where
    I: IntoIterator<Item = (T, Arc<dyn Selector>)>,
    T: AsRef<str>,
  {
    for (tag, selector) in selectors {
      self.selectors.push(tag.as_ref(), selector);
      tracing::debug!(interface = tag.as_ref(), "added selector");
    }
  }

  // --- Store access ---

  /// Instances retained under a registration key or interface tag.
  pub fn all_instances(&self, key: &str) -> Vec<Instance> {
    self.store.instances(key)
  }

  /// Clears the store and every selector chain, then registers the container
  /// again, leaving it as freshly constructed.
  ///
  /// Must not be called while a resolution is running.
  pub fn reset(&self) -> Result<()> {
    self.store.clear();
    self.selectors.clear();
    tracing::debug!("container reset");
    self.bootstrap()
  }
}

impl Default for Container {
  fn default() -> Self {
    Self::new()
  }
}

impl Component for Container {}

impl Constructible for Container {
  fn construct(args: Args) -> Result<Self, BoxError> {
    let store = args
      .injections()
      .and_then(|injections| injections.get_as::<InstanceStore>(Self::STORE_INTERFACE))
      .ok_or("no instance store was injected")?;
    let config = args.context::<ContainerConfig>().copied().unwrap_or_default();
    Ok(Self::with_store_and_config(store, config)?)
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("store", &self.store)
      .field("config", &self.config)
      .finish()
  }
}
