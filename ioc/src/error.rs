//! Error types produced by the container.

use thiserror::Error;

/// Boxed error returned by user factories and selectors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for `keyed_ioc`.
#[derive(Debug, Error)]
pub enum Error {
  /// A registration already exists under this key.
  #[error("The factory '{0}' is already registered")]
  DuplicateKey(String),

  /// Nothing was ever registered under this key.
  #[error("Key '{0}' not found")]
  UnknownKey(String),

  /// The key exists only as an interface tag and has no factory.
  #[error("Key '{0}' has no factory")]
  NoFactory(String),

  /// No registration satisfies the interface tag.
  #[error("No candidate found for interface '{0}'")]
  NoCandidate(String),

  #[error("Instance resolved for '{key}' is not a {expected}")]
  TypeMismatch { key: String, expected: &'static str },

  #[error("Injection '{property}' of '{key}' resolved to nothing")]
  UnresolvedInjection { key: String, property: String },

  #[error("{type_name} does not accept injected property '{property}'")]
  UnknownProperty {
    type_name: &'static str,
    property: String,
  },

  /// The factory returned a handle that is shared elsewhere, so property
  /// injections cannot be written into it.
  #[error("Factory '{key}' returned a shared instance; cannot inject '{property}'")]
  SharedInstance { key: String, property: String },

  #[error("Circular dependency detected: {}", path.join(" -> "))]
  CyclicDependency { path: Vec<String> },

  #[error("Factory '{key}' failed: {source}")]
  Factory {
    key: String,
    #[source]
    source: BoxError,
  },

  #[error("Selector for interface '{tag}' failed: {source}")]
  Selector {
    tag: String,
    #[source]
    source: BoxError,
  },
}

/// A specialized `Result` type for `keyed_ioc` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
