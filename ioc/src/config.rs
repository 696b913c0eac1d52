//! Container configuration.

use serde::Deserialize;

/// Behavior switches for a [`Container`](crate::Container).
///
/// Deserializable from any serde format; missing fields take their defaults.
///
/// ```
/// use keyed_ioc::ContainerConfig;
///
/// let config = ContainerConfig::default();
/// assert!(!config.detect_cycles);
/// assert!(config.warn_on_ambiguity);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
  /// Fail with `Error::CyclicDependency` when a key is re-entered during its
  /// own resolution. When off, a cyclic graph recurses until the stack
  /// overflows.
  pub detect_cycles: bool,
  /// Log a warning when an interface lookup ends with several candidates.
  pub warn_on_ambiguity: bool,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      detect_cycles: false,
      warn_on_ambiguity: true,
    }
  }
}
