//! The global IoC container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// The process-wide container. Created, together with its store, on first access.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::new);

/// Provides a reference to the global container instance.
///
/// The global container is backed by the process-wide instance store. Use
/// [`Container::reset`] to return it to its initial state between tests, or
/// create an isolated [`Container`] instead.
///
/// # Examples
///
/// ```
/// use keyed_ioc::{global, Instance, Options};
/// use std::sync::Arc;
///
/// global()
///   .register(
///     "global_greeting",
///     |_| Ok(Arc::new(String::from("Hello from global!")) as Instance),
///     Options::new().singleton(),
///   )
///   .unwrap();
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
