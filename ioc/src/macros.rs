//! Public macros for building argument lists and resolving services.

/// Builds a positional argument list for [`Container::create_with`].
///
/// Each expression is wrapped in an `Arc` and erased to a [`Value`].
///
/// [`Container::create_with`]: crate::Container::create_with
/// [`Value`]: crate::Value
///
/// # Examples
///
/// ```
/// use keyed_ioc::args;
///
/// let values = args!["beep", 42_u32];
/// assert_eq!(values.len(), 2);
/// assert_eq!(values[1].downcast_ref::<u32>(), Some(&42));
/// ```
#[macro_export]
macro_rules! args {
  () => {
    ::std::vec::Vec::<$crate::Value>::new()
  };
  ($($value:expr),+ $(,)?) => {
    ::std::vec![$(::std::sync::Arc::new($value) as $crate::Value),+]
  };
}

/// Resolves a service from the global container.
///
/// Panics if the key is unknown, has no factory, the factory fails, or the
/// instance is not of the requested type. For a non-panicking version use
/// `global().create(...)` or `global().resolve::<T>(...)` directly.
///
/// - `resolve!("key")` yields an [`Instance`](crate::Instance).
/// - `resolve!("key" => Type)` yields an `Arc<Type>`.
/// - `resolve!(interface "tag")` and `resolve!(interface "tag" => Type)` go
///   through the interface index and its selectors.
///
/// # Examples
///
/// ```
/// use keyed_ioc::{global, resolve, Instance, Options};
/// use std::sync::Arc;
///
/// global()
///   .register(
///     "macro_doc_message",
///     |_| Ok(Arc::new(String::from("hello")) as Instance),
///     Options::new().interface("macro_doc_messages"),
///   )
///   .unwrap();
///
/// let message = resolve!("macro_doc_message" => String);
/// assert_eq!(*message, "hello");
///
/// let by_interface = resolve!(interface "macro_doc_messages" => String);
/// assert_eq!(*by_interface, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  (interface $tag:expr => $type:ty) => {{
    let tag = $tag;
    $crate::global()
      .resolve_by_interface::<$type>(tag)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required interface '{}' as {}: {}",
          tag,
          ::std::any::type_name::<$type>(),
          err
        )
      })
  }};

  (interface $tag:expr) => {{
    let tag = $tag;
    match $crate::global().instance_by_interface(tag) {
      ::std::result::Result::Ok(::std::option::Option::Some(instance)) => instance,
      ::std::result::Result::Ok(::std::option::Option::None) => {
        panic!("Failed to resolve required interface '{}': no candidate", tag)
      }
      ::std::result::Result::Err(err) => {
        panic!("Failed to resolve required interface '{}': {}", tag, err)
      }
    }
  }};

  ($key:expr => $type:ty) => {{
    let key = $key;
    $crate::global()
      .resolve::<$type>(key)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service '{}' as {}: {}",
          key,
          ::std::any::type_name::<$type>(),
          err
        )
      })
  }};

  ($key:expr) => {{
    let key = $key;
    match $crate::global().create(key) {
      ::std::result::Result::Ok(::std::option::Option::Some(instance)) => instance,
      ::std::result::Result::Ok(::std::option::Option::None) => {
        panic!("Failed to resolve required service '{}': no factory", key)
      }
      ::std::result::Result::Err(err) => {
        panic!("Failed to resolve required service '{}': {}", key, err)
      }
    }
  }};
}
