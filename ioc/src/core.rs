//! Core, non-public data structures for the IoC container.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fmt;

thread_local! {
  // Keys currently being resolved on this thread, tagged with the identity of
  // the store they belong to. Only populated when cycle detection is enabled.
  static RESOLVING_STACK: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard to detect circular dependencies.
///
/// When created, it pushes a key onto the thread-local resolution stack.
/// If the key is already on the stack for the same store, the resolution is
/// circular and `enter` fails with the offending path. Dropping the guard pops
/// the key again.
pub(crate) struct ResolutionGuard {
  store_id: usize,
  key: String,
}

impl ResolutionGuard {
  pub(crate) fn enter(store_id: usize, key: &str) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let first = stack
        .iter()
        .position(|(id, resolving)| *id == store_id && resolving == key);
      if let Some(first) = first {
        let mut path: Vec<String> = stack[first..]
          .iter()
          .filter(|(id, _)| *id == store_id)
          .map(|(_, resolving)| resolving.clone())
          .collect();
        path.push(key.to_owned());
        return Err(Error::CyclicDependency { path });
      }
      stack.push((store_id, key.to_owned()));
      Ok(Self {
        store_id,
        key: key.to_owned(),
      })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(pos) = stack
        .iter()
        .rposition(|(id, key)| *id == self.store_id && *key == self.key)
      {
        stack.remove(pos);
      }
    });
  }
}

/// Index under which an instance is kept in an instance map.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) enum InstanceIndex {
  Seq(usize),
  Field(String),
}

impl fmt::Debug for InstanceIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InstanceIndex::Seq(n) => write!(f, "Index({})", n),
      InstanceIndex::Field(name) => write!(f, "Index({:?})", name),
    }
  }
}
