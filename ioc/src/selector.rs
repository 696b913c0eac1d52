//! Tie-break strategies used to narrow interface candidates.

use crate::error::{BoxError, Error, Result};
use crate::options::Options;
use dashmap::DashMap;
use std::sync::Arc;

/// A registration competing to satisfy an interface.
#[derive(Debug, Clone)]
pub struct Candidate {
  pub key: String,
  pub options: Arc<Options>,
}

/// Narrows a list of candidates.
///
/// Selectors run on every resolution and their output is never cached, so a
/// selector backed by captured mutable state may answer differently each time.
/// Any `Fn(Vec<Candidate>) -> Result<Vec<Candidate>, BoxError>` closure is a
/// selector.
pub trait Selector: Send + Sync {
  fn select(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, BoxError>;
}

impl<F> Selector for F
where
  F: Fn(Vec<Candidate>) -> Result<Vec<Candidate>, BoxError> + Send + Sync,
{
  fn select(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>, BoxError> {
    self(candidates)
  }
}

/// Selector chains, one per interface tag.
#[derive(Default)]
pub(crate) struct SelectorChains {
  chains: DashMap<String, Vec<Arc<dyn Selector>>>,
}

impl SelectorChains {
  pub(crate) fn push(&self, tag: &str, selector: Arc<dyn Selector>) {
    self.chains.entry(tag.to_owned()).or_default().push(selector);
  }

  pub(crate) fn clear(&self) {
    self.chains.clear();
  }

  /// Runs the chain for `tag`. A chain stops as soon as exactly one
  /// candidate remains, so later selectors never see a settled list.
  pub(crate) fn run(&self, tag: &str, mut candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
    // Snapshot so that no shard lock is held while user code runs.
    let chain: Vec<Arc<dyn Selector>> = match self.chains.get(tag) {
      Some(chain) => chain.value().clone(),
      None => return Ok(candidates),
    };

    for selector in chain {
      if candidates.len() == 1 {
        break;
      }
      candidates = selector
        .select(candidates)
        .map_err(|source| Error::Selector {
          tag: tag.to_owned(),
          source,
        })?;
    }
    Ok(candidates)
  }
}
