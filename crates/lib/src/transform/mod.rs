//! Code transforms applied to the staged application tree.
//!
//! A transform rewrites files under the app subtree in place, once per
//! build, before the manifest is embedded. Transforms are named
//! implementations held in a [`TransformRegistry`] populated at startup;
//! the manifest selects one by name via `scramble_plugin`. A name that does
//! not resolve is a soft failure: the pipeline logs a warning and builds the
//! bundle untransformed.

mod marker;
mod noop;

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use marker::MarkerTransform;
pub use noop::NoopTransform;

/// Errors raised while a transform rewrites the staged tree.
#[derive(Debug, Error)]
pub enum TransformError {
  #[error("failed to rewrite '{path}': {source}")]
  Rewrite { path: PathBuf, source: io::Error },

  #[error("failed to walk staged tree: {0}")]
  Walk(#[from] walkdir::Error),
}

/// A code transform over a staged directory tree.
///
/// Implementations own no state beyond a single invocation: the pipeline
/// calls [`process`](Transform::process) exactly once, synchronously,
/// against the application subtree.
pub trait Transform: Send + Sync {
  /// Registry name the manifest refers to this transform by.
  fn name(&self) -> &'static str;

  /// Rewrite files under `dir` in place.
  fn process(&self, dir: &Path) -> Result<(), TransformError>;
}

/// Named transforms available to a build.
pub struct TransformRegistry {
  transforms: BTreeMap<&'static str, Box<dyn Transform>>,
}

impl TransformRegistry {
  /// An empty registry.
  pub fn new() -> Self {
    Self {
      transforms: BTreeMap::new(),
    }
  }

  /// A registry holding the built-in transforms (`noop`, `marker`).
  pub fn builtin() -> Self {
    let mut registry = Self::new();
    registry.register(Box::new(NoopTransform));
    registry.register(Box::new(MarkerTransform));
    registry
  }

  /// Register a transform under its own name, replacing any previous entry
  /// with the same name.
  pub fn register(&mut self, transform: Box<dyn Transform>) {
    self.transforms.insert(transform.name(), transform);
  }

  /// Look up a transform by name.
  pub fn get(&self, name: &str) -> Option<&dyn Transform> {
    self.transforms.get(name).map(|t| t.as_ref())
  }

  /// Registered names, in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.transforms.keys().copied()
  }
}

impl Default for TransformRegistry {
  fn default() -> Self {
    Self::builtin()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_registry_has_reference_transforms() {
    let registry = TransformRegistry::builtin();
    assert!(registry.get("noop").is_some());
    assert!(registry.get("marker").is_some());
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["marker", "noop"]);
  }

  #[test]
  fn unknown_name_resolves_to_none() {
    let registry = TransformRegistry::builtin();
    assert!(registry.get("does-not-exist").is_none());
  }

  #[test]
  fn register_replaces_same_name() {
    struct Other;
    impl Transform for Other {
      fn name(&self) -> &'static str {
        "noop"
      }
      fn process(&self, _dir: &Path) -> Result<(), TransformError> {
        Ok(())
      }
    }

    let mut registry = TransformRegistry::builtin();
    registry.register(Box::new(Other));
    assert_eq!(registry.names().count(), 2);
  }
}
