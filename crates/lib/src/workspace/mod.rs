//! Build workspace management.
//!
//! The workspace is the single output directory tree owned by one pipeline
//! run. Layout:
//! ```text
//! <root>/                 # build/ by default
//! ├── app/                # staged application tree
//! ├── php/                # optional bundled runtime, copied best-effort
//! ├── manifest.json       # embedded manifest copy
//! ├── <app_name>[.exe]    # compiled launcher
//! └── uninstall.{sh,bat}  # optional auxiliary scripts
//! ```
//!
//! Every build starts from [`Workspace::reset`], which purges and recreates
//! the tree: no stage may observe partial state from a previous build. A
//! staging copy
//! that fails partway is not rolled back; instead a dirty marker is left in
//! the root so callers can see the workspace needs a reset before reuse.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::consts::{APP_SUBDIR, DIRTY_MARKER, EXCLUDED_NAMES, MANIFEST_FILENAME, RUNTIME_SUBDIR};

/// Errors raised while mutating the build workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
  #[error("source tree not found: {0}")]
  SourceMissing(PathBuf),

  #[error("failed to reset workspace at '{path}': {source}")]
  Reset { path: PathBuf, source: io::Error },

  #[error("failed to copy '{path}': {source}")]
  Copy { path: PathBuf, source: io::Error },

  #[error("failed to walk source tree: {0}")]
  Walk(#[from] walkdir::Error),

  #[error("failed to embed manifest: {0}")]
  EmbedManifest(#[source] io::Error),
}

/// Handle to the build output tree.
///
/// Passed by reference through the pipeline stages; paths are computed once
/// here and never reconstructed from the working directory.
#[derive(Debug, Clone)]
pub struct Workspace {
  root: PathBuf,
  app_dir: PathBuf,
}

impl Workspace {
  /// Create a handle rooted at the given path. No directories are created
  /// until [`reset`](Self::reset) runs.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    let app_dir = root.join(APP_SUBDIR);
    Self { root, app_dir }
  }

  /// Workspace root directory.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Destination of the staged application tree.
  pub fn app_dir(&self) -> &Path {
    &self.app_dir
  }

  /// Purge and recreate the workspace.
  ///
  /// Removes the entire root if present, then recreates the root and the
  /// application subtree. Idempotent: resetting an already-empty workspace
  /// succeeds and yields the same empty state.
  pub fn reset(&self) -> Result<(), WorkspaceError> {
    if self.root.exists() {
      fs::remove_dir_all(&self.root).map_err(|source| WorkspaceError::Reset {
        path: self.root.clone(),
        source,
      })?;
    }

    fs::create_dir_all(&self.app_dir).map_err(|source| WorkspaceError::Reset {
      path: self.app_dir.clone(),
      source,
    })?;

    info!("Reset workspace at {}", self.root.display());
    Ok(())
  }

  /// Stage the application source tree into the workspace.
  ///
  /// Copies `source` recursively into the app subtree, skipping excluded
  /// entry names (`.git`, `build`, `venv`, `__pycache__`) at every
  /// directory depth. If a `php` directory exists alongside the source it
  /// is also copied next to the app subtree, best-effort.
  ///
  /// A copy that fails partway is not rolled back; the workspace is marked
  /// dirty and the error is returned.
  pub fn copy_source(&self, source: &Path) -> Result<(), WorkspaceError> {
    if !source.exists() {
      return Err(WorkspaceError::SourceMissing(source.to_path_buf()));
    }

    info!("Staging {} into {}", source.display(), self.app_dir.display());

    if let Err(e) = copy_tree(source, &self.app_dir, &EXCLUDED_NAMES) {
      self.mark_dirty();
      return Err(e);
    }

    // Bundled runtime, if the source ships one. Absence is not an error and
    // a failed copy does not gate the build.
    let runtime_src = source.join(RUNTIME_SUBDIR);
    if runtime_src.is_dir() {
      info!("Copying bundled runtime from {}", runtime_src.display());
      if let Err(e) = copy_tree(&runtime_src, &self.root.join(RUNTIME_SUBDIR), &[]) {
        warn!("Failed to copy bundled runtime: {}", e);
      }
    }

    Ok(())
  }

  /// Copy the manifest document verbatim into the workspace root, so the
  /// compiled launcher can read it without re-parsing the original path.
  pub fn embed_manifest(&self, manifest_path: &Path) -> Result<(), WorkspaceError> {
    let dest = self.root.join(MANIFEST_FILENAME);
    fs::copy(manifest_path, &dest).map_err(WorkspaceError::EmbedManifest)?;
    debug!("Embedded manifest at {}", dest.display());
    Ok(())
  }

  /// Whether a previous staging copy failed partway, leaving the tree in an
  /// indeterminate state. Cleared by [`reset`](Self::reset).
  pub fn is_dirty(&self) -> bool {
    self.root.join(DIRTY_MARKER).exists()
  }

  fn mark_dirty(&self) {
    if let Err(e) = fs::write(self.root.join(DIRTY_MARKER), b"") {
      debug!("Could not write dirty marker: {}", e);
    }
  }
}

/// Whether an entry name is excluded from staging.
fn is_excluded(name: &std::ffi::OsStr, excluded: &[&str]) -> bool {
  excluded.iter().any(|pattern| name == *pattern)
}

/// Recursively copy `src` into `dst`, skipping excluded entry names at every
/// level. `dst` is created if missing.
fn copy_tree(src: &Path, dst: &Path, excluded: &[&str]) -> Result<(), WorkspaceError> {
  fs::create_dir_all(dst).map_err(|source| WorkspaceError::Copy {
    path: dst.to_path_buf(),
    source,
  })?;

  // The root itself is exempt from exclusion: only entries inside the tree
  // are matched against the excluded names
  let walker = WalkDir::new(src)
    .min_depth(1)
    .into_iter()
    .filter_entry(|e| e.depth() == 0 || !is_excluded(e.file_name(), excluded));

  for entry in walker {
    let entry = entry?;
    let rel = entry
      .path()
      .strip_prefix(src)
      .expect("walkdir yields paths under its root");
    let dest = dst.join(rel);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&dest).map_err(|source| WorkspaceError::Copy { path: dest, source })?;
    } else {
      fs::copy(entry.path(), &dest).map_err(|source| WorkspaceError::Copy { path: dest, source })?;
    }
  }

  Ok(())
}
