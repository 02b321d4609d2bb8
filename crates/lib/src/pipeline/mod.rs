//! Build pipeline orchestration.
//!
//! Stages run strictly forward, with no loops and no backward edges:
//!
//! `Reset → CopySource → Transform → EmbedConfig → CompileLauncher →
//! [GenerateAuxiliaryScripts]`
//!
//! Every stage runs to completion or the pipeline aborts at that stage; a
//! failed build must be re-run from `Reset`. Execution is fully sequential:
//! the single in-flight run exclusively owns the workspace, and the external
//! compiler invocation blocks until it exits or times out.
//!
//! Failure policy (see the per-module error types):
//! - manifest errors abort before any workspace mutation,
//! - workspace errors are fatal and may leave a dirty workspace,
//! - transform errors are soft: logged, build continues untransformed,
//! - compile errors are fatal.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::compile::{CompileError, Compiler, DEFAULT_COMPILE_TIMEOUT, output_name};
use crate::consts::DEFAULT_BUILD_DIR;
use crate::manifest::{Manifest, ManifestError};
use crate::scripts;
use crate::target::Target;
use crate::transform::TransformRegistry;
use crate::workspace::{Workspace, WorkspaceError};

/// Fatal pipeline failures, wrapping the failing stage's error.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("configuration: {0}")]
  Manifest(#[from] ManifestError),

  #[error("workspace: {0}")]
  Workspace(#[from] WorkspaceError),

  #[error("compilation: {0}")]
  Compile(#[from] CompileError),

  #[error("failed to write uninstall script: {0}")]
  Script(#[source] std::io::Error),
}

/// Options for a single pipeline run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  /// Platform the launcher is compiled for.
  pub target: Target,
  /// Root of the build workspace.
  pub workspace_root: PathBuf,
  /// Invoker for the external launcher compiler.
  pub compiler: Compiler,
}

impl BuildOptions {
  /// Options for the given target with the default workspace root and
  /// environment-derived compiler.
  pub fn new(target: Target) -> Self {
    Self {
      target,
      workspace_root: PathBuf::from(DEFAULT_BUILD_DIR),
      compiler: Compiler::from_env(DEFAULT_COMPILE_TIMEOUT),
    }
  }
}

/// Summary of a completed build.
#[derive(Debug)]
pub struct BuildReport {
  /// Path of the compiled launcher inside the workspace.
  pub binary: PathBuf,
  /// Whether a transform ran to completion over the staged tree.
  pub transform_applied: bool,
  /// Path of the generated uninstall script, if one was requested.
  pub uninstall_script: Option<PathBuf>,
  /// Wall-clock duration of the whole pipeline.
  pub duration: Duration,
}

/// Run the build pipeline to completion.
///
/// Loads the manifest once, then drives every stage in order against a
/// freshly reset workspace. Returns the report on success; the first fatal
/// stage failure aborts the run.
pub async fn run_build(
  manifest_path: &Path,
  source: &Path,
  registry: &TransformRegistry,
  options: &BuildOptions,
) -> Result<BuildReport, BuildError> {
  let start = Instant::now();

  // Configuration errors must abort before any workspace mutation
  let manifest = Manifest::load(manifest_path)?;
  match &manifest.app_version {
    Some(version) => info!("Building {} {}", manifest.app_name, version),
    None => info!("Building {}", manifest.app_name),
  }

  let workspace = Workspace::new(&options.workspace_root);
  workspace.reset()?;
  workspace.copy_source(source)?;

  let transform_applied = transform_stage(&manifest, registry, &workspace);

  workspace.embed_manifest(manifest_path)?;

  let binary = options
    .compiler
    .compile(&workspace, &manifest, options.target)
    .await?;

  let uninstall_script = if manifest.uninstall_shortcut {
    let launcher = output_name(&manifest, options.target.os);
    let path = scripts::write_uninstall_script(&workspace, &launcher, options.target.os)
      .map_err(BuildError::Script)?;
    Some(path)
  } else {
    None
  };

  info!("Build complete in {:.1}s", start.elapsed().as_secs_f64());

  Ok(BuildReport {
    binary,
    transform_applied,
    uninstall_script,
    duration: start.elapsed(),
  })
}

/// Transform stage.
///
/// Soft-fails: an unset name, an unregistered name, or a failing transform
/// logs a warning and the build proceeds untransformed.
fn transform_stage(manifest: &Manifest, registry: &TransformRegistry, workspace: &Workspace) -> bool {
  if !manifest.scramble_code {
    info!("Scrambling disabled");
    return false;
  }

  let Some(name) = manifest.scramble_plugin.as_deref() else {
    warn!("scramble_code is set but no scramble_plugin is named; skipping transform");
    return false;
  };

  let Some(transform) = registry.get(name) else {
    warn!("Transform '{}' is not registered; skipping transform", name);
    return false;
  };

  info!("Applying transform '{}'", name);
  match transform.process(workspace.app_dir()) {
    Ok(()) => true,
    Err(e) => {
      warn!("Transform '{}' failed: {}; bundle left untransformed", name, e);
      false
    }
  }
}
