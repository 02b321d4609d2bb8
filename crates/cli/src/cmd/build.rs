//! Implementation of the `shipkit build` command.
//!
//! Drives the build pipeline against the given source tree and manifest:
//! resets the workspace, stages the source, optionally applies a transform,
//! embeds the manifest, compiles the launcher, and generates uninstall
//! scripts when requested. Any fatal stage failure exits non-zero.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use shipkit_lib::compile::Compiler;
use shipkit_lib::pipeline::{BuildOptions, run_build};
use shipkit_lib::target::{Target, TargetOs};
use shipkit_lib::transform::TransformRegistry;

use crate::output::{format_duration, print_error, print_stat, print_success};

pub fn cmd_build(
  source: &Path,
  manifest: &Path,
  os: TargetOs,
  build_dir: PathBuf,
  compile_timeout: Duration,
) -> Result<()> {
  if !source.exists() {
    print_error(&format!("Source tree not found: {}", source.display()));
    std::process::exit(1);
  }

  let registry = TransformRegistry::builtin();
  let options = BuildOptions {
    target: Target::new(os),
    workspace_root: build_dir,
    compiler: Compiler::from_env(compile_timeout),
  };

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = match rt.block_on(run_build(manifest, source, &registry, &options)) {
    Ok(report) => report,
    Err(e) => {
      print_error(&format!("Build failed: {}", e));
      std::process::exit(1);
    }
  };

  println!();
  print_success("Build complete!");
  print_stat("Launcher", &report.binary.display().to_string());
  print_stat("Target", &options.target.to_string());
  print_stat(
    "Transform",
    if report.transform_applied { "applied" } else { "skipped" },
  );
  if let Some(script) = &report.uninstall_script {
    print_stat("Uninstall script", &script.display().to_string());
  }
  print_stat("Duration", &format_duration(report.duration));

  info!(workspace = %options.workspace_root.display(), "bundle written");

  Ok(())
}
