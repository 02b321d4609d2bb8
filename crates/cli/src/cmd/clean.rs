use std::path::Path;

use anyhow::{Context, Result};

use shipkit_lib::workspace::Workspace;

use crate::output::print_success;

/// Reset the build workspace: purge the output tree and recreate it empty.
pub fn cmd_clean(build_dir: &Path) -> Result<()> {
  let workspace = Workspace::new(build_dir);
  workspace.reset().context("Failed to reset workspace")?;

  print_success(&format!("Workspace reset at {}", build_dir.display()));
  Ok(())
}
