//! Auxiliary uninstall scripts.
//!
//! Bundles can ship a small uninstall entry point next to the launcher:
//! `uninstall.bat` for Windows targets, an executable `uninstall.sh`
//! elsewhere. Both invoke the launcher with `--uninstall`; the launcher owns
//! the actual cleanup.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::info;

use crate::target::TargetOs;
use crate::workspace::Workspace;

/// Write the uninstall script for the given target into the workspace root.
///
/// `launcher_name` is the file name of the compiled launcher the script
/// invokes, resolved relative to the script's own location.
pub fn write_uninstall_script(
  workspace: &Workspace,
  launcher_name: &str,
  os: TargetOs,
) -> io::Result<PathBuf> {
  let (file_name, content) = match os {
    TargetOs::Windows => (
      "uninstall.bat",
      format!("@echo off\r\n\"%~dp0{}\" --uninstall\r\npause\r\n", launcher_name),
    ),
    TargetOs::Linux | TargetOs::MacOs => (
      "uninstall.sh",
      format!("#!/bin/sh\n\"$(dirname \"$0\")/{}\" --uninstall\n", launcher_name),
    ),
  };

  let path = workspace.root().join(file_name);
  fs::write(&path, content)?;

  #[cfg(unix)]
  if os != TargetOs::Windows {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
  }

  info!("Generated {}", path.display());
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn temp_workspace() -> (Workspace, TempDir) {
    let temp = TempDir::new().unwrap();
    let ws = Workspace::new(temp.path().join("build"));
    ws.reset().unwrap();
    (ws, temp)
  }

  #[test]
  fn windows_script_invokes_launcher_and_pauses() {
    let (ws, _temp) = temp_workspace();

    let path = write_uninstall_script(&ws, "my_app.exe", TargetOs::Windows).unwrap();

    assert_eq!(path, ws.root().join("uninstall.bat"));
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("my_app.exe\" --uninstall"));
    assert!(content.contains("pause"));
  }

  #[test]
  fn unix_script_invokes_launcher() {
    let (ws, _temp) = temp_workspace();

    let path = write_uninstall_script(&ws, "demo", TargetOs::Linux).unwrap();

    assert_eq!(path, ws.root().join("uninstall.sh"));
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("#!/bin/sh\n"));
    assert!(content.contains("demo\" --uninstall"));
  }

  #[test]
  #[cfg(unix)]
  fn unix_script_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let (ws, _temp) = temp_workspace();
    let path = write_uninstall_script(&ws, "demo", TargetOs::MacOs).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0o111, "script should be executable");
  }
}
