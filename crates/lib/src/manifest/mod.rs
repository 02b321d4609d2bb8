//! Build manifest loading.
//!
//! The manifest is the build's configuration document: a JSON file loaded
//! exactly once per build invocation and read-only thereafter. Every pipeline
//! stage reads through the loaded [`Manifest`]; none writes to it. The
//! document itself is later copied verbatim into the workspace so the
//! compiled launcher can read it at its own runtime.
//!
//! Unrecognized fields are ignored, not errors: the manifest schema is
//! shared with the launcher, which understands more keys than the builder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Fallback application name when the manifest does not set one.
const DEFAULT_APP_NAME: &str = "demo";

/// Errors raised while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("manifest not found: {0}")]
  NotFound(PathBuf),

  #[error("failed to read manifest: {0}")]
  Read(#[source] io::Error),

  #[error("malformed manifest: {0}")]
  Parse(#[source] serde_json::Error),
}

/// The build's configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
  /// Base name for the compiled launcher and generated scripts.
  #[serde(default = "default_app_name")]
  pub app_name: String,

  /// Advisory version string, logged only.
  #[serde(default)]
  pub app_version: Option<String>,

  /// Gate for the transform stage.
  #[serde(default)]
  pub scramble_code: bool,

  /// Name of a registered transform to run when `scramble_code` is set.
  #[serde(default)]
  pub scramble_plugin: Option<String>,

  /// Advisory icon location; embedding requires an external resource tool.
  #[serde(default)]
  pub icon_path: Option<PathBuf>,

  /// Gate for uninstall-script generation.
  #[serde(default)]
  pub uninstall_shortcut: bool,
}

fn default_app_name() -> String {
  DEFAULT_APP_NAME.to_string()
}

impl Manifest {
  /// Load a manifest document from disk.
  ///
  /// Pure read: no defaults are written back and no side effects occur.
  /// An unreadable path or malformed JSON is a fatal configuration error.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(ManifestError::NotFound(path.to_path_buf()));
      }
      Err(e) => return Err(ManifestError::Read(e)),
    };

    serde_json::from_str(&content).map_err(ManifestError::Parse)
  }

  /// Output base name derived from `app_name`: spaces become underscores
  /// and the result is lower-cased.
  pub fn normalized_app_name(&self) -> String {
    self.app_name.replace(' ', "_").to_lowercase()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;
  use tempfile::NamedTempFile;

  fn temp_manifest(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
  }

  #[test]
  fn load_minimal_manifest() {
    let file = temp_manifest(r#"{"app_name": "Demo"}"#);
    let manifest = Manifest::load(file.path()).unwrap();

    assert_eq!(manifest.app_name, "Demo");
    assert!(!manifest.scramble_code);
    assert!(!manifest.uninstall_shortcut);
    assert!(manifest.scramble_plugin.is_none());
  }

  #[test]
  fn app_name_defaults_to_demo() {
    let file = temp_manifest("{}");
    let manifest = Manifest::load(file.path()).unwrap();
    assert_eq!(manifest.app_name, "demo");
  }

  #[test]
  fn unknown_fields_are_ignored() {
    // The launcher reads keys the builder does not care about
    let file = temp_manifest(
      r#"{"app_name": "Demo", "php_port": 8080, "window_width": 1024, "env_vars": {"A": "b"}}"#,
    );
    let manifest = Manifest::load(file.path()).unwrap();
    assert_eq!(manifest.app_name, "Demo");
  }

  #[test]
  fn missing_manifest_is_not_found() {
    let result = Manifest::load(Path::new("/nonexistent/manifest.json"));
    assert!(matches!(result, Err(ManifestError::NotFound(_))));
  }

  #[test]
  fn malformed_manifest_is_parse_error() {
    let file = temp_manifest("not valid json {{{");
    let result = Manifest::load(file.path());
    assert!(matches!(result, Err(ManifestError::Parse(_))));
  }

  #[test]
  fn normalized_app_name_lowercases_and_underscores() {
    let file = temp_manifest(r#"{"app_name": "My App"}"#);
    let manifest = Manifest::load(file.path()).unwrap();
    assert_eq!(manifest.normalized_app_name(), "my_app");
  }

  #[test]
  fn scramble_fields_round_trip() {
    let file = temp_manifest(r#"{"scramble_code": true, "scramble_plugin": "marker"}"#);
    let manifest = Manifest::load(file.path()).unwrap();
    assert!(manifest.scramble_code);
    assert_eq!(manifest.scramble_plugin.as_deref(), Some("marker"));
  }
}
