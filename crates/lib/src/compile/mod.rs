//! Launcher compilation.
//!
//! Invokes the external Go toolchain as a synchronous subprocess to build
//! the native launcher for a target platform. The invocation is a fixed
//! command line, `go build -o <output> <entry>`, with `GOOS`/`GOARCH`
//! selectors carried in the environment. Compilation failure is fatal.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::manifest::Manifest;
use crate::target::{Target, TargetOs};
use crate::workspace::Workspace;

/// External toolchain command used to build the launcher.
const DEFAULT_TOOLCHAIN: &str = "go";

/// Environment variable overriding the toolchain command.
const TOOLCHAIN_ENV: &str = "SHIPKIT_GO";

/// Launcher entry source compiled into the native binary.
const DEFAULT_ENTRY: &str = "src/launcher/main.go";

/// Environment variable overriding the launcher entry source.
const ENTRY_ENV: &str = "SHIPKIT_LAUNCHER_SRC";

/// Default ceiling on a single compiler invocation.
pub const DEFAULT_COMPILE_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors raised while compiling the launcher. All of them are fatal to the
/// build.
#[derive(Debug, Error)]
pub enum CompileError {
  #[error("toolchain '{toolchain}' not found: {source}")]
  ToolchainMissing { toolchain: String, source: io::Error },

  #[error("failed to invoke '{toolchain}': {source}")]
  Spawn { toolchain: String, source: io::Error },

  #[error("launcher compilation failed with exit code {code:?}")]
  Failed { code: Option<i32> },

  #[error("launcher compilation timed out after {0}s")]
  TimedOut(u64),
}

/// Output file name for the compiled launcher: normalized app name, with the
/// platform executable suffix appended for Windows targets.
pub fn output_name(manifest: &Manifest, os: TargetOs) -> String {
  format!("{}{}", manifest.normalized_app_name(), os.exe_suffix())
}

/// Invoker for the external launcher compiler.
#[derive(Debug, Clone)]
pub struct Compiler {
  pub toolchain: String,
  pub entry: PathBuf,
  pub timeout: Duration,
}

impl Compiler {
  /// Create an invoker with explicit toolchain and entry source.
  pub fn new(toolchain: impl Into<String>, entry: impl Into<PathBuf>, timeout: Duration) -> Self {
    Self {
      toolchain: toolchain.into(),
      entry: entry.into(),
      timeout,
    }
  }

  /// Create an invoker from the defaults, honoring the `SHIPKIT_GO` and
  /// `SHIPKIT_LAUNCHER_SRC` environment overrides.
  pub fn from_env(timeout: Duration) -> Self {
    let toolchain = std::env::var(TOOLCHAIN_ENV).unwrap_or_else(|_| DEFAULT_TOOLCHAIN.to_string());
    let entry = std::env::var(ENTRY_ENV)
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENTRY));
    Self::new(toolchain, entry, timeout)
  }

  /// Compile the launcher into the workspace root.
  ///
  /// Blocks until the external compiler exits or the configured timeout
  /// elapses. On success the binary is left at the returned path.
  pub async fn compile(
    &self,
    workspace: &Workspace,
    manifest: &Manifest,
    target: Target,
  ) -> Result<PathBuf, CompileError> {
    let output_path = workspace.root().join(output_name(manifest, target.os));

    info!("Compiling launcher for {} to {}", target, output_path.display());

    // Icon embedding needs an external resource tool (e.g. rsrc); advisory
    // only, never gates the build.
    if target.os == TargetOs::Windows {
      if let Some(icon) = &manifest.icon_path {
        if icon.exists() {
          info!(
            "Icon configured at {}; install the 'rsrc' tool to embed it in the launcher",
            icon.display()
          );
        } else {
          warn!("Configured icon {} does not exist; skipping", icon.display());
        }
      }
    }

    let mut command = Command::new(&self.toolchain);
    command
      .arg("build")
      .arg("-o")
      .arg(&output_path)
      .arg(&self.entry)
      .env("GOOS", target.os.as_str())
      .env("GOARCH", target.arch.as_str())
      .kill_on_drop(true);

    debug!(toolchain = %self.toolchain, entry = %self.entry.display(), "spawning compiler");

    let output = match timeout(self.timeout, command.output()).await {
      Err(_) => return Err(CompileError::TimedOut(self.timeout.as_secs())),
      Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
        return Err(CompileError::ToolchainMissing {
          toolchain: self.toolchain.clone(),
          source: e,
        });
      }
      Ok(Err(e)) => {
        return Err(CompileError::Spawn {
          toolchain: self.toolchain.clone(),
          source: e,
        });
      }
      Ok(Ok(output)) => output,
    };

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if !stderr.is_empty() {
        warn!(stderr = %stderr, "compiler stderr");
      }
      return Err(CompileError::Failed {
        code: output.status.code(),
      });
    }

    info!("Launcher compiled to {}", output_path.display());
    Ok(output_path)
  }
}
