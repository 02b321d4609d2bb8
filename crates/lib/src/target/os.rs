use std::fmt;
use std::str::FromStr;

/// Operating systems the launcher can be compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
  Linux,
  Windows,
  MacOs,
}

impl TargetOs {
  /// Detect the operating system shipkit itself is running on
  pub fn host() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "windows" => Some(Self::Windows),
      "macos" => Some(Self::MacOs),
      _ => None,
    }
  }

  /// Returns the lowercase identifier for this OS, as the Go toolchain
  /// expects it in `GOOS`
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::Windows => "windows",
      Self::MacOs => "darwin",
    }
  }

  /// Executable suffix for binaries built for this OS
  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Windows => ".exe",
      Self::Linux | Self::MacOs => "",
    }
  }
}

impl fmt::Display for TargetOs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for TargetOs {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "linux" => Ok(Self::Linux),
      "windows" => Ok(Self::Windows),
      "darwin" | "macos" => Ok(Self::MacOs),
      other => Err(format!("unknown target OS '{}' (expected linux, windows or darwin)", other)),
    }
  }
}
