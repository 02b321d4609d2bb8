use std::fmt;

/// CPU architectures the launcher can be compiled for
///
/// Bundles are currently produced for a single 64-bit architecture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TargetArch {
  #[default]
  Amd64,
}

impl TargetArch {
  /// Detect the architecture shipkit itself is running on
  pub fn host() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86_64" => Some(Self::Amd64),
      _ => None,
    }
  }

  /// Returns the lowercase identifier for this architecture, as the Go
  /// toolchain expects it in `GOARCH`
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Amd64 => "amd64",
    }
  }
}

impl fmt::Display for TargetArch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
