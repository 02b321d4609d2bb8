pub mod arch;
pub mod os;

use std::fmt;

pub use arch::TargetArch;
pub use os::TargetOs;

/// Target platform for a launcher build (e.g., "amd64-windows")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
  pub os: TargetOs,
  pub arch: TargetArch,
}

impl Target {
  /// Create a target for the given OS on the default architecture
  pub fn new(os: TargetOs) -> Self {
    Self {
      os,
      arch: TargetArch::default(),
    }
  }

  /// Detect the platform shipkit itself is running on
  ///
  /// Returns `None` if the host OS or architecture is not a supported
  /// bundle target
  pub fn host() -> Option<Self> {
    Some(Self {
      os: TargetOs::host()?,
      arch: TargetArch::host()?,
    })
  }

  /// Returns the platform triple string (e.g., "amd64-linux")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn triple_format() {
    let target = Target::new(TargetOs::MacOs);
    assert_eq!(target.triple(), "amd64-darwin");

    let target = Target::new(TargetOs::Linux);
    assert_eq!(target.triple(), "amd64-linux");
  }
}
