use std::path::Path;

use tracing::info;

use super::{Transform, TransformError};

/// Transform that leaves every file untouched.
#[derive(Debug, Default)]
pub struct NoopTransform;

impl Transform for NoopTransform {
  fn name(&self) -> &'static str {
    "noop"
  }

  fn process(&self, _dir: &Path) -> Result<(), TransformError> {
    info!("No-op transform: files left untouched");
    Ok(())
  }
}
