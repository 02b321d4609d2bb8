use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use super::{Transform, TransformError};

/// Extension of files eligible for rewriting.
const SOURCE_EXT: &str = "php";

/// Leading tag consumed and re-emitted together with the marker.
const OPENING_TAG: &str = "<?php";

/// Comment stamped into each rewritten file.
const MARKER: &str = "/* scrambled by shipkit */";

/// Reference transform: stamps a marker comment into every PHP file.
///
/// The first occurrence of the opening tag is consumed and re-emitted fused
/// with the marker, so the rewritten file still begins with its required
/// leading token and the marker is the first construct after it. The
/// remaining content follows unmodified.
///
/// Re-applying the transform consumes the tag it previously emitted and
/// stamps another marker: it is not idempotent.
#[derive(Debug, Default)]
pub struct MarkerTransform;

impl Transform for MarkerTransform {
  fn name(&self) -> &'static str {
    "marker"
  }

  fn process(&self, dir: &Path) -> Result<(), TransformError> {
    info!("Scrambling files in {}", dir.display());

    for entry in WalkDir::new(dir) {
      let entry = entry?;
      if !entry.file_type().is_file() {
        continue;
      }
      if entry.path().extension().and_then(|e| e.to_str()) == Some(SOURCE_EXT) {
        scramble_file(entry.path())?;
      }
    }

    Ok(())
  }
}

fn scramble_file(path: &Path) -> Result<(), TransformError> {
  let rewrite_err = |source| TransformError::Rewrite {
    path: path.to_path_buf(),
    source,
  };

  let content = fs::read_to_string(path).map_err(rewrite_err)?;
  let body = content.replacen(OPENING_TAG, "", 1);

  fs::write(path, format!("{} {}\n{}", OPENING_TAG, MARKER, body)).map_err(rewrite_err)?;
  debug!("Scrambled {}", path.display());
  Ok(())
}
