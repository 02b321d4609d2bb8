//! Workspace layout constants.

/// Default build workspace root, relative to the invocation directory.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Subdirectory of the workspace that receives the staged application tree.
pub const APP_SUBDIR: &str = "app";

/// Optional runtime-support directory copied from the source tree, if present.
pub const RUNTIME_SUBDIR: &str = "php";

/// File name of the manifest copy embedded in the workspace.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Marker file left in the workspace root after a failed staging copy.
pub const DIRTY_MARKER: &str = ".shipkit-dirty";

/// Entry names excluded from the staging copy at every directory depth:
/// version-control metadata, prior build outputs, virtual environments, and
/// bytecode caches.
pub const EXCLUDED_NAMES: [&str; 4] = [".git", "build", "venv", "__pycache__"];
