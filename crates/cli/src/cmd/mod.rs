mod build;
mod clean;
mod info;
mod transforms;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use info::cmd_info;
pub use transforms::cmd_transforms;
