use shipkit_lib::transform::TransformRegistry;

use crate::output::print_info;

/// List the code transforms a manifest can name in `scramble_plugin`.
pub fn cmd_transforms() -> anyhow::Result<()> {
  let registry = TransformRegistry::builtin();

  println!("Registered transforms:");
  for name in registry.names() {
    print_info(name);
  }

  Ok(())
}
