use shipkit_lib::target::{Target, TargetOs};

/// Show version, host platform and supported bundle targets.
pub fn cmd_info() -> anyhow::Result<()> {
  println!("shipkit v{}", env!("CARGO_PKG_VERSION"));

  match Target::host() {
    Some(host) => println!("Host platform: {}", host),
    None => println!("Host platform: not a supported bundle target"),
  }

  let targets: Vec<String> = [TargetOs::Linux, TargetOs::Windows, TargetOs::MacOs]
    .iter()
    .map(|os| os.to_string())
    .collect();
  println!("Bundle targets: {}", targets.join(", "));

  Ok(())
}
