use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shipkit_lib::target::TargetOs;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

/// shipkit - package an application into a native launcher bundle
#[derive(Parser)]
#[command(name = "shipkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build a distributable bundle from an application source tree
  Build {
    /// Path to the application source tree
    source: PathBuf,

    /// Path to the build manifest
    #[arg(long, default_value = "manifest.json")]
    manifest: PathBuf,

    /// Target operating system for the launcher
    #[arg(long = "os", default_value = "linux", value_parser = parse_target_os)]
    os: TargetOs,

    /// Root of the build workspace
    #[arg(long, default_value = "build")]
    build_dir: PathBuf,

    /// Ceiling on the launcher compiler invocation (e.g. "90s", "5m")
    #[arg(long, default_value = "5m", value_parser = humantime::parse_duration)]
    compile_timeout: Duration,
  },

  /// Reset the build workspace to an empty state
  Clean {
    /// Root of the build workspace
    #[arg(long, default_value = "build")]
    build_dir: PathBuf,
  },

  /// List the registered code transforms
  Transforms,

  /// Show version and host platform information
  Info,
}

fn parse_target_os(s: &str) -> Result<TargetOs, String> {
  s.parse()
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Build {
      source,
      manifest,
      os,
      build_dir,
      compile_timeout,
    } => cmd::cmd_build(&source, &manifest, os, build_dir, compile_timeout),
    Commands::Clean { build_dir } => cmd::cmd_clean(&build_dir),
    Commands::Transforms => cmd::cmd_transforms(),
    Commands::Info => cmd::cmd_info(),
  }
}
