//! Command line front end for inspecting and validating asset settings.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use asset_settings::{ResolverConfig, SettingsResolver, load_raw_settings};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "asset-settings", version, about = "Resolve and validate asset pipeline settings")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print every effective value after placeholder expansion and defaults.
  Resolve {
    /// JSON or YAML settings document.
    settings: PathBuf,
    /// Environment configuration; discovered next to the settings file when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
  },
  /// Check the settings and print one line per error.
  Validate {
    /// JSON or YAML settings document.
    settings: PathBuf,
    /// Environment configuration; discovered next to the settings file when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
  },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
  Json,
  Yaml,
}

fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  match Cli::parse().command {
    Command::Resolve {
      settings,
      config,
      format,
    } => {
      let resolver = load_resolver(&settings, config.as_deref())?;
      let resolved = resolver.resolve();
      let rendered = match format {
        Format::Json => serde_json::to_string_pretty(&resolved)?,
        Format::Yaml => serde_yaml::to_string(&resolved)?,
      };
      println!("{rendered}");
      Ok(ExitCode::SUCCESS)
    }
    Command::Validate { settings, config } => {
      let mut resolver = load_resolver(&settings, config.as_deref())?;
      let errors = resolver.validate(true);
      if errors.is_empty() {
        println!("{} is valid", settings.display());
        return Ok(ExitCode::SUCCESS);
      }
      for error in errors {
        println!("{error}");
      }
      Ok(ExitCode::FAILURE)
    }
  }
}

fn load_resolver(settings: &Path, config: Option<&Path>) -> Result<SettingsResolver> {
  let raw = load_raw_settings(settings)
    .with_context(|| format!("failed to load settings from {}", settings.display()))?;

  let config = match config {
    Some(path) => ResolverConfig::from_path(path)
      .with_context(|| format!("failed to load configuration from {}", path.display()))?,
    None => {
      let dir = settings.parent().unwrap_or_else(|| Path::new("."));
      ResolverConfig::discover(dir)
    }
  };

  Ok(config.resolver(raw))
}
