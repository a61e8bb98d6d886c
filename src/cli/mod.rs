//! Command-line interface for eagle
//!
//! Provides `sources` and `show` subcommands over the same engine options the
//! library exposes.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eagle::{Engine, Format, Options};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod show;
mod sources;

/// Inspect layered YAML/JSON/INI/TOML configuration
#[derive(Parser)]
#[command(name = "eagle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    engine: EngineArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the contributing config files, highest priority first
    Sources,

    /// Print the overlay of all sources
    Show(show::ShowArgs),
}

/// Where the configuration lives and how it is layered.
#[derive(Args)]
pub struct EngineArgs {
    /// Directory containing the config files
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub base_path: PathBuf,

    /// Base config file name (default: first of application.{yaml,yml,json,ini,toml})
    #[arg(short, long, global = true, value_name = "FILE")]
    pub file: Option<String>,

    /// Active environment; selects the <name>-<env>.<ext> overlay
    #[arg(short, long, global = true, env = "EAGLE_ENV", value_name = "ENV")]
    pub env: Option<String>,

    /// Force the config format instead of inferring it from the extension
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Flatten embedded records into their parent's namespace
    #[arg(long, global = true)]
    pub merge_anonymous: bool,
}

impl EngineArgs {
    pub fn options(&self) -> Result<Options> {
        let mut options =
            Options::new().base_path(&self.base_path).merge_anonymous(self.merge_anonymous);
        if let Some(file) = &self.file {
            options = options.file_name(file);
        }
        if let Some(env) = &self.env {
            options = options.env(env);
        }
        if let Some(name) = &self.format {
            let format = Format::from_extension(name)
                .with_context(|| format!("Invalid config format '{}'", name))?;
            options = options.format(format);
        }
        Ok(options)
    }

    pub fn engine(&self) -> Result<Engine> {
        let options = self.options()?;
        Engine::new(options).with_context(|| {
            format!("Failed loading configuration from {}", self.base_path.display())
        })
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Sources => sources::run(&cli.engine),
        Commands::Show(args) => show::run(&cli.engine, args),
    }
}
