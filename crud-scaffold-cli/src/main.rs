//! crud-scaffold CLI tool

#![forbid(unsafe_code)]

mod commands;
mod observability;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{ConfigCommand, GenerateCommand, TemplatesCommand};
use crud_scaffold::config::ScaffoldSettings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crud-scaffold")]
#[command(version)]
#[command(about = "Generate CRUD scaffolding from database tables", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file to use instead of the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate (or delete) the scaffold for one table
    Generate(GenerateCommand),
    /// Inspect settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Manage the template set
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },
}

fn load_settings(path: Option<&PathBuf>) -> Result<ScaffoldSettings> {
    match path {
        Some(path) => ScaffoldSettings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => ScaffoldSettings::load().context("Failed to load settings"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    match cli.command {
        Commands::Generate(command) => {
            let settings = load_settings(cli.config.as_ref())?;
            command.execute(settings)?;
        }
        Commands::Config { command } => {
            let settings = load_settings(cli.config.as_ref())?;
            command.execute(&settings)?;
        }
        Commands::Templates { command } => {
            command.execute()?;
        }
    }

    Ok(())
}
