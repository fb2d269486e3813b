//! Settings inspection commands

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use crud_scaffold::config::ScaffoldSettings;

/// Settings commands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings as TOML
    Show,

    /// Print where the user settings file is read from
    Path,
}

impl ConfigCommand {
    pub fn execute(&self, settings: &ScaffoldSettings) -> Result<()> {
        match self {
            Self::Show => {
                let text = settings
                    .to_toml()
                    .context("Failed to serialize settings")?;
                print!("{text}");
            }
            Self::Path => {
                let path = ScaffoldSettings::recommended_path();
                let marker = if path.is_file() {
                    style("(exists)").green()
                } else {
                    style("(not created)").dim()
                };
                println!("{} {marker}", path.display());
            }
        }
        Ok(())
    }
}
