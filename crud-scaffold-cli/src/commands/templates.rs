//! Template set management

use anyhow::{Context, Result};
use clap::Subcommand;
use console::{style, Emoji};
use crud_scaffold::template::EmbeddedTemplates;
use std::path::PathBuf;

static SUCCESS: Emoji = Emoji("✓", "√");

/// Template commands
#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// Write the built-in templates to a directory for customization
    ///
    /// Point `templates.dir` at the directory afterwards. Files missing from
    /// it fall back to the built-in set.
    Export {
        /// Target directory
        dir: PathBuf,

        /// Overwrite templates that already exist
        #[arg(short, long)]
        force: bool,
    },
}

impl TemplatesCommand {
    pub fn execute(&self) -> Result<()> {
        match self {
            Self::Export { dir, force } => {
                let written = EmbeddedTemplates::export(dir, *force)
                    .with_context(|| format!("Failed to export templates to {}", dir.display()))?;
                for path in &written {
                    println!("  {} {}", style(SUCCESS).green(), style(path.display()).dim());
                }
                println!(
                    "\n{} {} templates to {}",
                    style("Exported").green().bold(),
                    written.len(),
                    dir.display()
                );
                Ok(())
            }
        }
    }
}
