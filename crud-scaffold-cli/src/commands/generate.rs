//! Scaffold generation for one table
//!
//! ```bash
//! crud-scaffold generate --table mall_goods \
//!   --relation mall_cate:cate_id \
//!   --schema schema.toml
//! ```

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use crud_scaffold::builder::ScaffoldBuilder;
use crud_scaffold::config::ScaffoldSettings;
use crud_scaffold::relation::RelationOptions;
#[cfg(feature = "mysql")]
use crud_scaffold::schema::MySqlIntrospector;
use crud_scaffold::schema::{SchemaFile, SchemaIntrospector, StaticIntrospector};
use crud_scaffold::sink::LocalFileSink;
use crud_scaffold::ScaffoldError;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use std::path::PathBuf;

/// A `--relation` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationArg {
    table: String,
    foreign_key: String,
    options: RelationOptions,
}

/// Parse `table:foreign_key[:primary_key[:Model]]`
fn parse_relation(spec: &str) -> Result<RelationArg, String> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    let non_empty = |index: usize| {
        parts
            .get(index)
            .filter(|part| !part.is_empty())
            .map(|part| (*part).to_string())
    };

    if parts.len() > 4 {
        return Err(format!("too many fields in `{spec}`"));
    }
    let (Some(table), Some(foreign_key)) = (non_empty(0), non_empty(1)) else {
        return Err(format!("expected table:foreign_key[:primary_key[:Model]], got `{spec}`"));
    };

    Ok(RelationArg {
        table,
        foreign_key,
        options: RelationOptions {
            primary_key: non_empty(2),
            model_name: non_empty(3),
        },
    })
}

/// `generate` arguments
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Table name, without the configured prefix
    #[arg(short, long)]
    table: String,

    /// Related table as `table:foreign_key[:primary_key[:Model]]` (repeatable)
    #[arg(short, long = "relation", value_name = "SPEC", value_parser = parse_relation)]
    relations: Vec<RelationArg>,

    /// Controller path such as `mall/GoodsCate`, instead of deriving it from the table
    #[arg(short, long)]
    controller: Option<String>,

    /// Overwrite existing files
    #[arg(short, long)]
    force: bool,

    /// Delete the generated files instead of writing them
    #[arg(short, long)]
    delete: bool,

    /// Print the planned files without touching the disk
    #[arg(long)]
    dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    json: bool,

    /// Do not ask for confirmation before deleting
    #[arg(short, long)]
    yes: bool,

    /// Offline schema description (TOML)
    #[arg(long, value_name = "FILE", conflicts_with = "database_url")]
    schema: Option<PathBuf>,

    /// Database to introspect, overriding `database.url`
    #[arg(long, value_name = "URL")]
    database_url: Option<String>,
}

impl GenerateCommand {
    pub fn execute(self, settings: ScaffoldSettings) -> Result<()> {
        if !self.json {
            println!(
                "\n{} {} {}",
                style("Scaffolding").cyan().bold(),
                style(&self.table).green().bold(),
                style("...").cyan().bold()
            );
        }

        tracing::debug!(
            table = %self.table,
            relations = self.relations.len(),
            dry_run = self.dry_run,
            delete = self.delete,
            "generate requested"
        );
        let introspector = self.introspector(&settings)?;
        let mut builder = ScaffoldBuilder::new(introspector, settings);

        builder
            .select_table(&self.table)
            .with_context(|| format!("Failed to load table `{}`", self.table))?;
        for relation in &self.relations {
            builder
                .add_relation(&relation.table, &relation.foreign_key, relation.options.clone())
                .with_context(|| format!("Failed to add relation `{}`", relation.table))?;
        }
        if let Some(controller) = &self.controller {
            builder.override_output_naming(controller)?;
        }
        builder.set_force(self.force);
        builder.set_delete(self.delete);

        if self.dry_run {
            self.print_plan(&mut builder)
        } else if builder.is_delete() {
            self.delete(&mut builder)
        } else {
            Self::write(&mut builder)
        }
    }

    fn introspector(&self, settings: &ScaffoldSettings) -> Result<Box<dyn SchemaIntrospector>> {
        if let Some(path) = &self.schema {
            let schema = SchemaFile::load(path)
                .with_context(|| format!("Failed to read schema {}", path.display()))?;
            return Ok(Box::new(StaticIntrospector::new(schema)));
        }

        let url = self
            .database_url
            .clone()
            .or_else(|| settings.database.url.clone())
            .context("No schema source: pass --schema or --database-url, or set database.url")?;
        connect(&url)
    }

    fn print_plan(&self, builder: &mut ScaffoldBuilder) -> Result<()> {
        let artifact = builder.plan().context("Failed to plan scaffold")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(artifact)?);
            return Ok(());
        }

        println!(
            "\n{} {} files:",
            style("Planned").cyan().bold(),
            artifact.len()
        );
        for file in artifact.files() {
            println!(
                "  {} {} ({})",
                style("•").cyan(),
                style(file.path.display()).dim(),
                style(&file.description).dim()
            );
        }
        Ok(())
    }

    fn delete(&self, builder: &mut ScaffoldBuilder) -> Result<()> {
        let artifact = builder.plan().context("Failed to plan scaffold")?;
        println!("\n{}", style("Files to delete if present:").cyan().bold());
        for path in artifact.paths() {
            println!("  {} {}", style("-").red(), style(path.display()).dim());
        }
        println!();

        if !self.yes {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Delete these files?")
                .default(false)
                .interact()?;
            if !confirmed {
                println!("  {}", style("Aborted.").dim());
                return Ok(());
            }
        }

        let deleted = builder
            .discard(&LocalFileSink)
            .context("Failed to delete scaffold")?;
        if deleted.is_empty() {
            println!("  {}", style("Nothing to delete.").dim());
        }
        for path in &deleted {
            println!("  {} {}", style("✓").green(), style(path.display()).dim());
        }
        println!(
            "\n{} {} files",
            style("Deleted").green().bold(),
            deleted.len()
        );
        Ok(())
    }

    fn write(builder: &mut ScaffoldBuilder) -> Result<()> {
        match builder.commit(&LocalFileSink) {
            Ok(written) => {
                println!(
                    "\n{} {} files:",
                    style("Generated").green().bold(),
                    written.len()
                );
                for path in &written {
                    println!("  {} {}", style("✓").green(), style(path.display()).dim());
                }
                println!("\n{} scaffold is ready!", style("✨").green().bold());
                Ok(())
            }
            Err(ScaffoldError::Conflict { paths }) => {
                println!("\n{}", style("These files already exist:").yellow().bold());
                for path in &paths {
                    println!("  {} {}", style("!").yellow(), style(path.display()).dim());
                }
                println!(
                    "\nRe-run with {} to overwrite them.",
                    style("--force").yellow()
                );
                anyhow::bail!("{} output file(s) already exist", paths.len())
            }
            Err(ScaffoldError::PartialWrite {
                written,
                path,
                source,
            }) => {
                for done in &written {
                    println!("  {} {}", style("✓").green(), style(done.display()).dim());
                }
                Err(source).with_context(|| {
                    format!(
                        "Failed to write {} after writing {} file(s)",
                        path.display(),
                        written.len()
                    )
                })
            }
            Err(err) => Err(err).context("Failed to write scaffold"),
        }
    }
}

#[cfg(feature = "mysql")]
fn connect(url: &str) -> Result<Box<dyn SchemaIntrospector>> {
    let introspector = MySqlIntrospector::connect(url).context("Failed to connect to database")?;
    Ok(Box::new(introspector))
}

#[cfg(not(feature = "mysql"))]
fn connect(_url: &str) -> Result<Box<dyn SchemaIntrospector>> {
    anyhow::bail!("Live introspection needs the `mysql` feature; pass --schema instead")
}
