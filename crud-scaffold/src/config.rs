//! Layered settings
//!
//! Settings are merged from, lowest priority first:
//! 1. Built-in defaults
//! 2. `/etc/crud-scaffold/config.toml`
//! 3. `~/.config/crud-scaffold/config.toml`
//! 4. `./crud-scaffold.toml`
//! 5. Environment variables (`CRUD_SCAFFOLD_*`, `__` for nesting)
//!
//! ```toml
//! [database]
//! url = "mysql://root@localhost/shop"
//! table_prefix = "ea_"
//!
//! [classifier]
//! match_mode = "suffix"
//! ignore = ["update_time", "delete_time"]
//!
//! [layout]
//! root = "../shop"
//!
//! [templates]
//! dir = "./templates"
//! ```

use crate::classify::ClassifierSettings;
use crate::error::{Result, ScaffoldError};
use crate::plan::{OutputLayout, RenderSettings};
use crate::template::{DirTemplateStore, EmbeddedTemplates, TemplateStore};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application name used for config directories and the env prefix
pub const APP_NAME: &str = "crud-scaffold";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "CRUD_SCAFFOLD_";

/// Project-local settings file
pub const LOCAL_CONFIG: &str = "crud-scaffold.toml";

/// Database connection (`[database]` section)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL for live introspection
    pub url: Option<String>,
    /// Prefix prepended to every table name for catalog lookups
    pub table_prefix: String,
}

/// Template source (`[templates]` section)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory whose `.code` files override the built-in templates
    pub dir: Option<PathBuf>,
}

impl TemplateSettings {
    /// Template store for these settings
    #[must_use]
    pub fn store(&self) -> Box<dyn TemplateStore> {
        match &self.dir {
            Some(dir) => Box::new(DirTemplateStore::new(dir)),
            None => Box::new(EmbeddedTemplates),
        }
    }
}

/// Complete settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldSettings {
    /// Database connection
    pub database: DatabaseSettings,
    /// Column classification
    pub classifier: ClassifierSettings,
    /// Output layout
    pub layout: OutputLayout,
    /// Rendering details
    pub render: RenderSettings,
    /// Template source
    pub templates: TemplateSettings,
}

impl ScaffoldSettings {
    /// Load settings from every standard location
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Settings`] if a settings file cannot be
    /// parsed or a value has the wrong type.
    pub fn load() -> Result<Self> {
        let files = [
            PathBuf::from("/etc").join(APP_NAME).join("config.toml"),
            Self::recommended_path(),
            PathBuf::from(LOCAL_CONFIG),
        ];

        let mut figment = Self::defaults()?;
        for file in files.iter().filter(|f| f.exists()) {
            tracing::debug!(path = %file.display(), "merging settings file");
            figment = figment.merge(Toml::file(file));
        }

        Self::extract(figment)
    }

    /// Load settings from one explicit file instead of the standard locations
    ///
    /// Defaults and environment variables still apply.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if `path` does not exist, or
    /// [`ScaffoldError::Settings`] if it cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ScaffoldError::Configuration(format!(
                "settings file {} does not exist",
                path.display()
            )));
        }

        Self::extract(Self::defaults()?.merge(Toml::file(path)))
    }

    /// User settings file (`~/.config/crud-scaffold/config.toml`)
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG),
            |config_dir| config_dir.join(APP_NAME).join("config.toml"),
        )
    }

    /// Effective settings as TOML
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Settings`] if the settings cannot be
    /// serialized.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| figment::Error::from(e.to_string()).into())
    }

    fn defaults() -> Result<Figment> {
        let defaults =
            toml::to_string(&Self::default()).map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let settings = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true))
            .extract()?;
        Ok(settings)
    }
}
