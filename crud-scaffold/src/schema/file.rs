//! Offline schema descriptions
//!
//! ```toml
//! [tables.ea_article]
//! comment = "Articles"
//! primary_key = "id"
//!
//! [[tables.ea_article.columns]]
//! name = "id"
//! type = "int(10) unsigned"
//!
//! [[tables.ea_article.columns]]
//! name = "title"
//! type = "varchar(255)"
//! comment = "Title"
//! ```

use super::{RawColumn, SchemaIntrospector};
use crate::error::LookupError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One table in a [`SchemaFile`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Table comment
    #[serde(default)]
    pub comment: String,
    /// Primary key column
    #[serde(default)]
    pub primary_key: Option<String>,
    /// Columns in declaration order
    #[serde(default)]
    pub columns: Vec<RawColumn>,
}

/// Tables keyed by their physical (prefixed) name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Table descriptions
    #[serde(default)]
    pub tables: IndexMap<String, TableSpec>,
}

impl SchemaFile {
    /// Parse a schema description from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Schema`] if the text is not a valid description.
    pub fn from_toml_str(text: &str) -> Result<Self, LookupError> {
        toml::from_str(text).map_err(|e| LookupError::Schema(e.to_string()))
    }

    /// Read a schema description from disk
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Schema`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LookupError::Schema(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

/// In-memory introspector over a [`SchemaFile`]
#[derive(Debug, Clone, Default)]
pub struct StaticIntrospector {
    schema: SchemaFile,
}

impl StaticIntrospector {
    /// Wrap a parsed schema description
    #[must_use]
    pub const fn new(schema: SchemaFile) -> Self {
        Self { schema }
    }

    /// Add or replace a table
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, spec: TableSpec) -> Self {
        self.schema.tables.insert(name.into(), spec);
        self
    }

    fn table(&self, table: &str) -> Result<&TableSpec, LookupError> {
        self.schema
            .tables
            .get(table)
            .ok_or_else(|| LookupError::TableNotFound(table.to_string()))
    }
}

impl SchemaIntrospector for StaticIntrospector {
    fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>, LookupError> {
        Ok(self.table(table)?.columns.clone())
    }

    fn table_comment(&self, table: &str) -> Result<String, LookupError> {
        Ok(self.table(table)?.comment.clone())
    }

    fn primary_key(&self, table: &str) -> Result<Option<String>, LookupError> {
        Ok(self.table(table)?.primary_key.clone())
    }
}
