//! Table and column metadata
//!
//! The [`SchemaIntrospector`] trait is the only way metadata enters a build.
//! Two implementations ship with the crate: [`StaticIntrospector`], backed by
//! an offline TOML description, and (with the `mysql` feature)
//! [`MySqlIntrospector`], backed by `information_schema`.

mod file;
#[cfg(feature = "mysql")]
mod mysql;

pub use file::{SchemaFile, StaticIntrospector, TableSpec};
#[cfg(feature = "mysql")]
pub use mysql::MySqlIntrospector;

use crate::classify::FormType;
use crate::error::LookupError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column metadata as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumn {
    /// Column name
    pub name: String,
    /// Raw SQL type (`varchar(255)`, `int(10) unsigned`, ...)
    #[serde(rename = "type", default)]
    pub raw_type: String,
    /// Column comment, possibly empty
    #[serde(default)]
    pub comment: String,
    /// Whether the column accepts NULL
    #[serde(default)]
    pub nullable: bool,
    /// Column default, if any
    #[serde(default)]
    pub default: Option<String>,
}

/// Source of table and column metadata
pub trait SchemaIntrospector {
    /// Ordered column list of `table`
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::TableNotFound`] if the table does not exist, or
    /// another [`LookupError`] if the catalog cannot be queried.
    fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>, LookupError>;

    /// Table-level comment (empty if none)
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] if the catalog cannot be queried.
    fn table_comment(&self, table: &str) -> Result<String, LookupError>;

    /// Declared primary key column, if the table has one
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] if the catalog cannot be queried.
    fn primary_key(&self, table: &str) -> Result<Option<String>, LookupError>;
}

/// One column of a [`Table`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Raw SQL type
    pub raw_type: String,
    /// Human-readable label; the column name when the catalog has no comment
    pub comment: String,
    /// NOT NULL columns are required in forms
    pub required: bool,
    /// Column default
    pub default_value: Option<String>,
    /// Form type, `None` until classified
    pub form_type: Option<FormType>,
}

impl From<RawColumn> for Column {
    fn from(raw: RawColumn) -> Self {
        let comment = if raw.comment.trim().is_empty() {
            raw.name.clone()
        } else {
            raw.comment
        };

        Self {
            required: !raw.nullable,
            name: raw.name,
            raw_type: raw.raw_type,
            comment,
            default_value: raw.default,
            form_type: None,
        }
    }
}

impl Column {
    /// Classified form type, `text` if classification has not run
    #[must_use]
    pub fn form_type(&self) -> FormType {
        self.form_type.unwrap_or_default()
    }
}

/// A primary or related table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Unprefixed table name
    pub name: String,
    /// Table comment, the table name when the catalog has none
    pub comment: String,
    /// Columns in introspection order
    pub columns: IndexMap<String, Column>,
}

impl Table {
    /// Build a table from catalog output
    ///
    /// Later duplicates of a column name replace earlier ones, keeping the
    /// position of the first.
    #[must_use]
    pub fn new(name: impl Into<String>, comment: impl Into<String>, raw: Vec<RawColumn>) -> Self {
        let name = name.into();
        let comment = comment.into();
        let comment = if comment.trim().is_empty() {
            name.clone()
        } else {
            comment
        };

        let columns = raw
            .into_iter()
            .map(|c| (c.name.clone(), Column::from(c)))
            .collect();

        Self {
            name,
            comment,
            columns,
        }
    }

    /// Whether `name` is a column of this table
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Copy of this table without the named columns, order preserved
    #[must_use]
    pub fn without<S: AsRef<str>>(&self, ignore: &[S]) -> Self {
        let columns = self
            .columns
            .iter()
            .filter(|(name, _)| !ignore.iter().any(|i| i.as_ref() == name.as_str()))
            .map(|(name, column)| (name.clone(), column.clone()))
            .collect();

        Self {
            name: self.name.clone(),
            comment: self.comment.clone(),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, comment: &str, nullable: bool) -> RawColumn {
        RawColumn {
            name: name.to_string(),
            raw_type: "varchar(255)".to_string(),
            comment: comment.to_string(),
            nullable,
            default: None,
        }
    }

    #[test]
    fn test_comment_defaults_to_name() {
        let column = Column::from(raw("title", "", false));
        assert_eq!(column.comment, "title");
        assert!(column.required);

        let column = Column::from(raw("title", "Title", true));
        assert_eq!(column.comment, "Title");
        assert!(!column.required);
    }

    #[test]
    fn test_table_preserves_order() {
        let table = Table::new(
            "article",
            "",
            vec![raw("id", "", false), raw("title", "", false), raw("sort", "", false)],
        );
        assert_eq!(table.comment, "article");
        let names: Vec<_> = table.columns.keys().cloned().collect();
        assert_eq!(names, vec!["id", "title", "sort"]);
    }

    #[test]
    fn test_without_removes_ignored() {
        let table = Table::new(
            "article",
            "Articles",
            vec![raw("id", "", false), raw("update_time", "", true), raw("title", "", false)],
        );
        let filtered = table.without(&["update_time", "delete_time"]);
        assert!(!filtered.has_column("update_time"));
        let names: Vec<_> = filtered.columns.keys().cloned().collect();
        assert_eq!(names, vec!["id", "title"]);
        assert!(table.has_column("update_time"));
    }

    #[test]
    fn test_unclassified_form_type_is_text() {
        let column = Column::from(raw("title", "", false));
        assert_eq!(column.form_type(), FormType::Text);
    }
}
