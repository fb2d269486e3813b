//! Relations between the primary table and auxiliary tables

use crate::error::{LookupError, Result, ScaffoldError};
use crate::naming::NamingTransformer;
use crate::schema::{SchemaIntrospector, Table};
use indexmap::IndexMap;
use serde::Serialize;

/// A declared foreign-key link to an auxiliary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    /// Unprefixed related table name
    pub table: String,
    /// Model class generated for the related table
    pub model_name: String,
    /// Column on the primary table holding the reference
    pub foreign_key: String,
    /// Referenced column on the related table
    pub primary_key: String,
    /// Related table metadata
    pub columns: Table,
}

impl Relation {
    /// Accessor name on the primary model (`mall_cate` → `mallCate`)
    #[must_use]
    pub fn accessor(&self) -> String {
        NamingTransformer::relation_accessor(&self.table)
    }
}

/// Optional overrides for [`RelationSet::resolve`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationOptions {
    /// Referenced column; defaults to the related table's primary key
    pub primary_key: Option<String>,
    /// Model class name; defaults to the `PascalCase` table name
    pub model_name: Option<String>,
}

/// Relations keyed by related table, in declaration order
///
/// Declaring the same related table twice replaces the earlier relation in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet {
    relations: IndexMap<String, Relation>,
}

impl RelationSet {
    /// Resolve and register a relation
    ///
    /// `table_prefix` is prepended for catalog lookups only.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::Configuration`] if `foreign_key` is not a column of
    ///   `primary`, or the related table has no primary key and none was given.
    ///   Nothing is queried and the set is unchanged.
    /// - [`ScaffoldError::ExternalLookup`] if the related table's metadata
    ///   cannot be fetched.
    pub fn resolve(
        &mut self,
        introspector: &dyn SchemaIntrospector,
        table_prefix: &str,
        primary: &Table,
        related_table: &str,
        foreign_key: &str,
        options: RelationOptions,
    ) -> Result<&Relation> {
        if !primary.has_column(foreign_key) {
            return Err(ScaffoldError::Configuration(format!(
                "table `{}` has no foreign key column `{foreign_key}`",
                primary.name
            )));
        }

        let physical = format!("{table_prefix}{related_table}");
        let lookup = |source: LookupError| ScaffoldError::ExternalLookup {
            table: physical.clone(),
            source,
        };

        let raw = introspector.list_columns(&physical).map_err(lookup)?;
        let comment = introspector.table_comment(&physical).map_err(lookup)?;
        let primary_key = match options.primary_key {
            Some(key) => key,
            None => introspector
                .primary_key(&physical)
                .map_err(lookup)?
                .ok_or_else(|| {
                    ScaffoldError::Configuration(format!(
                        "table `{physical}` has no primary key; pass one explicitly"
                    ))
                })?,
        };

        let relation = Relation {
            table: related_table.to_string(),
            model_name: options
                .model_name
                .unwrap_or_else(|| NamingTransformer::model_name(related_table)),
            foreign_key: foreign_key.to_string(),
            primary_key,
            columns: Table::new(related_table, comment, raw),
        };

        tracing::info!(
            related = %relation.table,
            foreign_key = %relation.foreign_key,
            primary_key = %relation.primary_key,
            model = %relation.model_name,
            "relation added"
        );

        let (index, _) = self
            .relations
            .insert_full(related_table.to_string(), relation);
        Ok(&self.relations[index])
    }

    /// Relations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    /// Foreign keys registered by relations, each once
    pub fn foreign_keys(&self) -> impl Iterator<Item = &str> {
        let mut seen = indexmap::IndexSet::new();
        self.relations
            .values()
            .map(|r| r.foreign_key.as_str())
            .filter(move |fk| seen.insert(*fk))
    }

    /// Number of relations
    #[must_use]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Whether no relation is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
