//! Error types for scaffold builds

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring, planning or committing a scaffold
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Invalid declaration: unknown table, unknown foreign key, missing table selection
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Schema catalog lookup failed
    #[error("Schema lookup failed for `{table}`: {source}")]
    ExternalLookup {
        /// Table being looked up (including any prefix)
        table: String,
        /// Underlying catalog failure
        #[source]
        source: LookupError,
    },

    /// One or more planned output paths already exist
    #[error("{} output file(s) already exist: {}", paths.len(), display_paths(paths))]
    Conflict {
        /// Every pre-existing planned path
        paths: Vec<PathBuf>,
    },

    /// A write failed after the conflict pre-check passed
    #[error("Failed to write {}: {source} ({} file(s) already written)", path.display(), written.len())]
    PartialWrite {
        /// Paths written before the failure
        written: Vec<PathBuf>,
        /// Path whose write failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A delete failed part way through a discard
    #[error("Failed to delete {}: {source} ({} file(s) already deleted)", path.display(), deleted.len())]
    Delete {
        /// Paths deleted before the failure
        deleted: Vec<PathBuf>,
        /// Path whose delete failed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Template could not be loaded
    #[error("Template error: {0}")]
    Template(String),

    /// Settings could not be loaded or merged
    #[error("Settings error: {0}")]
    Settings(#[from] Box<figment::Error>),
}

/// Errors reported by a schema introspector
#[derive(Debug, Error)]
pub enum LookupError {
    /// The catalog has no such table
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Database driver failure
    #[cfg(feature = "mysql")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Offline schema description could not be read or parsed
    #[error("schema file error: {0}")]
    Schema(String),
}

/// Result type for scaffold operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<figment::Error> for ScaffoldError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_lists_paths() {
        let err = ScaffoldError::Conflict {
            paths: vec![PathBuf::from("a.php"), PathBuf::from("b.js")],
        };
        assert_eq!(err.to_string(), "2 output file(s) already exist: a.php, b.js");
    }

    #[test]
    fn test_lookup_error_is_source() {
        use std::error::Error as _;

        let err = ScaffoldError::ExternalLookup {
            table: "ea_article".to_string(),
            source: LookupError::Schema("unreadable".to_string()),
        };
        assert!(err.to_string().contains("ea_article"));
        assert!(err.source().is_some());
    }
}
