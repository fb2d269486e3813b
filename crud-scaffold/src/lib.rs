//! Schema-driven CRUD scaffolding
//!
//! Given a database table, `crud-scaffold` reads its column metadata,
//! classifies every column into a form type, resolves relations to other
//! tables, and binds the result to a template set producing a data model, a
//! request handler, list/create/edit views and a table script.
//!
//! # Pipeline
//!
//! ```text
//! SchemaIntrospector -> Classifier -> ArtifactPlanner -> FileSink
//!        (I/O)            (pure)         (pure)           (I/O)
//! ```
//!
//! [`builder::ScaffoldBuilder`] drives the whole pipeline for one table.
//!
//! # Example
//!
//! ```rust
//! use crud_scaffold::prelude::*;
//!
//! let schema = SchemaFile::from_toml_str(r#"
//! [tables.article]
//! comment = "Articles"
//! primary_key = "id"
//! columns = [
//!     { name = "id", type = "int(11)" },
//!     { name = "title", type = "varchar(255)", comment = "Title" },
//!     { name = "cover_image", type = "varchar(255)" },
//! ]
//! "#)?;
//!
//! let mut builder = ScaffoldBuilder::new(
//!     Box::new(StaticIntrospector::new(schema)),
//!     ScaffoldSettings::default(),
//! );
//! builder.select_table("article")?;
//!
//! let artifact = builder.plan()?;
//! assert_eq!(artifact.len(), 6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod naming;
pub mod plan;
pub mod relation;
pub mod schema;
pub mod sink;
pub mod template;

pub use error::{LookupError, Result, ScaffoldError};

/// Common imports
pub mod prelude {
    pub use crate::builder::{BuildState, ScaffoldBuilder};
    pub use crate::classify::{Classifier, ClassifierSettings, FormType, MatchMode};
    pub use crate::config::ScaffoldSettings;
    pub use crate::error::{LookupError, Result, ScaffoldError};
    pub use crate::plan::{ArtifactKind, GeneratedArtifact, GeneratedFile};
    pub use crate::relation::RelationOptions;
    #[cfg(feature = "mysql")]
    pub use crate::schema::MySqlIntrospector;
    pub use crate::schema::{SchemaFile, SchemaIntrospector, StaticIntrospector};
    pub use crate::sink::{FileSink, LocalFileSink};
}
