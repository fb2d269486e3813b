//! `MySQL` introspection through `information_schema`

use super::{RawColumn, SchemaIntrospector};
use crate::error::LookupError;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Row;
use tokio::runtime::Runtime;

/// Introspector backed by a live `MySQL` connection
///
/// Builds are synchronous, so queries run on a private current-thread
/// runtime.
pub struct MySqlIntrospector {
    runtime: Runtime,
    pool: MySqlPool,
}

impl MySqlIntrospector {
    /// Connect to the database at `url`
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Database`] if the connection cannot be
    /// established, or [`LookupError::Schema`] if the runtime cannot start.
    pub fn connect(url: &str) -> Result<Self, LookupError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LookupError::Schema(format!("failed to start runtime: {e}")))?;

        let pool = runtime.block_on(
            MySqlPoolOptions::new()
                .max_connections(1)
                .connect(url),
        )?;

        tracing::debug!("connected to MySQL for introspection");
        Ok(Self { runtime, pool })
    }
}

impl SchemaIntrospector for MySqlIntrospector {
    fn list_columns(&self, table: &str) -> Result<Vec<RawColumn>, LookupError> {
        let rows = self.runtime.block_on(
            sqlx::query(
                r"
                SELECT CAST(COLUMN_NAME AS CHAR) AS name,
                       CAST(COLUMN_TYPE AS CHAR) AS raw_type,
                       CAST(COLUMN_COMMENT AS CHAR) AS comment,
                       CAST(IS_NULLABLE AS CHAR) AS nullable,
                       CAST(COLUMN_DEFAULT AS CHAR) AS default_value
                FROM information_schema.COLUMNS
                WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
                ORDER BY ORDINAL_POSITION
                ",
            )
            .bind(table)
            .fetch_all(&self.pool),
        )?;

        if rows.is_empty() {
            return Err(LookupError::TableNotFound(table.to_string()));
        }

        rows.iter()
            .map(|row| -> Result<RawColumn, LookupError> {
                let nullable: String = row.try_get("nullable")?;
                Ok(RawColumn {
                    name: row.try_get("name")?,
                    raw_type: row.try_get("raw_type")?,
                    comment: row.try_get::<Option<String>, _>("comment")?.unwrap_or_default(),
                    nullable: nullable.eq_ignore_ascii_case("YES"),
                    default: row.try_get("default_value")?,
                })
            })
            .collect()
    }

    fn table_comment(&self, table: &str) -> Result<String, LookupError> {
        let comment: Option<Option<String>> = self.runtime.block_on(
            sqlx::query_scalar(
                r"
                SELECT CAST(TABLE_COMMENT AS CHAR)
                FROM information_schema.TABLES
                WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
                ",
            )
            .bind(table)
            .fetch_optional(&self.pool),
        )?;

        Ok(comment.flatten().unwrap_or_default())
    }

    fn primary_key(&self, table: &str) -> Result<Option<String>, LookupError> {
        let key: Option<String> = self.runtime.block_on(
            sqlx::query_scalar(
                r"
                SELECT CAST(COLUMN_NAME AS CHAR)
                FROM information_schema.COLUMNS
                WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? AND COLUMN_KEY = 'PRI'
                ORDER BY ORDINAL_POSITION
                LIMIT 1
                ",
            )
            .bind(table)
            .fetch_optional(&self.pool),
        )?;

        Ok(key)
    }
}
