//! Storage error types for sim-db.

use thiserror::Error;

/// Errors from storage operations, shared by every adapter.
///
/// Lookups never produce an error for absence; they return `Option`. The
/// only absence that is an error is a full-replace `update` whose target row
/// does not exist (`RowNotFound`).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Full-replace update addressed a row that does not exist.
    #[error("Row not found: {id}")]
    RowNotFound { id: String },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
