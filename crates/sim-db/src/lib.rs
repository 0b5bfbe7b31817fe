//! # sim-db
//!
//! Storage layer for simdesk: repository ports, the history search engine,
//! and two interchangeable adapters.
//!
//! The ports ([`ports::ProjectRepository`],
//! [`ports::SimulationHistoryRepository`], [`ports::UserPreferencesRepository`])
//! are the only sanctioned access path to persisted data. Two adapters
//! implement all three with identical observable behavior:
//!
//! - [`MemoryStore`] — in-process maps, the production test double
//! - [`LibsqlStore`] — libSQL (local file, `:memory:`, or remote Turso)
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) — embedded database
//! with a stable API and remote/Turso support.

pub mod error;
pub mod helpers;
pub mod memory;
mod migrations;
pub mod ports;
pub mod query;
pub mod repos;
pub mod store;
#[cfg(test)]
mod test_support;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::LibsqlStore;

use libsql::Builder;

/// Central database handle for libSQL-backed storage.
///
/// Wraps a libSQL database and connection. Provides ID generation and the
/// raw connection the repository implementations query through.
pub struct SimDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SimDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let sim_db = Self { db, conn };
        sim_db.run_migrations().await?;
        Ok(sim_db)
    }

    /// Open a remote database via URL and auth token.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, StoreError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let sim_db = Self { db, conn };
        sim_db.run_migrations().await?;
        Ok(sim_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"sim-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
