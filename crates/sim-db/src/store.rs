//! The libSQL adapter: every repository port over one [`SimDb`] handle.
//!
//! The trait implementations live under [`repos`](crate::repos); this module
//! only owns the handle and the open paths (local file, `:memory:`, remote
//! Turso, or whatever the configuration selects).

use sim_config::DatabaseConfig;

use crate::SimDb;
use crate::error::StoreError;

/// Relational adapter backed by libSQL.
pub struct LibsqlStore {
    db: SimDb,
}

impl LibsqlStore {
    /// Wrap an already-open database handle.
    #[must_use]
    pub const fn new(db: SimDb) -> Self {
        Self { db }
    }

    /// Open a local database file (`":memory:"` for tests).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        Ok(Self::new(SimDb::open_local(path).await?))
    }

    /// Open a remote Turso database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, StoreError> {
        Ok(Self::new(SimDb::open_remote(url, auth_token).await?))
    }

    /// Open whichever backend the configuration selects: remote when both
    /// URL and auth token are set, the local file path otherwise.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the selected backend cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if config.is_remote() {
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            Self::open_local(&config.path).await
        }
    }

    /// The underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SimDb {
        &self.db
    }
}
