//! Repository ports — the storage contracts the rest of simdesk programs
//! against.
//!
//! Use cases receive these as trait objects via constructor injection and
//! never name a concrete store. Two adapters implement every port with the
//! same observable behavior: [`MemoryStore`](crate::MemoryStore) and
//! [`LibsqlStore`](crate::LibsqlStore).
//!
//! Absence is data, not failure: lookups return `Ok(None)` for missing rows
//! and `delete` is a no-op for ids that do not exist. The one exception is a
//! full-replace `update` addressing a missing row, which fails with
//! [`StoreError::RowNotFound`].

use async_trait::async_trait;

use sim_core::entities::{Project, SimulationHistoryEntry, UserPreferences};
use sim_core::requests::{NewProject, NewSimulationEntry};
use sim_core::search::{HistoryFilters, Pagination, SearchResult};

use crate::error::StoreError;

/// Persistence port for [`Project`] aggregates. Project paths are unique
/// across the store; inserting or updating into a taken path is an error.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Whether a project with exactly this path exists.
    async fn exists_by_path(&self, path: &str) -> Result<bool, StoreError>;

    /// Store a draft, assigning identity and audit instants. Returns the
    /// stored row.
    async fn insert(&self, new: NewProject) -> Result<Project, StoreError>;

    /// Fetch by id. `Ok(None)` when absent.
    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, StoreError>;

    /// Full replace of the caller-mutable columns. `created_at` is kept from
    /// the stored row, `updated_at` is refreshed by the store.
    ///
    /// Fails with [`StoreError::RowNotFound`] when no row has this id.
    async fn update(&self, project: &Project) -> Result<(), StoreError>;

    /// Remove a project. Deleting an absent id succeeds silently.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Every project, ordered by name.
    async fn list_all(&self) -> Result<Vec<Project>, StoreError>;
}

/// Persistence port for [`SimulationHistoryEntry`] aggregates plus the
/// history search engine.
#[async_trait]
pub trait SimulationHistoryRepository: Send + Sync {
    /// Whether an entry with this id exists.
    async fn exists(&self, id: &str) -> Result<bool, StoreError>;

    /// Store a draft, assigning identity and audit instants. `has_report` is
    /// derived from `report_file_path` presence, never taken from input.
    async fn insert(&self, new: NewSimulationEntry) -> Result<SimulationHistoryEntry, StoreError>;

    /// Fetch by id. `Ok(None)` when absent.
    async fn find_by_id(&self, id: &str) -> Result<Option<SimulationHistoryEntry>, StoreError>;

    /// Full replace of the caller-mutable columns, with the report pair
    /// normalized first (see
    /// [`SimulationHistoryEntry::normalize_report`]). `created_at` is kept
    /// from the stored row, `updated_at` is refreshed by the store.
    ///
    /// Fails with [`StoreError::RowNotFound`] when no row has this id.
    async fn update(&self, entry: &SimulationHistoryEntry) -> Result<(), StoreError>;

    /// Remove an entry. Deleting an absent id succeeds silently.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// One page of entries matching `filters`, newest first (timestamp
    /// descending, id descending on equal timestamps). `total` counts every
    /// match before pagination; a page past the end yields empty `items`
    /// with the metadata intact.
    async fn search(
        &self,
        filters: &HistoryFilters,
        page: Pagination,
    ) -> Result<SearchResult, StoreError>;
}

/// Persistence port for [`UserPreferences`], keyed by the caller-supplied
/// user id.
#[async_trait]
pub trait UserPreferencesRepository: Send + Sync {
    /// Whether preferences are stored for this user.
    async fn exists(&self, user_id: &str) -> Result<bool, StoreError>;

    /// Store preferences for a user id not yet present, assigning audit
    /// instants (the draft's stamps are ignored). Returns the stored row.
    async fn insert(&self, prefs: &UserPreferences) -> Result<UserPreferences, StoreError>;

    /// Fetch by user id. `Ok(None)` when absent.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<UserPreferences>, StoreError>;

    /// Full replace of language and theme. `created_at` is kept from the
    /// stored row, `updated_at` is refreshed by the store.
    ///
    /// Fails with [`StoreError::RowNotFound`] when no row has this user id.
    async fn update(&self, prefs: &UserPreferences) -> Result<(), StoreError>;

    /// Remove stored preferences. Deleting an absent user id succeeds
    /// silently.
    async fn delete(&self, user_id: &str) -> Result<(), StoreError>;
}
