//! # sim-app
//!
//! Use-case services for simdesk: the thin layer between an untyped outside
//! world and the repository ports.
//!
//! Every service takes its collaborators through the constructor — a
//! repository port as `Arc<dyn …Repository>` plus the shared
//! [`SchemaRegistry`](sim_schema::SchemaRegistry) — so the same services run
//! over [`MemoryStore`](sim_db::MemoryStore) in tests and
//! [`LibsqlStore`](sim_db::LibsqlStore) in production without a change.
//! [`Services::new`] wires all three from any store value implementing the
//! three ports.
//!
//! Boundary policy: every untyped payload crosses through
//! `validate_input` before a use case touches it, and the search result
//! crosses back through `validate_response` before it leaves.

pub mod error;
pub mod history;
pub mod preferences;
pub mod project;

pub use error::AppError;
pub use history::HistoryService;
pub use preferences::{PreferenceDefaults, PreferencesService};
pub use project::ProjectService;

use std::sync::Arc;

use sim_config::{ConfigError, SimConfig};
use sim_db::ports::{ProjectRepository, SimulationHistoryRepository, UserPreferencesRepository};
use sim_schema::SchemaRegistry;

/// All three use-case services wired over one store.
pub struct Services {
    pub projects: ProjectService,
    pub history: HistoryService,
    pub preferences: PreferencesService,
}

impl Services {
    /// Wire the services from a store implementing all three ports, the
    /// shared schema registry, and the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the configured default
    /// language or theme does not parse.
    pub fn new<S>(
        store: Arc<S>,
        registry: Arc<SchemaRegistry>,
        config: &SimConfig,
    ) -> Result<Self, ConfigError>
    where
        S: ProjectRepository + SimulationHistoryRepository + UserPreferencesRepository + 'static,
    {
        let defaults = PreferenceDefaults::from_config(&config.general)?;
        Ok(Self {
            projects: ProjectService::new(store.clone(), registry.clone()),
            history: HistoryService::new(
                store.clone(),
                registry.clone(),
                config.general.default_per_page,
            ),
            preferences: PreferencesService::new(store, registry, defaults),
        })
    }
}
