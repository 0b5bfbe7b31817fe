//! Simulation-history use cases: recording runs, the schema-guarded search
//! path, and status transitions.

use std::sync::Arc;

use sim_core::entities::SimulationHistoryEntry;
use sim_core::enums::SimulationStatus;
use sim_core::requests::{HistoryQuery, NewSimulationEntry};
use sim_core::search::Pagination;
use sim_db::ports::SimulationHistoryRepository;
use sim_schema::{FieldViolation, SchemaError, SchemaRegistry, ValueSource};

use crate::error::AppError;

/// Recording, searching, and transitioning simulation-history entries.
///
/// The transition table lives here, not in the repositories: stores persist
/// whatever full-replace update they are handed, and this service is the one
/// place that refuses to revert a terminal state.
pub struct HistoryService {
    repo: Arc<dyn SimulationHistoryRepository>,
    registry: Arc<SchemaRegistry>,
    default_per_page: u32,
}

impl HistoryService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn SimulationHistoryRepository>,
        registry: Arc<SchemaRegistry>,
        default_per_page: u32,
    ) -> Self {
        Self {
            repo,
            registry,
            default_per_page,
        }
    }

    /// Record a simulation run from an untyped payload.
    ///
    /// A present-but-blank `report_file_path` is rejected as an itemized
    /// violation rather than silently coerced, so the caller learns about it
    /// the same way as any other input mistake.
    ///
    /// # Errors
    ///
    /// Returns itemized `AppError::Schema` violations for invalid input and
    /// storage faults unchanged.
    pub async fn record(&self, raw: &serde_json::Value) -> Result<SimulationHistoryEntry, AppError> {
        let draft: NewSimulationEntry =
            self.registry
                .validate_input("new_simulation_entry", raw, ValueSource::Body)?;

        if let Some(path) = draft.report_file_path.as_deref() {
            if path.trim().is_empty() {
                return Err(SchemaError::Input {
                    violations: vec![FieldViolation {
                        field: "report_file_path".to_string(),
                        message: "must not be blank when present".to_string(),
                        source: ValueSource::Body,
                    }],
                }
                .into());
            }
        }

        let entry = self.repo.insert(draft).await?;
        tracing::debug!(id = %entry.id, status = %entry.status, "simulation run recorded");
        Ok(entry)
    }

    /// Run a history search from an untyped query payload.
    ///
    /// Missing pagination falls back to page 1 at the configured default page
    /// size. The assembled [`SearchResult`](sim_core::search::SearchResult)
    /// is response-validated before it leaves, so a malformed page is a
    /// generic server fault, never partial data.
    ///
    /// # Errors
    ///
    /// Returns itemized `AppError::Schema` violations for an invalid query,
    /// the collapsed response fault if the result fails its schema, and
    /// storage faults unchanged.
    pub async fn search(&self, raw: &serde_json::Value) -> Result<serde_json::Value, AppError> {
        let query: HistoryQuery =
            self.registry
                .validate_input("history_query", raw, ValueSource::Query)?;

        let pagination = query.pagination.unwrap_or(Pagination {
            page: 1,
            per_page: self.default_per_page,
        });
        let result = self.repo.search(&query.filters, pagination).await?;
        Ok(self.registry.validate_response("search_result", &result)?)
    }

    /// Move an entry to `next`, guarded by the transition table.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when no entry has this id,
    /// `AppError::InvalidTransition` when the current state does not allow
    /// `next`, and storage faults unchanged.
    pub async fn transition(
        &self,
        id: &str,
        next: SimulationStatus,
    ) -> Result<SimulationHistoryEntry, AppError> {
        let entry = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound { id: id.to_string() })?;

        if !entry.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                id: id.to_string(),
                from: entry.status,
                to: next,
            });
        }

        let from = entry.status;
        self.repo.update(&entry.with_status(next)).await?;
        tracing::debug!(id = %id, %from, to = %next, "simulation status transitioned");

        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound { id: id.to_string() })
    }

    /// Fetch an entry by id. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns storage faults unchanged.
    pub async fn get(&self, id: &str) -> Result<Option<SimulationHistoryEntry>, AppError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Remove an entry by id. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns storage faults unchanged.
    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        Ok(self.repo.delete(id).await?)
    }
}
