//! Project use cases.

use std::sync::Arc;

use sim_core::entities::Project;
use sim_core::requests::NewProject;
use sim_db::ports::ProjectRepository;
use sim_schema::{SchemaRegistry, ValueSource};

use crate::error::AppError;

/// Registration and lookup of simulation projects.
pub struct ProjectService {
    repo: Arc<dyn ProjectRepository>,
    registry: Arc<SchemaRegistry>,
}

impl ProjectService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProjectRepository>, registry: Arc<SchemaRegistry>) -> Self {
        Self { repo, registry }
    }

    /// Register a new project from an untyped payload.
    ///
    /// # Errors
    ///
    /// Returns itemized `AppError::Schema` violations for invalid input,
    /// `AppError::ProjectExists` when the path is already registered, and
    /// storage faults unchanged.
    pub async fn register(&self, raw: &serde_json::Value) -> Result<Project, AppError> {
        let draft: NewProject =
            self.registry
                .validate_input("new_project", raw, ValueSource::Body)?;

        if self.repo.exists_by_path(&draft.path).await? {
            return Err(AppError::ProjectExists { path: draft.path });
        }

        let project = self.repo.insert(draft).await?;
        tracing::debug!(id = %project.id, path = %project.path, "project registered");
        Ok(project)
    }

    /// Fetch a project by id. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns storage faults unchanged.
    pub async fn get(&self, id: &str) -> Result<Option<Project>, AppError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Remove a project by id. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns storage faults unchanged.
    pub async fn remove(&self, id: &str) -> Result<(), AppError> {
        Ok(self.repo.delete(id).await?)
    }

    /// Every registered project, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns storage faults unchanged.
    pub async fn list(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.repo.list_all().await?)
    }
}
