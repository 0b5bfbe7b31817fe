//! In-memory adapter: every port over process-local maps.
//!
//! Not a test-only mock. It carries the same observable contract as
//! [`LibsqlStore`](crate::LibsqlStore) (the equivalence suite in `tests/`
//! holds both to it) and backs ephemeral sessions where nothing should touch
//! disk. Ids are sequential rather than random but keep the shared
//! `{prefix}-{8 hex}` shape.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use sim_core::entities::{Project, SimulationHistoryEntry, UserPreferences};
use sim_core::ids;
use sim_core::requests::{NewProject, NewSimulationEntry};
use sim_core::search::{HistoryFilters, Pagination, SearchResult};

use crate::error::StoreError;
use crate::ports::{ProjectRepository, SimulationHistoryRepository, UserPreferencesRepository};
use crate::query::{Predicate, newest_first};

/// All three repository ports over `RwLock`-guarded maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: RwLock<HashMap<String, Project>>,
    history: RwLock<HashMap<String, SimulationHistoryEntry>>,
    preferences: RwLock<HashMap<String, UserPreferences>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n:08x}")
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn exists_by_path(&self, path: &str) -> Result<bool, StoreError> {
        Ok(self.projects.read().await.values().any(|p| p.path == path))
    }

    async fn insert(&self, new: NewProject) -> Result<Project, StoreError> {
        let mut projects = self.projects.write().await;
        if projects.values().any(|p| p.path == new.path) {
            return Err(StoreError::Query(format!(
                "project path already exists: {}",
                new.path
            )));
        }
        let now = Utc::now();
        let project = Project {
            id: self.generate_id(ids::PROJECT),
            name: new.name,
            path: new.path,
            created_at: now,
            updated_at: now,
        };
        projects.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.read().await.get(id).cloned())
    }

    async fn update(&self, project: &Project) -> Result<(), StoreError> {
        let mut projects = self.projects.write().await;
        if projects
            .values()
            .any(|p| p.id != project.id && p.path == project.path)
        {
            return Err(StoreError::Query(format!(
                "project path already exists: {}",
                project.path
            )));
        }
        let Some(stored) = projects.get_mut(&project.id) else {
            return Err(StoreError::RowNotFound {
                id: project.id.clone(),
            });
        };
        stored.name = project.name.clone();
        stored.path = project.path.clone();
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.projects.write().await.remove(id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self.projects.read().await.values().cloned().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }
}

#[async_trait]
impl SimulationHistoryRepository for MemoryStore {
    async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.history.read().await.contains_key(id))
    }

    async fn insert(&self, new: NewSimulationEntry) -> Result<SimulationHistoryEntry, StoreError> {
        let now = Utc::now();
        let report_file_path = new.report_file_path.filter(|p| !p.is_empty());
        let entry = SimulationHistoryEntry {
            id: self.generate_id(ids::HISTORY),
            project_path: new.project_path,
            project_name: new.project_name,
            status: new.status,
            ttk_version: new.ttk_version,
            config_json: new.config_json,
            summary_json: new.summary_json,
            has_report: report_file_path.is_some(),
            report_file_path,
            duration_ms: new.duration_ms,
            battle_count: new.battle_count,
            trecho_count: new.trecho_count,
            timestamp: new.timestamp,
            created_at: now,
            updated_at: now,
        };
        self.history
            .write()
            .await
            .insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SimulationHistoryEntry>, StoreError> {
        Ok(self.history.read().await.get(id).cloned())
    }

    async fn update(&self, entry: &SimulationHistoryEntry) -> Result<(), StoreError> {
        let mut history = self.history.write().await;
        let Some(stored) = history.get_mut(&entry.id) else {
            return Err(StoreError::RowNotFound {
                id: entry.id.clone(),
            });
        };
        let created_at = stored.created_at;
        *stored = entry.clone().normalize_report();
        stored.created_at = created_at;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.history.write().await.remove(id);
        Ok(())
    }

    async fn search(
        &self,
        filters: &HistoryFilters,
        page: Pagination,
    ) -> Result<SearchResult, StoreError> {
        let predicates = Predicate::from_filters(filters);
        let mut matches: Vec<SimulationHistoryEntry> = self
            .history
            .read()
            .await
            .values()
            .filter(|entry| predicates.iter().all(|p| p.matches(entry)))
            .cloned()
            .collect();
        matches.sort_by(newest_first);

        let total = matches.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items: Vec<SimulationHistoryEntry> = matches
            .into_iter()
            .skip(offset)
            .take(page.per_page as usize)
            .collect();
        Ok(SearchResult::new(items, filters.clone(), total, page))
    }
}

#[async_trait]
impl UserPreferencesRepository for MemoryStore {
    async fn exists(&self, user_id: &str) -> Result<bool, StoreError> {
        Ok(self.preferences.read().await.contains_key(user_id))
    }

    async fn insert(&self, prefs: &UserPreferences) -> Result<UserPreferences, StoreError> {
        let mut preferences = self.preferences.write().await;
        if preferences.contains_key(&prefs.user_id) {
            return Err(StoreError::Query(format!(
                "preferences already stored for user: {}",
                prefs.user_id
            )));
        }
        let now = Utc::now();
        let mut stored = prefs.clone();
        stored.created_at = now;
        stored.updated_at = now;
        preferences.insert(stored.user_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<UserPreferences>, StoreError> {
        Ok(self.preferences.read().await.get(user_id).cloned())
    }

    async fn update(&self, prefs: &UserPreferences) -> Result<(), StoreError> {
        let mut preferences = self.preferences.write().await;
        let Some(stored) = preferences.get_mut(&prefs.user_id) else {
            return Err(StoreError::RowNotFound {
                id: prefs.user_id.clone(),
            });
        };
        stored.language = prefs.language.clone();
        stored.theme = prefs.theme;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        self.preferences.write().await.remove(user_id);
        Ok(())
    }
}
