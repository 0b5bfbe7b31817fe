//! Shared test utilities for sim-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use sim_core::enums::SimulationStatus;
    use sim_core::requests::NewSimulationEntry;

    use crate::store::LibsqlStore;

    /// In-memory libSQL store with the schema migrated.
    pub async fn test_store() -> LibsqlStore {
        LibsqlStore::open_local(":memory:").await.unwrap()
    }

    /// Fixed reference instant so timestamp assertions are deterministic.
    pub fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
    }

    /// Minimal valid draft for one simulation run.
    pub fn entry_draft(
        path: &str,
        status: SimulationStatus,
        timestamp: DateTime<Utc>,
    ) -> NewSimulationEntry {
        NewSimulationEntry {
            project_path: path.to_string(),
            project_name: path.rsplit('/').next().unwrap_or(path).to_string(),
            status,
            ttk_version: "2.1.0".to_string(),
            config_json: "{}".to_string(),
            summary_json: "{}".to_string(),
            report_file_path: None,
            duration_ms: None,
            battle_count: None,
            trecho_count: None,
            timestamp,
        }
    }

    /// 25 drafts with strictly decreasing timestamps, alternating
    /// completed/pending starting from completed (13 completed, 12 pending).
    pub fn alternating_drafts(newest: DateTime<Utc>) -> Vec<NewSimulationEntry> {
        (0..25)
            .map(|i| {
                let status = if i % 2 == 0 {
                    SimulationStatus::Completed
                } else {
                    SimulationStatus::Pending
                };
                entry_draft("/sims/alpha", status, newest - Duration::minutes(i))
            })
            .collect()
    }
}
