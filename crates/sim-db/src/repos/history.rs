//! Simulation history repository — libSQL implementation, including the
//! search engine.

use async_trait::async_trait;
use chrono::Utc;

use sim_core::entities::SimulationHistoryEntry;
use sim_core::enums::SimulationStatus;
use sim_core::ids;
use sim_core::requests::NewSimulationEntry;
use sim_core::search::{HistoryFilters, Pagination, SearchResult};

use crate::error::StoreError;
use crate::helpers::{get_opt_i64, get_opt_string, parse_datetime};
use crate::ports::SimulationHistoryRepository;
use crate::query::{ORDER_SQL, Predicate, where_clause};
use crate::store::LibsqlStore;

const SELECT_COLS: &str = "id, project_path, project_name, status, ttk_version, config_json, \
     summary_json, has_report, report_file_path, duration_ms, battle_count, trecho_count, \
     timestamp, created_at, updated_at";

fn row_to_entry(row: &libsql::Row) -> Result<SimulationHistoryEntry, StoreError> {
    let id = row.get::<String>(0)?;
    let status_raw = row.get::<String>(3)?;
    let status = match SimulationStatus::parse(&status_raw) {
        Ok(status) => status,
        Err(_) => {
            tracing::warn!(
                id = %id,
                status = %status_raw,
                "unknown persisted status, reading as pending"
            );
            SimulationStatus::Pending
        }
    };

    let entry = SimulationHistoryEntry {
        id,
        project_path: row.get(1)?,
        project_name: row.get(2)?,
        status,
        ttk_version: row.get(4)?,
        config_json: row.get(5)?,
        summary_json: row.get(6)?,
        has_report: row.get::<i64>(7)? != 0,
        report_file_path: get_opt_string(row, 8)?,
        duration_ms: get_opt_i64(row, 9)?,
        battle_count: get_opt_i64(row, 10)?,
        trecho_count: get_opt_i64(row, 11)?,
        timestamp: parse_datetime(&row.get::<String>(12)?)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
        updated_at: parse_datetime(&row.get::<String>(14)?)?,
    };
    // Tolerates rows mutated outside the ports; port writes are already
    // normalized.
    Ok(entry.normalize_report())
}

#[async_trait]
impl SimulationHistoryRepository for LibsqlStore {
    async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM simulation_history WHERE id = ?1 LIMIT 1", [id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn insert(&self, new: NewSimulationEntry) -> Result<SimulationHistoryEntry, StoreError> {
        let now = Utc::now();
        let id = self.db().generate_id(ids::HISTORY).await?;
        let report_file_path = new.report_file_path.filter(|p| !p.is_empty());
        let has_report = report_file_path.is_some();

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO simulation_history ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
                ),
                libsql::params![
                    id.as_str(),
                    new.project_path.as_str(),
                    new.project_name.as_str(),
                    new.status.as_str(),
                    new.ttk_version.as_str(),
                    new.config_json.as_str(),
                    new.summary_json.as_str(),
                    has_report,
                    report_file_path.as_deref(),
                    new.duration_ms,
                    new.battle_count,
                    new.trecho_count,
                    new.timestamp.to_rfc3339(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(SimulationHistoryEntry {
            id,
            project_path: new.project_path,
            project_name: new.project_name,
            status: new.status,
            ttk_version: new.ttk_version,
            config_json: new.config_json,
            summary_json: new.summary_json,
            has_report,
            report_file_path,
            duration_ms: new.duration_ms,
            battle_count: new.battle_count,
            trecho_count: new.trecho_count,
            timestamp: new.timestamp,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SimulationHistoryEntry>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM simulation_history WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, entry: &SimulationHistoryEntry) -> Result<(), StoreError> {
        let entry = entry.clone().normalize_report();
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE simulation_history SET
                   project_path = ?2, project_name = ?3, status = ?4, ttk_version = ?5,
                   config_json = ?6, summary_json = ?7, has_report = ?8, report_file_path = ?9,
                   duration_ms = ?10, battle_count = ?11, trecho_count = ?12, timestamp = ?13,
                   updated_at = ?14
                 WHERE id = ?1",
                libsql::params![
                    entry.id.as_str(),
                    entry.project_path.as_str(),
                    entry.project_name.as_str(),
                    entry.status.as_str(),
                    entry.ttk_version.as_str(),
                    entry.config_json.as_str(),
                    entry.summary_json.as_str(),
                    entry.has_report,
                    entry.report_file_path.as_deref(),
                    entry.duration_ms,
                    entry.battle_count,
                    entry.trecho_count,
                    entry.timestamp.to_rfc3339(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::RowNotFound {
                id: entry.id.clone(),
            });
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.db()
            .conn()
            .execute("DELETE FROM simulation_history WHERE id = ?1", [id])
            .await?;
        Ok(())
    }

    async fn search(
        &self,
        filters: &HistoryFilters,
        page: Pagination,
    ) -> Result<SearchResult, StoreError> {
        let predicates = Predicate::from_filters(filters);
        let (where_sql, params) = where_clause(&predicates);

        // Total before pagination; both queries share the same WHERE.
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM simulation_history {where_sql}"),
                libsql::params_from_iter(params.clone()),
            )
            .await?;
        let row = rows.next().await?.ok_or(StoreError::NoResult)?;
        let total = u64::try_from(row.get::<i64>(0)?).unwrap_or(0);

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM simulation_history {where_sql}
                     {ORDER_SQL} LIMIT {} OFFSET {}",
                    page.per_page,
                    page.offset()
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_entry(&row)?);
        }

        Ok(SearchResult::new(items, filters.clone(), total, page))
    }
}
