//! Input payloads accepted at the application boundary.
//!
//! These are the shapes the schema layer validates before any use case runs.
//! Identity and audit timestamps are never part of an input — the stores
//! assign those on insert.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SimulationStatus;
use crate::search::{HistoryFilters, Pagination};

/// Draft for a new project. Identity and timestamps are assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewProject {
    #[schemars(length(min = 1))]
    pub name: String,
    #[schemars(length(min = 1))]
    pub path: String,
}

/// Draft for a new simulation history entry.
///
/// `timestamp` is the moment the simulation ran, supplied by the caller;
/// `has_report` is derived from `report_file_path` at insert time rather
/// than accepted as input, so the pair can never disagree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewSimulationEntry {
    #[schemars(length(min = 1))]
    pub project_path: String,
    #[schemars(length(min = 1))]
    pub project_name: String,
    pub status: SimulationStatus,
    #[schemars(length(min = 1))]
    pub ttk_version: String,
    pub config_json: String,
    pub summary_json: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trecho_count: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

/// Preference payload as received from the outside: language and theme
/// arrive as plain strings and are parsed into their value objects by the
/// use case after schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PreferencesInput {
    #[schemars(length(min = 1))]
    pub user_id: String,
    #[schemars(length(min = 1))]
    pub language: String,
    #[schemars(length(min = 1))]
    pub theme: String,
}

/// A search request: filters plus optional pagination. When pagination is
/// absent the caller gets page 1 at the configured default page size.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HistoryQuery {
    #[serde(default)]
    pub filters: HistoryFilters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_entry_deserializes_without_optional_fields() {
        let raw = serde_json::json!({
            "project_path": "/sims/alpha",
            "project_name": "alpha",
            "status": "completed",
            "ttk_version": "2.1.0",
            "config_json": "{}",
            "summary_json": "{}",
            "timestamp": "2026-08-01T12:00:00Z"
        });
        let entry: NewSimulationEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.report_file_path, None);
        assert_eq!(entry.duration_ms, None);
        assert_eq!(entry.battle_count, None);
        assert_eq!(entry.trecho_count, None);
    }

    #[test]
    fn history_query_defaults_to_unfiltered_first_page() {
        let query: HistoryQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(query.filters.is_empty());
        assert_eq!(query.pagination, None);
    }

    #[test]
    fn new_project_schema_rejects_blank_name() {
        let schema = serde_json::to_value(schemars::schema_for!(NewProject)).unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();
        assert!(validator.is_valid(&serde_json::json!({"name": "alpha", "path": "/sims/alpha"})));
        assert!(!validator.is_valid(&serde_json::json!({"name": "", "path": "/sims/alpha"})));
    }

    #[test]
    fn status_field_uses_snake_case_wire_form() {
        let raw = serde_json::json!({
            "project_path": "/sims/alpha",
            "project_name": "alpha",
            "status": "COMPLETED",
            "ttk_version": "2.1.0",
            "config_json": "{}",
            "summary_json": "{}",
            "timestamp": "2026-08-01T12:00:00Z"
        });
        assert!(serde_json::from_value::<NewSimulationEntry>(raw).is_err());
    }
}
