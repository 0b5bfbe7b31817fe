use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SimulationStatus;

/// One simulation run, completed or in progress.
///
/// `config_json` and `summary_json` are opaque serialized blobs — this layer
/// stores and returns them without interpretation. `timestamp` is the run
/// instant supplied by the caller and drives the default (descending) search
/// order; `created_at`/`updated_at` are store-assigned audit instants.
///
/// Invariant: `report_file_path` is absent whenever `has_report` is false.
/// Inserts derive the flag from path presence; every write drops the path
/// when the flag is false.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SimulationHistoryEntry {
    pub id: String,
    pub project_path: String,
    pub project_name: String,
    pub status: SimulationStatus,
    pub ttk_version: String,
    pub config_json: String,
    pub summary_json: String,
    pub has_report: bool,
    pub report_file_path: Option<String>,
    pub duration_ms: Option<i64>,
    pub battle_count: Option<i64>,
    pub trecho_count: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SimulationHistoryEntry {
    /// Return a copy with `status` replaced, leaving audit stamps untouched
    /// (the store refreshes `updated_at` on the subsequent full-replace
    /// update).
    #[must_use]
    pub fn with_status(mut self, status: SimulationStatus) -> Self {
        self.status = status;
        self
    }

    /// Enforce the report invariant on a value about to be written: a false
    /// flag drops the path, and an absent or empty path clears the flag.
    /// Both adapters route updates through this.
    #[must_use]
    pub fn normalize_report(mut self) -> Self {
        if !self.has_report {
            self.report_file_path = None;
        }
        self.report_file_path = self.report_file_path.filter(|p| !p.is_empty());
        self.has_report = self.report_file_path.is_some();
        self
    }
}
