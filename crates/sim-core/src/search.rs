//! Query and response value objects for simulation-history search.
//!
//! These are transient — never persisted. `SearchResult` is immutable once
//! assembled and carries the page of entries together with the filters that
//! produced it and the pagination metadata.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::SimulationHistoryEntry;
use crate::enums::SimulationStatus;

/// Conjunctive filter set for history search. Every field is optional;
/// absent fields impose no constraint.
///
/// Semantics: `project_path` matches by case-insensitive substring
/// containment; `status` and `ttk_version` by exact equality; `date_from` /
/// `date_to` bound the entry `timestamp` inclusively on either end.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HistoryFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SimulationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttk_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

impl HistoryFilters {
    /// True when no field constrains the result set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.project_path.is_none()
            && self.status.is_none()
            && self.ttk_version.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}

/// 1-indexed page request. Both fields must be ≥ 1 — enforced at the schema
/// boundary, assumed by the search engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Pagination {
    #[schemars(range(min = 1))]
    pub page: u32,
    #[schemars(range(min = 1))]
    pub per_page: u32,
}

impl Pagination {
    /// Index of the first item on this page in the full ordered match list.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page)
            .saturating_sub(1)
            .saturating_mul(u64::from(self.per_page))
    }
}

/// One page of search matches plus the filters that produced it and the
/// pagination metadata. `last_page = ceil(total / per_page)`; a request past
/// the last page yields an empty `items` list with metadata intact.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchResult {
    pub items: Vec<SimulationHistoryEntry>,
    pub filters: HistoryFilters,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub last_page: u32,
}

impl SearchResult {
    /// Assemble a result page. `total` is the match count before pagination.
    #[must_use]
    pub fn new(
        items: Vec<SimulationHistoryEntry>,
        filters: HistoryFilters,
        total: u64,
        pagination: Pagination,
    ) -> Self {
        Self {
            items,
            filters,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
            last_page: last_page(total, pagination.per_page),
        }
    }
}

/// Ceiling division of `total` by `per_page`. Zero matches yield zero pages.
#[must_use]
pub fn last_page(total: u64, per_page: u32) -> u32 {
    u32::try_from(total.div_ceil(u64::from(per_page.max(1)))).unwrap_or(u32::MAX)
}
