//! Typed filter predicates for history search.
//!
//! [`Predicate::from_filters`] lowers a [`HistoryFilters`] into the
//! conjunction both adapters evaluate. The memory store applies
//! [`Predicate::matches`] per entry; the libSQL store renders the same list
//! as a parameterized `WHERE` clause via [`where_clause`]. The two
//! translations live side by side here so they cannot drift apart, and the
//! ordering contract ([`ORDER_SQL`] / [`newest_first`]) is pinned the same
//! way.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use sim_core::entities::SimulationHistoryEntry;
use sim_core::enums::SimulationStatus;
use sim_core::search::HistoryFilters;

/// Search ordering as SQL: newest run first, id descending as the
/// deterministic tie-break so pagination never reshuffles equal timestamps.
pub const ORDER_SQL: &str = "ORDER BY timestamp DESC, id DESC";

/// Search ordering as a comparator, for the in-memory adapter. Must agree
/// with [`ORDER_SQL`].
#[must_use]
pub fn newest_first(a: &SimulationHistoryEntry, b: &SimulationHistoryEntry) -> Ordering {
    b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id))
}

/// One conjunct of a history search. The shape makes unsupported
/// field/operator pairings unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring containment on `project_path`.
    ProjectPathContains(String),
    /// Exact status equality.
    StatusEq(SimulationStatus),
    /// Exact engine version equality.
    TtkVersionEq(String),
    /// Run timestamp at or after the bound.
    TimestampGte(DateTime<Utc>),
    /// Run timestamp at or before the bound.
    TimestampLte(DateTime<Utc>),
}

impl Predicate {
    /// Lower a filter set into its predicate list. A blank or
    /// whitespace-only string imposes no constraint, same as an absent
    /// field.
    #[must_use]
    pub fn from_filters(filters: &HistoryFilters) -> Vec<Self> {
        let mut predicates = Vec::new();
        if let Some(path) = filters.project_path.as_deref() {
            if !path.trim().is_empty() {
                predicates.push(Self::ProjectPathContains(path.to_string()));
            }
        }
        if let Some(status) = filters.status {
            predicates.push(Self::StatusEq(status));
        }
        if let Some(version) = filters.ttk_version.as_deref() {
            if !version.trim().is_empty() {
                predicates.push(Self::TtkVersionEq(version.to_string()));
            }
        }
        if let Some(from) = filters.date_from {
            predicates.push(Self::TimestampGte(from));
        }
        if let Some(to) = filters.date_to {
            predicates.push(Self::TimestampLte(to));
        }
        predicates
    }

    /// Evaluate against one entry.
    ///
    /// Path containment folds ASCII case only, matching SQLite's `lower()`,
    /// so both adapters agree on non-ASCII paths.
    #[must_use]
    pub fn matches(&self, entry: &SimulationHistoryEntry) -> bool {
        match self {
            Self::ProjectPathContains(needle) => entry
                .project_path
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
            Self::StatusEq(status) => entry.status == *status,
            Self::TtkVersionEq(version) => entry.ttk_version == *version,
            Self::TimestampGte(bound) => entry.timestamp >= *bound,
            Self::TimestampLte(bound) => entry.timestamp <= *bound,
        }
    }

    /// Append this predicate's SQL rendering: the bound value goes into
    /// `params`, the condition references it positionally.
    fn push_condition(&self, conditions: &mut Vec<String>, params: &mut Vec<libsql::Value>) {
        match self {
            Self::ProjectPathContains(needle) => {
                // instr instead of LIKE so '%' and '_' in the filter match
                // literally.
                params.push(libsql::Value::Text(needle.clone()));
                conditions.push(format!(
                    "instr(lower(project_path), lower(?{})) > 0",
                    params.len()
                ));
            }
            Self::StatusEq(status) => {
                params.push(libsql::Value::Text(status.as_str().to_string()));
                conditions.push(format!("status = ?{}", params.len()));
            }
            Self::TtkVersionEq(version) => {
                params.push(libsql::Value::Text(version.clone()));
                conditions.push(format!("ttk_version = ?{}", params.len()));
            }
            // Timestamps compare as TEXT: RFC 3339 UTC strings sort
            // lexicographically in chronological order.
            Self::TimestampGte(bound) => {
                params.push(libsql::Value::Text(bound.to_rfc3339()));
                conditions.push(format!("timestamp >= ?{}", params.len()));
            }
            Self::TimestampLte(bound) => {
                params.push(libsql::Value::Text(bound.to_rfc3339()));
                conditions.push(format!("timestamp <= ?{}", params.len()));
            }
        }
    }
}

/// Render predicates as a `WHERE` clause plus positional parameters. No
/// predicates yields an empty clause.
#[must_use]
pub fn where_clause(predicates: &[Predicate]) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    for predicate in predicates {
        predicate.push_condition(&mut conditions, &mut params);
    }
    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, params)
}
