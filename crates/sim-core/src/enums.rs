//! Status and preference enums for simdesk.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! which is also the form persisted in SQL TEXT columns. Parsing from untrusted
//! strings goes through `parse()` functions returning `Result`, never panics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// SimulationStatus
// ---------------------------------------------------------------------------

/// A simulation status string that matched no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown simulation status: '{0}'")]
pub struct UnknownStatus(pub String);

/// Lifecycle status of a simulation run.
///
/// ```text
/// pending → running → completed
///         ↘         ↘ failed
/// ```
///
/// `completed` and `failed` are terminal. The transition table is enforced
/// by the use-case layer; repositories persist whatever they are handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl SimulationStatus {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Running, Self::Completed, Self::Failed],
            Self::Running => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether this state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_next_states().is_empty()
    }

    /// Parse a stored status string.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownStatus`] if `s` matches no variant.
    pub fn parse(s: &str) -> Result<Self, UnknownStatus> {
        match s {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ThemeMode
// ---------------------------------------------------------------------------

/// A theme string that matched no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid theme mode: '{0}' (expected system, light, or dark)")]
pub struct InvalidThemeMode(pub String);

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    System,
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a theme string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidThemeMode`] if `s` matches no variant.
    pub fn parse(s: &str) -> Result<Self, InvalidThemeMode> {
        match s {
            "system" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(InvalidThemeMode(other.to_string())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
