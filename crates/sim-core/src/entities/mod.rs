//! Entity structs for the persisted simdesk aggregates.
//!
//! Each entity maps 1:1 to a table in the backing store. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! boundary validation.

mod history;
mod preferences;
mod project;

pub use history::SimulationHistoryEntry;
pub use preferences::UserPreferences;
pub use project::Project;
