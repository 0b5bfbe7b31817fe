//! Use-case error taxonomy.

use thiserror::Error;

use sim_core::enums::SimulationStatus;
use sim_db::StoreError;
use sim_schema::SchemaError;

/// Errors surfaced by the use-case services.
///
/// Validation failures keep their shape from [`SchemaError`]: input failures
/// arrive itemized per field, response failures arrive as a generic fault.
/// Storage faults pass through unchanged; the services add no retry or
/// suppression. Absence from a plain lookup is `Ok(None)`, never an error —
/// `NotFound` appears only where a use case requires the target to exist
/// (status transitions).
#[derive(Debug, Error)]
pub enum AppError {
    /// Input or response validation failure, shape preserved.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Storage-backend fault, propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An operation required a row that does not exist.
    #[error("Not found: {id}")]
    NotFound { id: String },

    /// A project with this path is already registered.
    #[error("Project path already registered: {path}")]
    ProjectExists { path: String },

    /// The requested status transition is not allowed from the current state.
    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: SimulationStatus,
        to: SimulationStatus,
    },
}
