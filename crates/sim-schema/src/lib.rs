//! # sim-schema
//!
//! JSON Schema generation, validation, and registry for simdesk.
//!
//! This crate provides:
//! - `SchemaRegistry`: central store of all JSON Schemas in the system,
//!   compiled once at construction
//! - `validate_input`: the only sanctioned path for crossing the
//!   untyped/typed boundary on input — itemized, field-indexed violations
//! - `validate_response`: the outbound guard — failures collapse to a
//!   generic fault and the detail goes to the diagnostic log
//!
//! ## Architecture
//!
//! Boundary types are defined in `sim-core` with `#[derive(JsonSchema)]`.
//! This crate imports those types and provides the registry and validation
//! layer. Consumer crates (sim-app) depend on sim-schema for runtime
//! validation.

pub mod error;
pub mod registry;

pub use error::{FieldViolation, SchemaError, ValueSource};
pub use registry::SchemaRegistry;
