//! Central schema registry for all simdesk boundary types.
//!
//! The `SchemaRegistry` builds JSON Schemas from sim-core types at
//! construction time using [`schemars::schema_for!`], compiles them once with
//! `jsonschema`, and provides the two validation entry points that guard the
//! untyped/typed boundary: [`SchemaRegistry::validate_input`] and
//! [`SchemaRegistry::validate_response`].

use std::collections::HashMap;

use jsonschema::{ValidationError, Validator, error::ValidationErrorKind};
use schemars::schema_for;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{FieldViolation, SchemaError, ValueSource};

/// Central store of all JSON Schemas in the simdesk system.
///
/// Built from sim-core types via [`schemars::schema_for!`]; each schema is
/// compiled into a [`jsonschema::Validator`] once, at construction. Provides
/// lookup by name and validation of arbitrary JSON values against registered
/// schemas.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
    validators: HashMap<&'static str, Validator>,
}

/// Generate, compile, and insert a schema. Panics if `serde_json::to_value`
/// or compilation fails (not expected: `schemars` output is always valid
/// JSON Schema).
macro_rules! register {
    ($schemas:expr, $validators:expr, $name:expr, $ty:ty) => {
        let schema = serde_json::to_value(schema_for!($ty)).unwrap();
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(&schema)
            .unwrap();
        $schemas.insert($name, schema);
        $validators.insert($name, validator);
    };
}

impl SchemaRegistry {
    /// Build a new registry containing all entity, request, and response
    /// schemas from sim-core.
    ///
    /// # Panics
    ///
    /// Panics if any `schemars`-generated schema fails to serialize or
    /// compile. This is not expected in practice because `schemars` always
    /// produces valid JSON Schema output.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();
        let mut validators = HashMap::new();

        // --- Entities (3) ---
        register!(schemas, validators, "project", sim_core::entities::Project);
        register!(
            schemas,
            validators,
            "simulation_history_entry",
            sim_core::entities::SimulationHistoryEntry
        );
        register!(
            schemas,
            validators,
            "user_preferences",
            sim_core::entities::UserPreferences
        );

        // --- Request payloads (4) ---
        register!(
            schemas,
            validators,
            "new_project",
            sim_core::requests::NewProject
        );
        register!(
            schemas,
            validators,
            "new_simulation_entry",
            sim_core::requests::NewSimulationEntry
        );
        register!(
            schemas,
            validators,
            "preferences_input",
            sim_core::requests::PreferencesInput
        );
        register!(
            schemas,
            validators,
            "history_query",
            sim_core::requests::HistoryQuery
        );

        // --- Response envelopes (1) ---
        register!(
            schemas,
            validators,
            "search_result",
            sim_core::search::SearchResult
        );

        Self { schemas, validators }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Validate untyped input against a named schema and decode it.
    ///
    /// Collects **all** violations in a single pass, not just the first.
    /// Each violation carries the dot-joined path to the offending value
    /// (`user.name` for nested objects; a missing required property extends
    /// the parent path with the property name) and the caller-supplied
    /// `source` tag.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` for an unknown schema name,
    /// `SchemaError::Input` with one [`FieldViolation`] per violated
    /// constraint, or `SchemaError::Decode` if a schema-valid value fails to
    /// deserialize into `T` (schema/type drift).
    pub fn validate_input<T: DeserializeOwned>(
        &self,
        name: &str,
        raw: &serde_json::Value,
        source: ValueSource,
    ) -> Result<T, SchemaError> {
        let validator = self.validator(name)?;

        let violations: Vec<FieldViolation> = validator
            .iter_errors(raw)
            .map(|error| FieldViolation {
                field: field_path(&error),
                message: error.to_string(),
                source,
            })
            .collect();

        if !violations.is_empty() {
            return Err(SchemaError::Input { violations });
        }

        serde_json::from_value(raw.clone()).map_err(|error| SchemaError::Decode {
            schema: name.to_string(),
            reason: error.to_string(),
        })
    }

    /// Validate outbound data against a named schema before it leaves the
    /// application.
    ///
    /// Unlike input validation, a failure here is not attributable to
    /// end-user input: the offending payload and every cause are emitted to
    /// the diagnostic log, and the caller receives the collapsed
    /// `SchemaError::Response` with no per-field detail.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` for an unknown schema name,
    /// `SchemaError::Generation` if `data` fails to serialize, or
    /// `SchemaError::Response` when validation fails.
    pub fn validate_response<T: Serialize>(
        &self,
        name: &str,
        data: &T,
    ) -> Result<serde_json::Value, SchemaError> {
        let payload = serde_json::to_value(data).map_err(|error| {
            SchemaError::Generation(format!("serializing response for '{name}': {error}"))
        })?;

        let validator = self.validator(name)?;

        let causes: Vec<String> = validator
            .iter_errors(&payload)
            .map(|error| {
                let path = field_path(&error);
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{path}: {error}")
                }
            })
            .collect();

        if causes.is_empty() {
            return Ok(payload);
        }

        tracing::error!(
            schema = name,
            ?causes,
            %payload,
            "response failed schema validation"
        );
        Err(SchemaError::Response {
            schema: name.to_string(),
        })
    }

    fn validator(&self, name: &str) -> Result<&Validator, SchemaError> {
        self.validators
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Dot-joined path to the offending value. The validator reports a JSON
/// Pointer (`/user/name`); a missing required property is reported at the
/// parent, so its path is extended with the property name.
fn field_path(error: &ValidationError<'_>) -> String {
    let pointer = error.instance_path.to_string();
    let mut segments: Vec<String> = pointer
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(unescape_pointer_segment)
        .collect();

    if let ValidationErrorKind::Required { property } = &error.kind {
        if let Some(name) = property.as_str() {
            segments.push(name.to_string());
        }
    }

    segments.join(".")
}

/// RFC 6901 unescaping: `~1` is `/`, `~0` is `~`. Order matters.
fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
