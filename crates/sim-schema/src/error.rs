//! Schema validation error types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Origin of a validated value, supplied by the caller and echoed on every
/// violation so clients can tell which part of the request was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Request body payload.
    Body,
    /// Query-string parameters.
    Query,
    /// Path parameters.
    Params,
}

impl ValueSource {
    /// Wire-format string for this source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Params => "params",
        }
    }
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated constraint: the dot-joined path to the offending value
/// (`user.name` for nested objects), the validator's message, and the
/// caller-supplied origin tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
    pub source: ValueSource,
}

/// Errors from the schema registry.
///
/// Input and response failures are deliberately asymmetric: input violations
/// are client-actionable and itemized per field, while a response failure is
/// a programming defect collapsed to a generic fault (full detail goes to the
/// diagnostic log, never to the caller).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// Input value violated one or more schema constraints.
    #[error("Input validation failed with {} violation(s)", .violations.len())]
    Input {
        /// One record per violated constraint, in evaluation order.
        violations: Vec<FieldViolation>,
    },

    /// Response value violated its schema. Generic by design; the offending
    /// payload and causes are logged, not returned.
    #[error("Response failed validation against schema '{schema}'")]
    Response { schema: String },

    /// A schema-valid value failed to decode into its target type. Indicates
    /// drift between the registered schema and the Rust type.
    #[error("Value validated against '{schema}' but did not decode: {reason}")]
    Decode { schema: String, reason: String },

    /// Schema generation or serialization error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn source_wire_form_is_snake_case() {
        assert_eq!(ValueSource::Body.as_str(), "body");
        assert_eq!(ValueSource::Query.as_str(), "query");
        assert_eq!(ValueSource::Params.as_str(), "params");
        let json = serde_json::to_value(ValueSource::Params).unwrap();
        assert_eq!(json, serde_json::json!("params"));
    }

    #[test]
    fn input_error_reports_violation_count() {
        let err = SchemaError::Input {
            violations: vec![
                FieldViolation {
                    field: "name".into(),
                    message: "too short".into(),
                    source: ValueSource::Body,
                },
                FieldViolation {
                    field: "path".into(),
                    message: "too short".into(),
                    source: ValueSource::Body,
                },
            ],
        };
        assert_eq!(err.to_string(), "Input validation failed with 2 violation(s)");
    }

    #[test]
    fn response_error_is_generic() {
        let err = SchemaError::Response {
            schema: "search_result".into(),
        };
        assert_eq!(
            err.to_string(),
            "Response failed validation against schema 'search_result'"
        );
    }
}
