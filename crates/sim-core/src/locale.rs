//! Language tag value object for user preferences.
//!
//! `LanguageCode` only ever holds a validated, normalized BCP-47-shaped tag
//! (`en`, `pt-BR`, `es-419`). Construction goes through [`LanguageCode::parse`],
//! which returns a `Result` instead of panicking; serde deserialization routes
//! through the same path via `TryFrom<String>`.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pattern accepted by [`LanguageCode::parse`] (case-insensitive on input;
/// normalization happens after the match).
pub const LANGUAGE_TAG_PATTERN: &str = "^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$";

/// A language string that failed tag validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid language code: '{0}'")]
pub struct InvalidLanguageCode(pub String);

/// A validated language tag: a 2-3 letter primary subtag plus optional
/// 2-8 character alphanumeric subtags, dash-separated.
///
/// Normalized form: primary subtag lowercased, two-letter region subtags
/// uppercased (`pt-br` parses to `pt-BR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and normalize a language tag.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLanguageCode`] if `s` does not match the tag shape.
    pub fn parse(s: &str) -> Result<Self, InvalidLanguageCode> {
        let mut segments = s.split('-');

        let primary = segments.next().unwrap_or_default();
        if primary.len() < 2 || primary.len() > 3 || !primary.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(InvalidLanguageCode(s.to_string()));
        }

        let mut normalized = primary.to_ascii_lowercase();
        for segment in segments {
            if segment.len() < 2
                || segment.len() > 8
                || !segment.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(InvalidLanguageCode(s.to_string()));
            }
            normalized.push('-');
            // Region subtags (two letters) are conventionally uppercase.
            if segment.len() == 2 && segment.chars().all(|c| c.is_ascii_alphabetic()) {
                normalized.push_str(&segment.to_ascii_uppercase());
            } else {
                normalized.push_str(segment);
            }
        }

        Ok(Self(normalized))
    }

    /// The normalized tag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = InvalidLanguageCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl JsonSchema for LanguageCode {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("LanguageCode")
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "pattern": LANGUAGE_TAG_PATTERN
        })
    }
}
