use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ThemeMode;
use crate::locale::LanguageCode;

/// Per-user workbench preferences, keyed by the caller-supplied user id.
///
/// `language` and `theme` are validated value objects — a `UserPreferences`
/// value never holds an unparsed string.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserPreferences {
    pub user_id: String,
    pub language: LanguageCode,
    pub theme: ThemeMode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
