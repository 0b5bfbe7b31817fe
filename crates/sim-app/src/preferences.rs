//! User-preference use cases.

use std::sync::Arc;

use chrono::Utc;

use sim_config::{ConfigError, GeneralConfig};
use sim_core::entities::UserPreferences;
use sim_core::enums::ThemeMode;
use sim_core::locale::LanguageCode;
use sim_core::requests::PreferencesInput;
use sim_db::ports::UserPreferencesRepository;
use sim_schema::{FieldViolation, SchemaError, SchemaRegistry, ValueSource};

use crate::error::AppError;

/// Parsed fallback values handed to users with nothing stored.
///
/// Parsed once at composition time so a bad configured default surfaces as a
/// [`ConfigError`] at startup instead of failing every `get_or_default` call.
#[derive(Debug, Clone)]
pub struct PreferenceDefaults {
    pub language: LanguageCode,
    pub theme: ThemeMode,
}

impl PreferenceDefaults {
    /// Parse the configured default language and theme.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when either configured string is
    /// not a valid value.
    pub fn from_config(general: &GeneralConfig) -> Result<Self, ConfigError> {
        let language =
            LanguageCode::parse(&general.default_language).map_err(|e| ConfigError::InvalidValue {
                field: "general.default_language".to_string(),
                reason: e.to_string(),
            })?;
        let theme =
            ThemeMode::parse(&general.default_theme).map_err(|e| ConfigError::InvalidValue {
                field: "general.default_theme".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { language, theme })
    }
}

/// Saving and fetching per-user preferences.
pub struct PreferencesService {
    repo: Arc<dyn UserPreferencesRepository>,
    registry: Arc<SchemaRegistry>,
    defaults: PreferenceDefaults,
}

impl PreferencesService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn UserPreferencesRepository>,
        registry: Arc<SchemaRegistry>,
        defaults: PreferenceDefaults,
    ) -> Self {
        Self {
            repo,
            registry,
            defaults,
        }
    }

    /// Save preferences from an untyped payload, inserting or replacing.
    ///
    /// Language and theme arrive as plain strings; both are parsed after
    /// schema validation and every failure is accumulated, so a payload with
    /// a bad language *and* a bad theme reports two violations, not one.
    ///
    /// # Errors
    ///
    /// Returns itemized `AppError::Schema` violations for invalid input and
    /// storage faults unchanged.
    pub async fn save(&self, raw: &serde_json::Value) -> Result<UserPreferences, AppError> {
        let input: PreferencesInput =
            self.registry
                .validate_input("preferences_input", raw, ValueSource::Body)?;

        let mut violations = Vec::new();
        let language = match LanguageCode::parse(&input.language) {
            Ok(language) => Some(language),
            Err(e) => {
                violations.push(FieldViolation {
                    field: "language".to_string(),
                    message: e.to_string(),
                    source: ValueSource::Body,
                });
                None
            }
        };
        let theme = match ThemeMode::parse(&input.theme) {
            Ok(theme) => Some(theme),
            Err(e) => {
                violations.push(FieldViolation {
                    field: "theme".to_string(),
                    message: e.to_string(),
                    source: ValueSource::Body,
                });
                None
            }
        };
        let (Some(language), Some(theme)) = (language, theme) else {
            return Err(SchemaError::Input { violations }.into());
        };

        let now = Utc::now();
        let prefs = UserPreferences {
            user_id: input.user_id.clone(),
            language,
            theme,
            created_at: now,
            updated_at: now,
        };

        if self.repo.exists(&input.user_id).await? {
            self.repo.update(&prefs).await?;
            self.repo
                .find_by_user_id(&input.user_id)
                .await?
                .ok_or(AppError::NotFound { id: input.user_id })
        } else {
            Ok(self.repo.insert(&prefs).await?)
        }
    }

    /// Fetch stored preferences. Absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns storage faults unchanged.
    pub async fn get(&self, user_id: &str) -> Result<Option<UserPreferences>, AppError> {
        Ok(self.repo.find_by_user_id(user_id).await?)
    }

    /// Fetch stored preferences, falling back to the configured defaults.
    ///
    /// The fallback is assembled on the fly and **not** persisted; a later
    /// [`save`](Self::save) is what creates the row.
    ///
    /// # Errors
    ///
    /// Returns storage faults unchanged.
    pub async fn get_or_default(&self, user_id: &str) -> Result<UserPreferences, AppError> {
        if let Some(stored) = self.repo.find_by_user_id(user_id).await? {
            return Ok(stored);
        }
        let now = Utc::now();
        Ok(UserPreferences {
            user_id: user_id.to_string(),
            language: self.defaults.language.clone(),
            theme: self.defaults.theme,
            created_at: now,
            updated_at: now,
        })
    }
}
