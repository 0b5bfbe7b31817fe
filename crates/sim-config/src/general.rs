//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for history search.
const fn default_per_page() -> u32 {
    10
}

/// Default UI language tag.
fn default_language() -> String {
    "en".to_string()
}

/// Default theme mode.
fn default_theme() -> String {
    "system".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size used when a history query carries no pagination.
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,

    /// Language tag seeded into preferences for users with none stored.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Theme mode seeded into preferences for users with none stored.
    #[serde(default = "default_theme")]
    pub default_theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            default_language: default_language(),
            default_theme: default_theme(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_per_page, 10);
        assert_eq!(config.default_language, "en");
        assert_eq!(config.default_theme, "system");
    }
}
