//! Database configuration (local libSQL file or remote Turso instance).

use serde::{Deserialize, Serialize};

/// Default local database path, relative to the working directory.
fn default_db_path() -> String {
    ".simdesk/simdesk.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file path. Used when no remote URL is configured.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://simdesk.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Check if the config has the minimum required fields for remote access.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_local() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.path, ".simdesk/simdesk.db");
    }

    #[test]
    fn remote_when_url_and_token_set() {
        let config = DatabaseConfig {
            url: "libsql://simdesk.turso.io".into(),
            auth_token: "token123".into(),
            ..Default::default()
        };
        assert!(config.is_remote());
    }

    #[test]
    fn url_without_token_is_not_remote() {
        let config = DatabaseConfig {
            url: "libsql://simdesk.turso.io".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());
    }
}
