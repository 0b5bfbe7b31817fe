//! User preferences repository — libSQL implementation.
//!
//! Rows store the value objects as their canonical strings; reading a row
//! re-parses them, so a corrupted column surfaces as `StoreError::Query`
//! instead of leaking an unvalidated string into the domain.

use async_trait::async_trait;
use chrono::Utc;

use sim_core::entities::UserPreferences;
use sim_core::enums::ThemeMode;
use sim_core::locale::LanguageCode;

use crate::error::StoreError;
use crate::helpers::parse_datetime;
use crate::ports::UserPreferencesRepository;
use crate::store::LibsqlStore;

const SELECT_COLS: &str = "user_id, language, theme, created_at, updated_at";

fn row_to_preferences(row: &libsql::Row) -> Result<UserPreferences, StoreError> {
    let language_raw = row.get::<String>(1)?;
    let theme_raw = row.get::<String>(2)?;
    Ok(UserPreferences {
        user_id: row.get(0)?,
        language: LanguageCode::parse(&language_raw)
            .map_err(|e| StoreError::Query(format!("stored language is invalid: {e}")))?,
        theme: ThemeMode::parse(&theme_raw)
            .map_err(|e| StoreError::Query(format!("stored theme is invalid: {e}")))?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

#[async_trait]
impl UserPreferencesRepository for LibsqlStore {
    async fn exists(&self, user_id: &str) -> Result<bool, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM user_preferences WHERE user_id = ?1 LIMIT 1",
                [user_id],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn insert(&self, prefs: &UserPreferences) -> Result<UserPreferences, StoreError> {
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO user_preferences ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"
                ),
                libsql::params![
                    prefs.user_id.as_str(),
                    prefs.language.as_str(),
                    prefs.theme.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        let mut stored = prefs.clone();
        stored.created_at = now;
        stored.updated_at = now;
        Ok(stored)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<UserPreferences>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM user_preferences WHERE user_id = ?1"),
                [user_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_preferences(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, prefs: &UserPreferences) -> Result<(), StoreError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE user_preferences SET language = ?2, theme = ?3, updated_at = ?4
                 WHERE user_id = ?1",
                libsql::params![
                    prefs.user_id.as_str(),
                    prefs.language.as_str(),
                    prefs.theme.as_str(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::RowNotFound {
                id: prefs.user_id.clone(),
            });
        }
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<(), StoreError> {
        self.db()
            .conn()
            .execute("DELETE FROM user_preferences WHERE user_id = ?1", [user_id])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_store;

    fn prefs(user_id: &str, language: &str, theme: ThemeMode) -> UserPreferences {
        UserPreferences {
            user_id: user_id.to_string(),
            language: LanguageCode::parse(language).unwrap(),
            theme,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_stamps_and_roundtrips() {
        let store = test_store().await;
        let repo: &dyn UserPreferencesRepository = &store;

        let stored = repo
            .insert(&prefs("user-1", "pt-BR", ThemeMode::Dark))
            .await
            .unwrap();
        assert!(repo.exists("user-1").await.unwrap());

        let fetched = repo.find_by_user_id("user-1").await.unwrap().unwrap();
        assert_eq!(fetched.language.as_str(), "pt-BR");
        assert_eq!(fetched.theme, ThemeMode::Dark);
        assert_eq!(fetched.created_at, stored.created_at);
    }

    #[tokio::test]
    async fn duplicate_user_id_rejected() {
        let store = test_store().await;
        let repo: &dyn UserPreferencesRepository = &store;

        repo.insert(&prefs("user-1", "en", ThemeMode::System))
            .await
            .unwrap();
        let dup = repo.insert(&prefs("user-1", "en", ThemeMode::Light)).await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn update_replaces_language_and_theme() {
        let store = test_store().await;
        let repo: &dyn UserPreferencesRepository = &store;

        let stored = repo
            .insert(&prefs("user-1", "en", ThemeMode::System))
            .await
            .unwrap();

        let mut next = stored.clone();
        next.language = LanguageCode::parse("es-419").unwrap();
        next.theme = ThemeMode::Light;
        repo.update(&next).await.unwrap();

        let fetched = repo.find_by_user_id("user-1").await.unwrap().unwrap();
        assert_eq!(fetched.language.as_str(), "es-419");
        assert_eq!(fetched.theme, ThemeMode::Light);
        assert_eq!(fetched.created_at, stored.created_at);
        assert!(fetched.updated_at >= stored.updated_at);
    }

    #[tokio::test]
    async fn update_missing_user_fails() {
        let store = test_store().await;
        let repo: &dyn UserPreferencesRepository = &store;

        let result = repo.update(&prefs("user-9", "en", ThemeMode::System)).await;
        assert!(matches!(result, Err(StoreError::RowNotFound { .. })));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = test_store().await;
        let repo: &dyn UserPreferencesRepository = &store;

        repo.insert(&prefs("user-1", "en", ThemeMode::System))
            .await
            .unwrap();
        repo.delete("user-1").await.unwrap();
        assert_eq!(repo.find_by_user_id("user-1").await.unwrap(), None);
        repo.delete("user-1").await.unwrap();
    }

    #[tokio::test]
    async fn corrupted_theme_column_is_a_query_error() {
        let store = test_store().await;

        store
            .db()
            .conn()
            .execute(
                "INSERT INTO user_preferences (user_id, language, theme, created_at, updated_at)
                 VALUES ('user-x', 'en', 'midnight', '2026-08-01T12:00:00+00:00',
                         '2026-08-01T12:00:00+00:00')",
                (),
            )
            .await
            .unwrap();

        let repo: &dyn UserPreferencesRepository = &store;
        let result = repo.find_by_user_id("user-x").await;
        assert!(matches!(result, Err(StoreError::Query(_))));
    }
}
