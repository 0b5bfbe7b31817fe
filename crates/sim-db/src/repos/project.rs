//! Project repository — libSQL implementation.

use async_trait::async_trait;
use chrono::Utc;

use sim_core::entities::Project;
use sim_core::ids;
use sim_core::requests::NewProject;

use crate::error::StoreError;
use crate::helpers::parse_datetime;
use crate::ports::ProjectRepository;
use crate::store::LibsqlStore;

const SELECT_COLS: &str = "id, name, path, created_at, updated_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, StoreError> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        path: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

#[async_trait]
impl ProjectRepository for LibsqlStore {
    async fn exists_by_path(&self, path: &str) -> Result<bool, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM projects WHERE path = ?1 LIMIT 1", [path])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    async fn insert(&self, new: NewProject) -> Result<Project, StoreError> {
        let now = Utc::now();
        let id = self.db().generate_id(ids::PROJECT).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO projects ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    new.path.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Project {
            id,
            name: new.name,
            path: new.path,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Project>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_project(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, project: &Project) -> Result<(), StoreError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE projects SET name = ?2, path = ?3, updated_at = ?4 WHERE id = ?1",
                libsql::params![
                    project.id.as_str(),
                    project.name.as_str(),
                    project.path.as_str(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        if affected == 0 {
            return Err(StoreError::RowNotFound {
                id: project.id.clone(),
            });
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.db()
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", [id])
            .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects ORDER BY name"),
                (),
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }
}
