//! Project repository for PostgreSQL

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use super::{PgStore, ProjectRepository};
use crate::models::Project;

#[async_trait]
impl ProjectRepository for PgStore {
    async fn list_projects(&self) -> DatabaseResult<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, created_at FROM projects ORDER BY created_at DESC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(projects)
    }

    async fn find_project(&self, id: Uuid) -> DatabaseResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, description, created_at FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(project)
    }

    async fn insert_project(&self, project: &Project) -> DatabaseResult<Project> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.created_at)
        .fetch_one(self.pool())
        .await?;

        Ok(project)
    }

    async fn count_projects(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }
}
