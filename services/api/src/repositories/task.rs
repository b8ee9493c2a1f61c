//! Task repository for PostgreSQL

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use super::{PgStore, TaskRepository};
use crate::models::{Task, TaskStatus};

#[async_trait]
impl TaskRepository for PgStore {
    async fn list_tasks(&self) -> DatabaseResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project, employee, title, description, status, created_at
            FROM tasks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(tasks)
    }

    async fn tasks_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project, employee, title, description, status, created_at
            FROM tasks
            WHERE employee = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(employee)
        .fetch_all(self.pool())
        .await?;

        Ok(tasks)
    }

    async fn find_task(&self, id: Uuid) -> DatabaseResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project, employee, title, description, status, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(task)
    }

    async fn insert_task(&self, task: &Task) -> DatabaseResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, project, employee, title, description, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, project, employee, title, description, status, created_at
            "#,
        )
        .bind(task.id)
        .bind(task.project)
        .bind(task.employee)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.created_at)
        .fetch_one(self.pool())
        .await?;

        Ok(task)
    }

    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> DatabaseResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2
            WHERE id = $1
            RETURNING id, project, employee, title, description, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool())
        .await?;

        Ok(task)
    }

    async fn count_tasks_with_status(&self, status: TaskStatus) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }
}
