//! Leave repository for PostgreSQL

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use super::{LeaveRepository, PgStore};
use crate::models::{Leave, LeaveStatus};

#[async_trait]
impl LeaveRepository for PgStore {
    async fn list_leaves(&self) -> DatabaseResult<Vec<Leave>> {
        let leaves = sqlx::query_as::<_, Leave>(
            r#"
            SELECT id, employee, start_date, end_date, reason, status, created_at
            FROM leaves
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(leaves)
    }

    async fn leaves_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Leave>> {
        let leaves = sqlx::query_as::<_, Leave>(
            r#"
            SELECT id, employee, start_date, end_date, reason, status, created_at
            FROM leaves
            WHERE employee = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(employee)
        .fetch_all(self.pool())
        .await?;

        Ok(leaves)
    }

    async fn find_leave(&self, id: Uuid) -> DatabaseResult<Option<Leave>> {
        let leave = sqlx::query_as::<_, Leave>(
            r#"
            SELECT id, employee, start_date, end_date, reason, status, created_at
            FROM leaves
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(leave)
    }

    async fn insert_leave(&self, leave: &Leave) -> DatabaseResult<Leave> {
        let leave = sqlx::query_as::<_, Leave>(
            r#"
            INSERT INTO leaves (id, employee, start_date, end_date, reason, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, employee, start_date, end_date, reason, status, created_at
            "#,
        )
        .bind(leave.id)
        .bind(leave.employee)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(&leave.reason)
        .bind(leave.status.as_str())
        .bind(leave.created_at)
        .fetch_one(self.pool())
        .await?;

        Ok(leave)
    }

    async fn set_leave_status(&self, id: Uuid, status: LeaveStatus) -> DatabaseResult<Option<Leave>> {
        let leave = sqlx::query_as::<_, Leave>(
            r#"
            UPDATE leaves
            SET status = $2
            WHERE id = $1
            RETURNING id, employee, start_date, end_date, reason, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool())
        .await?;

        Ok(leave)
    }

    async fn count_leaves_with_status(&self, status: LeaveStatus) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leaves WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }
}
