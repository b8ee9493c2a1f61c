//! Employee repository for PostgreSQL

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use super::{EmployeeRepository, PgStore};
use crate::models::{User, UserChanges};

#[async_trait]
impl EmployeeRepository for PgStore {
    async fn list_employees(&self) -> DatabaseResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, phone, address, department, position, salary,
                   created_at, updated_at
            FROM users
            WHERE role = 'employee'
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(users)
    }

    async fn find_user(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, phone, address, department, position, salary,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                department = COALESCE($6, department),
                position = COALESCE($7, position),
                salary = COALESCE($8, salary),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, role, phone, address, department, position, salary,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.address)
        .bind(&changes.department)
        .bind(&changes.position)
        .bind(changes.salary)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    async fn count_employees(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'employee'")
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }
}
