//! Salary repository for PostgreSQL

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use super::{PgStore, SalaryRepository};
use crate::models::Salary;

#[async_trait]
impl SalaryRepository for PgStore {
    async fn list_salaries(&self) -> DatabaseResult<Vec<Salary>> {
        let salaries = sqlx::query_as::<_, Salary>(
            r#"
            SELECT id, employee, base_amount, bonus, total_amount, month, year, created_at
            FROM salaries
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(salaries)
    }

    async fn salaries_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Salary>> {
        let salaries = sqlx::query_as::<_, Salary>(
            r#"
            SELECT id, employee, base_amount, bonus, total_amount, month, year, created_at
            FROM salaries
            WHERE employee = $1
            ORDER BY year DESC, month DESC, created_at DESC
            "#,
        )
        .bind(employee)
        .fetch_all(self.pool())
        .await?;

        Ok(salaries)
    }

    async fn find_salary(&self, id: Uuid) -> DatabaseResult<Option<Salary>> {
        let salary = sqlx::query_as::<_, Salary>(
            r#"
            SELECT id, employee, base_amount, bonus, total_amount, month, year, created_at
            FROM salaries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(salary)
    }

    async fn insert_salary(&self, salary: &Salary) -> DatabaseResult<Salary> {
        let salary = sqlx::query_as::<_, Salary>(
            r#"
            INSERT INTO salaries (id, employee, base_amount, bonus, total_amount, month, year, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, employee, base_amount, bonus, total_amount, month, year, created_at
            "#,
        )
        .bind(salary.id)
        .bind(salary.employee)
        .bind(salary.base_amount)
        .bind(salary.bonus)
        .bind(salary.total_amount)
        .bind(salary.month)
        .bind(salary.year)
        .bind(salary.created_at)
        .fetch_one(self.pool())
        .await?;

        Ok(salary)
    }

    async fn save_salary(&self, salary: &Salary) -> DatabaseResult<Option<Salary>> {
        let salary = sqlx::query_as::<_, Salary>(
            r#"
            UPDATE salaries
            SET bonus = $2, total_amount = base_amount + $2, month = $3, year = $4
            WHERE id = $1
            RETURNING id, employee, base_amount, bonus, total_amount, month, year, created_at
            "#,
        )
        .bind(salary.id)
        .bind(salary.bonus)
        .bind(salary.month)
        .bind(salary.year)
        .fetch_optional(self.pool())
        .await?;

        Ok(salary)
    }

    async fn delete_salary(&self, id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM salaries WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn period_taken(
        &self,
        employee: Uuid,
        month: i32,
        year: i32,
        excluding: Option<Uuid>,
    ) -> DatabaseResult<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM salaries
                WHERE employee = $1 AND month = $2 AND year = $3
                  AND ($4::uuid IS NULL OR id <> $4)
            )
            "#,
        )
        .bind(employee)
        .bind(month)
        .bind(year)
        .bind(excluding)
        .fetch_one(self.pool())
        .await?;

        Ok(taken)
    }
}
