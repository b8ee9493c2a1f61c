//! Repositories for record store operations
//!
//! Each entity has its own repository trait. [`PgStore`] implements all of them
//! against PostgreSQL, one file per entity; [`MemoryStore`] keeps the same
//! records in process. Writes are single-record; nothing here spans a
//! transaction.

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Leave, LeaveStatus, Project, Salary, Task, TaskStatus, User, UserChanges};

pub mod employee;
pub mod leave;
pub mod memory;
pub mod project;
pub mod salary;
pub mod task;

pub use memory::MemoryStore;

/// User records
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All users with the employee role, newest first
    async fn list_employees(&self) -> DatabaseResult<Vec<User>>;

    async fn find_user(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    /// Apply `changes` and return the updated record, or `None` if the id is unknown
    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> DatabaseResult<Option<User>>;

    async fn count_employees(&self) -> DatabaseResult<i64>;
}

/// Leave records
#[async_trait]
pub trait LeaveRepository: Send + Sync {
    async fn list_leaves(&self) -> DatabaseResult<Vec<Leave>>;

    async fn leaves_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Leave>>;

    async fn find_leave(&self, id: Uuid) -> DatabaseResult<Option<Leave>>;

    async fn insert_leave(&self, leave: &Leave) -> DatabaseResult<Leave>;

    async fn set_leave_status(&self, id: Uuid, status: LeaveStatus) -> DatabaseResult<Option<Leave>>;

    async fn count_leaves_with_status(&self, status: LeaveStatus) -> DatabaseResult<i64>;
}

/// Project records
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_projects(&self) -> DatabaseResult<Vec<Project>>;

    async fn find_project(&self, id: Uuid) -> DatabaseResult<Option<Project>>;

    async fn insert_project(&self, project: &Project) -> DatabaseResult<Project>;

    async fn count_projects(&self) -> DatabaseResult<i64>;
}

/// Task records
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list_tasks(&self) -> DatabaseResult<Vec<Task>>;

    async fn tasks_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Task>>;

    async fn find_task(&self, id: Uuid) -> DatabaseResult<Option<Task>>;

    async fn insert_task(&self, task: &Task) -> DatabaseResult<Task>;

    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> DatabaseResult<Option<Task>>;

    async fn count_tasks_with_status(&self, status: TaskStatus) -> DatabaseResult<i64>;
}

/// Salary records
#[async_trait]
pub trait SalaryRepository: Send + Sync {
    async fn list_salaries(&self) -> DatabaseResult<Vec<Salary>>;

    /// One employee's records, most recent period first
    async fn salaries_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Salary>>;

    async fn find_salary(&self, id: Uuid) -> DatabaseResult<Option<Salary>>;

    async fn insert_salary(&self, salary: &Salary) -> DatabaseResult<Salary>;

    /// Persist bonus, total and period of an existing record. The stored
    /// base amount is never written.
    async fn save_salary(&self, salary: &Salary) -> DatabaseResult<Option<Salary>>;

    /// Hard delete; `false` if nothing matched
    async fn delete_salary(&self, id: Uuid) -> DatabaseResult<bool>;

    /// Whether another record already covers the employee's pay period
    async fn period_taken(
        &self,
        employee: Uuid,
        month: i32,
        year: i32,
        excluding: Option<Uuid>,
    ) -> DatabaseResult<bool>;
}

/// Every repository the domain operations need
pub trait RecordStore:
    EmployeeRepository + LeaveRepository + ProjectRepository + TaskRepository + SalaryRepository
{
}

impl<T> RecordStore for T where
    T: EmployeeRepository + LeaveRepository + ProjectRepository + TaskRepository + SalaryRepository
{
}

/// PostgreSQL record store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
