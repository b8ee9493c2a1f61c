//! In-process record store
//!
//! Holds every entity in insertion order behind `tokio` locks and implements
//! the same repository traits as [`super::PgStore`]. Listings come back newest
//! first to match the SQL ordering.

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use std::cmp::Reverse;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    EmployeeRepository, LeaveRepository, ProjectRepository, SalaryRepository, TaskRepository,
};
use crate::models::{Leave, LeaveStatus, Project, Salary, Task, TaskStatus, User, UserChanges};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    leaves: RwLock<Vec<Leave>>,
    projects: RwLock<Vec<Project>>,
    tasks: RwLock<Vec<Task>>,
    salaries: RwLock<Vec<Salary>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user record. Accounts are provisioned outside this service, so
    /// there is no repository method for it.
    pub async fn insert_user(&self, user: User) -> User {
        self.users.write().await.push(user.clone());
        user
    }
}

fn newest_first<T: Clone>(records: &[T]) -> Vec<T> {
    records.iter().rev().cloned().collect()
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn list_employees(&self) -> DatabaseResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().rev().filter(|u| u.is_employee()).cloned().collect())
    }

    async fn find_user(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_user(&self, id: Uuid, changes: &UserChanges) -> DatabaseResult<Option<User>> {
        let mut users = self.users.write().await;
        if !users.iter().any(|u| u.id == id) {
            return Ok(None);
        }

        // Mirrors the UNIQUE constraint on users.email
        if let Some(email) = &changes.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
            }
        }

        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            changes.apply(user);
            user.clone()
        }))
    }

    async fn count_employees(&self) -> DatabaseResult<i64> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.is_employee()).count() as i64)
    }
}

#[async_trait]
impl LeaveRepository for MemoryStore {
    async fn list_leaves(&self) -> DatabaseResult<Vec<Leave>> {
        Ok(newest_first(&self.leaves.read().await))
    }

    async fn leaves_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Leave>> {
        let leaves = self.leaves.read().await;
        Ok(leaves.iter().rev().filter(|l| l.employee == employee).cloned().collect())
    }

    async fn find_leave(&self, id: Uuid) -> DatabaseResult<Option<Leave>> {
        let leaves = self.leaves.read().await;
        Ok(leaves.iter().find(|l| l.id == id).cloned())
    }

    async fn insert_leave(&self, leave: &Leave) -> DatabaseResult<Leave> {
        self.leaves.write().await.push(leave.clone());
        Ok(leave.clone())
    }

    async fn set_leave_status(&self, id: Uuid, status: LeaveStatus) -> DatabaseResult<Option<Leave>> {
        let mut leaves = self.leaves.write().await;
        Ok(leaves.iter_mut().find(|l| l.id == id).map(|leave| {
            leave.status = status;
            leave.clone()
        }))
    }

    async fn count_leaves_with_status(&self, status: LeaveStatus) -> DatabaseResult<i64> {
        let leaves = self.leaves.read().await;
        Ok(leaves.iter().filter(|l| l.status == status).count() as i64)
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn list_projects(&self) -> DatabaseResult<Vec<Project>> {
        Ok(newest_first(&self.projects.read().await))
    }

    async fn find_project(&self, id: Uuid) -> DatabaseResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_project(&self, project: &Project) -> DatabaseResult<Project> {
        self.projects.write().await.push(project.clone());
        Ok(project.clone())
    }

    async fn count_projects(&self) -> DatabaseResult<i64> {
        Ok(self.projects.read().await.len() as i64)
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn list_tasks(&self) -> DatabaseResult<Vec<Task>> {
        Ok(newest_first(&self.tasks.read().await))
    }

    async fn tasks_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().rev().filter(|t| t.employee == employee).cloned().collect())
    }

    async fn find_task(&self, id: Uuid) -> DatabaseResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_task(&self, task: &Task) -> DatabaseResult<Task> {
        self.tasks.write().await.push(task.clone());
        Ok(task.clone())
    }

    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> DatabaseResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.status = status;
            task.clone()
        }))
    }

    async fn count_tasks_with_status(&self, status: TaskStatus) -> DatabaseResult<i64> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| t.status == status).count() as i64)
    }
}

#[async_trait]
impl SalaryRepository for MemoryStore {
    async fn list_salaries(&self) -> DatabaseResult<Vec<Salary>> {
        Ok(newest_first(&self.salaries.read().await))
    }

    async fn salaries_for_employee(&self, employee: Uuid) -> DatabaseResult<Vec<Salary>> {
        let salaries = self.salaries.read().await;
        let mut history: Vec<Salary> = salaries
            .iter()
            .filter(|s| s.employee == employee)
            .cloned()
            .collect();
        history.sort_by_key(|s| Reverse((s.year, s.month, s.created_at)));
        Ok(history)
    }

    async fn find_salary(&self, id: Uuid) -> DatabaseResult<Option<Salary>> {
        let salaries = self.salaries.read().await;
        Ok(salaries.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_salary(&self, salary: &Salary) -> DatabaseResult<Salary> {
        self.salaries.write().await.push(salary.clone());
        Ok(salary.clone())
    }

    async fn save_salary(&self, salary: &Salary) -> DatabaseResult<Option<Salary>> {
        let mut salaries = self.salaries.write().await;
        let Some(stored) = salaries.iter_mut().find(|s| s.id == salary.id) else {
            return Ok(None);
        };

        let total_amount = stored
            .base_amount
            .checked_add(salary.bonus)
            .ok_or_else(|| DatabaseError::OutOfRange("total_amount".to_string()))?;

        stored.bonus = salary.bonus;
        stored.total_amount = total_amount;
        stored.month = salary.month;
        stored.year = salary.year;
        Ok(Some(stored.clone()))
    }

    async fn delete_salary(&self, id: Uuid) -> DatabaseResult<bool> {
        let mut salaries = self.salaries.write().await;
        let before = salaries.len();
        salaries.retain(|s| s.id != id);
        Ok(salaries.len() < before)
    }

    async fn period_taken(
        &self,
        employee: Uuid,
        month: i32,
        year: i32,
        excluding: Option<Uuid>,
    ) -> DatabaseResult<bool> {
        let salaries = self.salaries.read().await;
        Ok(salaries.iter().any(|s| {
            s.employee == employee
                && s.month == month
                && s.year == year
                && Some(s.id) != excluding
        }))
    }
}
