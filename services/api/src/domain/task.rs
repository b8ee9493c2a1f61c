//! Task assignment and progress updates

use std::str::FromStr;

use tracing::info;
use uuid::Uuid;

use super::{DomainError, DomainResult, input::non_blank};
use crate::{
    models::{NewTaskRequest, Task, TaskStatus, TaskStatusRequest},
    repositories::{EmployeeRepository, ProjectRepository, RecordStore, TaskRepository},
    validation::validate_required,
};

fn parse_status(status: &str) -> DomainResult<TaskStatus> {
    TaskStatus::from_str(status.trim()).map_err(|_| DomainError::validation("Invalid status"))
}

pub async fn list_tasks(store: &dyn RecordStore) -> DomainResult<Vec<Task>> {
    Ok(store.list_tasks().await?)
}

pub async fn tasks_for(store: &dyn RecordStore, employee: Uuid) -> DomainResult<Vec<Task>> {
    Ok(store.tasks_for_employee(employee).await?)
}

/// Assign a task. The project and the employee must both exist.
pub async fn create_task(store: &dyn RecordStore, request: NewTaskRequest) -> DomainResult<Task> {
    validate_required("Title", &request.title).map_err(DomainError::Validation)?;

    let status = match request.status.as_deref().map(str::trim) {
        None | Some("") => TaskStatus::Todo,
        Some(status) => parse_status(status)?,
    };

    if store.find_project(request.project).await?.is_none() {
        return Err(DomainError::validation("Project does not exist"));
    }

    let assignee = store.find_user(request.employee).await?;
    if !assignee.as_ref().is_some_and(|user| user.is_employee()) {
        return Err(DomainError::validation("Employee does not exist"));
    }

    let task = store
        .insert_task(&Task::new(
            request.project,
            request.employee,
            request.title.trim().to_string(),
            non_blank(request.description),
            status,
        ))
        .await?;

    info!(
        task_id = %task.id,
        project_id = %task.project,
        employee_id = %task.employee,
        "Assigned task"
    );
    Ok(task)
}

/// Status change by the assignee. Someone else's task reads as missing.
pub async fn update_own_task_status(
    store: &dyn RecordStore,
    employee: Uuid,
    id: Uuid,
    request: TaskStatusRequest,
) -> DomainResult<Task> {
    let status = parse_status(&request.status)?;

    let owned = store
        .find_task(id)
        .await?
        .filter(|task| task.employee == employee);
    if owned.is_none() {
        return Err(DomainError::not_found("Task not found"));
    }

    let task = store
        .set_task_status(id, status)
        .await?
        .ok_or_else(|| DomainError::not_found("Task not found"))?;

    info!(task_id = %task.id, status = %task.status, "Task status updated");
    Ok(task)
}
