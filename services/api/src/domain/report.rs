//! Read-only aggregates over tasks, leaves and users

use uuid::Uuid;

use super::{DomainError, DomainResult};
use crate::{
    models::{DashboardStats, LeaveStatus, ProgressReport, TaskStatus},
    repositories::{
        EmployeeRepository, LeaveRepository, ProjectRepository, RecordStore, TaskRepository,
    },
};

/// Completion ratio over every task assigned to `employee`
pub async fn progress_report(store: &dyn RecordStore, employee: Uuid) -> DomainResult<ProgressReport> {
    let tasks = store.tasks_for_employee(employee).await?;
    Ok(ProgressReport::from_tasks(tasks))
}

/// Progress of a user who must hold the employee role
pub async fn employee_progress(
    store: &dyn RecordStore,
    employee: Uuid,
) -> DomainResult<ProgressReport> {
    let exists = store
        .find_user(employee)
        .await?
        .is_some_and(|user| user.is_employee());
    if !exists {
        return Err(DomainError::not_found("Employee not found"));
    }

    progress_report(store, employee).await
}

pub async fn dashboard_stats(store: &dyn RecordStore) -> DomainResult<DashboardStats> {
    Ok(DashboardStats {
        total_employees: store.count_employees().await?,
        pending_leaves: store.count_leaves_with_status(LeaveStatus::Pending).await?,
        total_projects: store.count_projects().await?,
        completed_tasks: store.count_tasks_with_status(TaskStatus::Completed).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Leave, Project, Role, Task, User},
        repositories::MemoryStore,
    };
    use chrono::NaiveDate;

    #[tokio::test]
    async fn two_of_three_is_two_thirds() {
        let store = MemoryStore::new();
        let user = store
            .insert_user(User::new("Ada", "ada@example.com", Role::Employee))
            .await;
        let project = Uuid::new_v4();
        for status in [TaskStatus::Completed, TaskStatus::Completed, TaskStatus::Todo] {
            store
                .insert_task(&Task::new(project, user.id, "t".to_string(), None, status))
                .await
                .unwrap();
        }

        match employee_progress(&store, user.id).await.unwrap() {
            ProgressReport::Measured {
                total_tasks,
                completed_tasks,
                progress,
                ..
            } => {
                assert_eq!((total_tasks, completed_tasks), (3, 2));
                assert_eq!(progress, "66.67%");
            }
            other => panic!("expected measured progress, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn no_tasks_gives_message() {
        let store = MemoryStore::new();
        let user = store
            .insert_user(User::new("Ada", "ada@example.com", Role::Employee))
            .await;

        let report = employee_progress(&store, user.id).await.unwrap();

        assert!(matches!(report, ProgressReport::Empty { progress: 0, .. }));
    }

    #[tokio::test]
    async fn unknown_employee_has_no_progress() {
        let store = MemoryStore::new();

        let result = employee_progress(&store, Uuid::new_v4()).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn dashboard_counts_each_predicate() {
        let store = MemoryStore::new();
        let ada = store
            .insert_user(User::new("Ada", "ada@example.com", Role::Employee))
            .await;
        store
            .insert_user(User::new("Root", "root@example.com", Role::Admin))
            .await;
        let project = store
            .insert_project(&Project::new("Intranet".to_string(), "Rebuild".to_string()))
            .await
            .unwrap();
        store
            .insert_task(&Task::new(project.id, ada.id, "a".to_string(), None, TaskStatus::Completed))
            .await
            .unwrap();
        store
            .insert_task(&Task::new(project.id, ada.id, "b".to_string(), None, TaskStatus::InProgress))
            .await
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let approved = store
            .insert_leave(&Leave::pending(ada.id, day, day, "Dentist".to_string()))
            .await
            .unwrap();
        store
            .set_leave_status(approved.id, LeaveStatus::Approved)
            .await
            .unwrap();
        store
            .insert_leave(&Leave::pending(ada.id, day, day, "Move".to_string()))
            .await
            .unwrap();

        let stats = dashboard_stats(&store).await.unwrap();

        assert_eq!(
            stats,
            DashboardStats {
                total_employees: 1,
                pending_leaves: 1,
                total_projects: 1,
                completed_tasks: 1,
            }
        );
    }
}
