//! API models for records, request payloads and the response envelope

use serde::Serialize;
use thiserror::Error;

pub mod employee;
pub mod leave;
pub mod project;
pub mod report;
pub mod salary;
pub mod task;

pub use employee::{Area, ProfileUpdateRequest, Role, UpdateEmployeeRequest, User, UserChanges};
pub use leave::{Leave, LeaveDecisionRequest, LeaveStatus, NewLeaveRequest};
pub use project::{NewProjectRequest, Project};
pub use report::{DashboardStats, ProgressReport};
pub use salary::{IssueSalaryRequest, Salary, SalaryChanges, UpdateSalaryRequest};
pub use task::{NewTaskRequest, Task, TaskStatus, TaskStatusRequest};

/// A stored enum column or payload held a value outside its variant set
#[derive(Debug, Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Response envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a single value
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Successful response carrying a collection and its length
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_envelope_carries_count() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({"success": true, "data": [1, 2, 3], "count": 3}));
    }

    #[test]
    fn single_envelope_omits_count() {
        let body = serde_json::to_value(ApiResponse::data("ok")).unwrap();
        assert_eq!(body, json!({"success": true, "data": "ok"}));
    }
}
