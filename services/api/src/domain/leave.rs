//! Leave requests and decisions

use std::str::FromStr;

use tracing::info;
use uuid::Uuid;

use super::{DomainError, DomainResult, Policy};
use crate::{
    models::{Leave, LeaveDecisionRequest, LeaveStatus, NewLeaveRequest},
    repositories::{EmployeeRepository, LeaveRepository, RecordStore},
    validation::validate_required,
};

pub async fn list_leaves(store: &dyn RecordStore) -> DomainResult<Vec<Leave>> {
    Ok(store.list_leaves().await?)
}

pub async fn leaves_for(store: &dyn RecordStore, employee: Uuid) -> DomainResult<Vec<Leave>> {
    Ok(store.leaves_for_employee(employee).await?)
}

/// File a pending leave on behalf of `employee`
pub async fn request_leave(
    store: &dyn RecordStore,
    employee: Uuid,
    request: NewLeaveRequest,
) -> DomainResult<Leave> {
    validate_required("Reason", &request.reason).map_err(DomainError::Validation)?;

    if store.find_user(employee).await?.is_none() {
        return Err(DomainError::not_found("User not found"));
    }

    if request.end_date < request.start_date {
        return Err(DomainError::validation(
            "End date must not be before start date",
        ));
    }

    let leave = store
        .insert_leave(&Leave::pending(
            employee,
            request.start_date,
            request.end_date,
            request.reason.trim().to_string(),
        ))
        .await?;

    info!(leave_id = %leave.id, employee_id = %employee, days = leave.days(), "Leave requested");
    Ok(leave)
}

/// Approve or reject a leave.
///
/// Without [`Policy::lock_decided_leaves`] a later decision overwrites an
/// earlier one.
pub async fn decide_leave(
    store: &dyn RecordStore,
    policy: &Policy,
    id: Uuid,
    request: LeaveDecisionRequest,
) -> DomainResult<Leave> {
    let status = LeaveStatus::from_str(&request.status)
        .ok()
        .filter(LeaveStatus::is_decided)
        .ok_or_else(|| DomainError::validation("Invalid status"))?;

    if policy.lock_decided_leaves {
        let current = store
            .find_leave(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Leave request not found"))?;

        if current.status.is_decided() {
            return Err(DomainError::validation(format!(
                "Leave request has already been {}",
                current.status
            )));
        }
    }

    let leave = store
        .set_leave_status(id, status)
        .await?
        .ok_or_else(|| DomainError::not_found("Leave request not found"))?;

    info!(leave_id = %leave.id, status = %leave.status, "Leave decided");
    Ok(leave)
}
