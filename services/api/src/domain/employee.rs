//! Employee directory and self-service profile

use common::error::DatabaseError;
use tracing::info;
use uuid::Uuid;

use super::{
    DomainError, DomainResult,
    input::{non_blank, parse_salary},
};
use crate::{
    models::{ProfileUpdateRequest, UpdateEmployeeRequest, User, UserChanges},
    repositories::{EmployeeRepository, RecordStore},
    validation::{validate_email, validate_name, validate_phone},
};

pub async fn list_employees(store: &dyn RecordStore) -> DomainResult<Vec<User>> {
    Ok(store.list_employees().await?)
}

/// A user holding the employee role
pub async fn get_employee(store: &dyn RecordStore, id: Uuid) -> DomainResult<User> {
    store
        .find_user(id)
        .await?
        .filter(User::is_employee)
        .ok_or_else(|| DomainError::not_found("Employee not found"))
}

fn profile_changes(
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    department: Option<String>,
    position: Option<String>,
) -> DomainResult<UserChanges> {
    let changes = UserChanges {
        name: non_blank(name),
        phone: non_blank(phone),
        address: non_blank(address),
        department: non_blank(department),
        position: non_blank(position),
        ..Default::default()
    };

    if let Some(name) = &changes.name {
        validate_name("Name", name).map_err(DomainError::Validation)?;
    }
    if let Some(phone) = &changes.phone {
        validate_phone(phone).map_err(DomainError::Validation)?;
    }

    Ok(changes)
}

/// Admin edit of an employee record. The role cannot be changed here.
pub async fn update_employee(
    store: &dyn RecordStore,
    id: Uuid,
    request: UpdateEmployeeRequest,
) -> DomainResult<User> {
    let mut changes = profile_changes(
        request.name,
        request.phone,
        request.address,
        request.department,
        request.position,
    )?;

    if let Some(email) = non_blank(request.email) {
        validate_email(&email).map_err(DomainError::Validation)?;
        changes.email = Some(email);
    }

    if let Some(salary) = &request.salary {
        changes.salary = parse_salary(salary)?;
    }

    let user = store
        .update_user(id, &changes)
        .await
        .map_err(|err| match err {
            DatabaseError::UniqueViolation(_) => DomainError::validation("Email already in use"),
            other => other.into(),
        })?
        .ok_or_else(|| DomainError::not_found("Employee not found"))?;

    info!(employee_id = %user.id, salary_changed = changes.salary.is_some(), "Updated employee");
    Ok(user)
}

/// The caller's own record
pub async fn profile(store: &dyn RecordStore, user_id: Uuid) -> DomainResult<User> {
    store
        .find_user(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))
}

/// Self-service edit limited to contact and placement fields
pub async fn update_profile(
    store: &dyn RecordStore,
    user_id: Uuid,
    request: ProfileUpdateRequest,
) -> DomainResult<User> {
    let changes = profile_changes(
        request.name,
        request.phone,
        request.address,
        request.department,
        request.position,
    )?;

    let user = store
        .update_user(user_id, &changes)
        .await?
        .ok_or_else(|| DomainError::not_found("User not found"))?;

    info!(user_id = %user.id, "Updated own profile");
    Ok(user)
}
