//! Salary issuance, update, deletion and history

use tracing::info;
use uuid::Uuid;

use super::{
    DomainError, DomainResult, Policy,
    input::{checked_total, parse_bonus, parse_month, parse_year},
};
use crate::{
    models::{IssueSalaryRequest, Salary, SalaryChanges, UpdateSalaryRequest},
    repositories::{EmployeeRepository, RecordStore, SalaryRepository},
};

pub async fn list_salaries(store: &dyn RecordStore) -> DomainResult<Vec<Salary>> {
    Ok(store.list_salaries().await?)
}

/// One employee's salary records, most recent pay period first
pub async fn salary_history(store: &dyn RecordStore, employee: Uuid) -> DomainResult<Vec<Salary>> {
    Ok(store.salaries_for_employee(employee).await?)
}

/// Issue a salary record for one pay period.
///
/// The employee's current base salary is copied into the record; later edits
/// to the profile do not reach records already issued.
pub async fn issue_salary(
    store: &dyn RecordStore,
    policy: &Policy,
    request: IssueSalaryRequest,
) -> DomainResult<Salary> {
    let employee = store
        .find_user(request.employee)
        .await?
        .ok_or_else(|| DomainError::not_found("Employee not found"))?;

    let base_amount = employee.salary.ok_or_else(|| {
        DomainError::validation(
            "Employee base salary not set. Please set it in employee details first.",
        )
    })?;

    let bonus = parse_bonus(request.bonus.as_ref())?;
    let month = parse_month(request.month.as_ref())?;
    let year = parse_year(request.year.as_ref())?;
    checked_total(base_amount, bonus)?;

    if policy.unique_salary_period && store.period_taken(employee.id, month, year, None).await? {
        return Err(DomainError::validation(format!(
            "Salary already issued for {:02}/{}",
            month, year
        )));
    }

    let salary = store
        .insert_salary(&Salary::issue(employee.id, base_amount, bonus, month, year))
        .await?;

    info!(
        salary_id = %salary.id,
        employee_id = %employee.id,
        month,
        year,
        "Issued salary record"
    );

    Ok(salary)
}

fn parse_changes(request: &UpdateSalaryRequest) -> DomainResult<SalaryChanges> {
    Ok(SalaryChanges {
        bonus: request
            .bonus
            .as_ref()
            .map(|bonus| parse_bonus(Some(bonus)))
            .transpose()?,
        month: request
            .month
            .as_ref()
            .map(|month| parse_month(Some(month)))
            .transpose()?,
        year: request
            .year
            .as_ref()
            .map(|year| parse_year(Some(year)))
            .transpose()?,
    })
}

/// Update bonus and pay period of a record; the total is always recomputed
/// from the stored base amount
pub async fn update_salary(
    store: &dyn RecordStore,
    policy: &Policy,
    id: Uuid,
    request: UpdateSalaryRequest,
) -> DomainResult<Salary> {
    let mut salary = store
        .find_salary(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Salary record not found"))?;

    let changes = parse_changes(&request)?;
    checked_total(salary.base_amount, changes.bonus.unwrap_or(salary.bonus))?;

    if policy.unique_salary_period && changes.moves_period() {
        let (month, year) = salary.period_after(&changes);
        if store.period_taken(salary.employee, month, year, Some(salary.id)).await? {
            return Err(DomainError::validation(format!(
                "Salary already issued for {:02}/{}",
                month, year
            )));
        }
    }

    salary.apply(&changes);

    let saved = store
        .save_salary(&salary)
        .await?
        .ok_or_else(|| DomainError::not_found("Salary record not found"))?;

    info!(salary_id = %saved.id, "Updated salary record");
    Ok(saved)
}

pub async fn delete_salary(store: &dyn RecordStore, id: Uuid) -> DomainResult<()> {
    if !store.delete_salary(id).await? {
        return Err(DomainError::not_found("Salary record not found"));
    }

    info!(salary_id = %id, "Deleted salary record");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Role, User, UserChanges},
        repositories::MemoryStore,
    };
    use rust_decimal::Decimal;
    use serde_json::json;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    async fn store_with_employee(base: Option<&str>) -> (MemoryStore, User) {
        let store = MemoryStore::new();
        let mut user = User::new("Grace", "grace@example.com", Role::Employee);
        user.salary = base.map(dec);
        let user = store.insert_user(user).await;
        (store, user)
    }

    fn issue_request(employee: Uuid, bonus: serde_json::Value) -> IssueSalaryRequest {
        IssueSalaryRequest {
            employee,
            bonus: Some(bonus),
            month: Some(json!(6)),
            year: Some(json!(2024)),
        }
    }

    #[tokio::test]
    async fn issue_snapshots_base_salary() {
        let (store, user) = store_with_employee(Some("5000.00")).await;

        let salary = issue_salary(&store, &Policy::default(), issue_request(user.id, json!(250)))
            .await
            .unwrap();

        assert_eq!(salary.base_amount, dec("5000.00"));
        assert_eq!(salary.bonus, dec("250.00"));
        assert_eq!(salary.total_amount, dec("5250.00"));
        assert_eq!((salary.month, salary.year), (6, 2024));

        // A later raise does not touch the issued record
        store
            .update_user(
                user.id,
                &UserChanges {
                    salary: Some(dec("9000")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let stored = store.find_salary(salary.id).await.unwrap().unwrap();
        assert_eq!(stored.base_amount, dec("5000.00"));
    }

    #[tokio::test]
    async fn issue_without_base_salary_creates_nothing() {
        let (store, user) = store_with_employee(None).await;

        let result =
            issue_salary(&store, &Policy::default(), issue_request(user.id, json!(0))).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.list_salaries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn issue_for_unknown_employee_is_not_found() {
        let store = MemoryStore::new();

        let result =
            issue_salary(&store, &Policy::default(), issue_request(Uuid::new_v4(), json!(0))).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn duplicate_period_follows_policy() {
        let (store, user) = store_with_employee(Some("3000")).await;

        issue_salary(&store, &Policy::default(), issue_request(user.id, json!(0)))
            .await
            .unwrap();
        issue_salary(&store, &Policy::default(), issue_request(user.id, json!(0)))
            .await
            .unwrap();
        assert_eq!(store.list_salaries().await.unwrap().len(), 2);

        let strict = Policy {
            unique_salary_period: true,
            ..Default::default()
        };
        let result = issue_salary(&store, &strict, issue_request(user.id, json!(0))).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.list_salaries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_recomputes_total_and_keeps_base() {
        let (store, user) = store_with_employee(Some("5000.00")).await;
        let salary = issue_salary(&store, &Policy::default(), issue_request(user.id, json!(250)))
            .await
            .unwrap();

        let updated = update_salary(
            &store,
            &Policy::default(),
            salary.id,
            UpdateSalaryRequest {
                bonus: Some(json!("300")),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.base_amount, dec("5000.00"));
        assert_eq!(updated.bonus, dec("300.00"));
        assert_eq!(updated.total_amount, dec("5300.00"));
        assert!(updated.is_consistent());
    }

    #[tokio::test]
    async fn update_can_move_period_unless_taken() {
        let (store, user) = store_with_employee(Some("1000")).await;
        let strict = Policy {
            unique_salary_period: true,
            ..Default::default()
        };
        let june = issue_salary(&store, &strict, issue_request(user.id, json!(0)))
            .await
            .unwrap();
        let mut july_request = issue_request(user.id, json!(0));
        july_request.month = Some(json!(7));
        issue_salary(&store, &strict, july_request).await.unwrap();

        let move_to_july = UpdateSalaryRequest {
            month: Some(json!(7)),
            ..Default::default()
        };
        let result = update_salary(&store, &strict, june.id, move_to_july.clone()).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let moved = update_salary(&store, &Policy::default(), june.id, move_to_july)
            .await
            .unwrap();
        assert_eq!(moved.month, 7);
    }

    #[tokio::test]
    async fn update_rejects_bad_month_without_writing() {
        let (store, user) = store_with_employee(Some("1000")).await;
        let salary = issue_salary(&store, &Policy::default(), issue_request(user.id, json!(10)))
            .await
            .unwrap();

        let result = update_salary(
            &store,
            &Policy::default(),
            salary.id,
            UpdateSalaryRequest {
                bonus: Some(json!(99)),
                month: Some(json!(13)),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        let stored = store.find_salary(salary.id).await.unwrap().unwrap();
        assert_eq!(stored, salary);
    }

    #[tokio::test]
    async fn oversized_bonus_is_a_validation_error() {
        let (store, user) = store_with_employee(Some("5000")).await;

        for bonus in [json!("79228162514264337593543950335"), json!(1e15)] {
            let result = issue_salary(&store, &Policy::default(), issue_request(user.id, bonus)).await;
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
        assert!(store.list_salaries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn total_past_the_limit_is_rejected() {
        let (store, user) = store_with_employee(Some("9999999999.00")).await;

        let result =
            issue_salary(&store, &Policy::default(), issue_request(user.id, json!("1.00"))).await;
        match result {
            Err(DomainError::Validation(message)) => {
                assert_eq!(message, "Total amount is out of range (maximum 9999999999.99)")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.list_salaries().await.unwrap().is_empty());

        let salary = issue_salary(&store, &Policy::default(), issue_request(user.id, json!("0.99")))
            .await
            .unwrap();
        let result = update_salary(
            &store,
            &Policy::default(),
            salary.id,
            UpdateSalaryRequest {
                bonus: Some(json!(2)),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
        let stored = store.find_salary(salary.id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount, dec("9999999999.99"));
    }

    #[tokio::test]
    async fn update_unknown_record_is_not_found() {
        let store = MemoryStore::new();

        let result = update_salary(
            &store,
            &Policy::default(),
            Uuid::new_v4(),
            UpdateSalaryRequest::default(),
        )
        .await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_unknown_record_leaves_others() {
        let (store, user) = store_with_employee(Some("1000")).await;
        issue_salary(&store, &Policy::default(), issue_request(user.id, json!(0)))
            .await
            .unwrap();

        let result = delete_salary(&store, Uuid::new_v4()).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
        assert_eq!(store.list_salaries().await.unwrap().len(), 1);
    }
}
