//! Salary record model
//!
//! A salary record snapshots the employee's base salary when it is issued.
//! `total_amount` is always `base_amount + bonus`; only the constructors and
//! [`Salary::apply`] write the amount fields, and `base_amount` is never
//! written after issuance.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Salary entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: Uuid,
    pub employee: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bonus: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub month: i32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

/// Validated changes to an existing salary record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryChanges {
    pub bonus: Option<Decimal>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

impl Salary {
    /// Issue a record for one pay period from a base salary snapshot.
    /// Amounts must already be bounded so that the sum fits.
    pub fn issue(employee: Uuid, base_amount: Decimal, bonus: Decimal, month: i32, year: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee,
            base_amount,
            bonus,
            total_amount: base_amount + bonus,
            month,
            year,
            created_at: Utc::now(),
        }
    }

    /// Apply changes and recompute the total from the stored base amount
    pub fn apply(&mut self, changes: &SalaryChanges) {
        if let Some(bonus) = changes.bonus {
            self.bonus = bonus;
        }
        if let Some(month) = changes.month {
            self.month = month;
        }
        if let Some(year) = changes.year {
            self.year = year;
        }
        self.total_amount = self.base_amount + self.bonus;
    }

    /// Pay period after applying `changes`
    pub fn period_after(&self, changes: &SalaryChanges) -> (i32, i32) {
        (
            changes.month.unwrap_or(self.month),
            changes.year.unwrap_or(self.year),
        )
    }

    pub fn is_consistent(&self) -> bool {
        self.total_amount == self.base_amount + self.bonus
    }
}

impl SalaryChanges {
    pub fn moves_period(&self) -> bool {
        self.month.is_some() || self.year.is_some()
    }
}

/// Admin payload for `POST /api/admin/salary`.
/// Amounts and period fields accept JSON numbers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueSalaryRequest {
    pub employee: Uuid,
    #[serde(default)]
    pub bonus: Option<serde_json::Value>,
    #[serde(default)]
    pub month: Option<serde_json::Value>,
    #[serde(default)]
    pub year: Option<serde_json::Value>,
}

/// Admin payload for `PUT /api/admin/salary/:id`; absent fields are kept.
/// Any other field in the body, `baseAmount` included, is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSalaryRequest {
    #[serde(default)]
    pub bonus: Option<serde_json::Value>,
    #[serde(default)]
    pub month: Option<serde_json::Value>,
    #[serde(default)]
    pub year: Option<serde_json::Value>,
}
