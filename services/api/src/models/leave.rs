//! Leave request model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::UnknownVariant;

/// Leave status; `pending` until an admin decides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected are the only targets of a decision
    pub fn is_decided(&self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Rejected)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LeaveStatus::Pending),
            "approved" => Ok(LeaveStatus::Approved),
            "rejected" => Ok(LeaveStatus::Rejected),
            other => Err(UnknownVariant {
                kind: "leave status",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LeaveStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Leave entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub id: Uuid,
    pub employee: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    #[sqlx(try_from = "String")]
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
}

impl Leave {
    /// A new pending leave for `employee`
    pub fn pending(employee: Uuid, start_date: NaiveDate, end_date: NaiveDate, reason: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee,
            start_date,
            end_date,
            reason,
            status: LeaveStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Inclusive length of the leave in days
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Employee payload for `POST /api/employees/leaves`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

/// Admin payload for `PUT /api/admin/leaves/:id`.
/// Kept as text so an unknown status is reported as a validation failure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveDecisionRequest {
    #[serde(default)]
    pub status: String,
}
