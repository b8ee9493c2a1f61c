//! Derived views: task progress and dashboard counts

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::task::Task;

pub const NO_TASKS_MESSAGE: &str = "No tasks assigned to this employee.";

/// Progress of one employee over their assigned tasks
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProgressReport {
    /// No tasks assigned; carries a message instead of a percentage
    #[serde(rename_all = "camelCase")]
    Empty { message: String, progress: u8 },
    #[serde(rename_all = "camelCase")]
    Measured {
        total_tasks: usize,
        completed_tasks: usize,
        /// Two decimals followed by `%`, e.g. `"66.67%"`
        progress: String,
        tasks: Vec<Task>,
    },
}

impl ProgressReport {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        if tasks.is_empty() {
            return ProgressReport::Empty {
                message: NO_TASKS_MESSAGE.to_string(),
                progress: 0,
            };
        }

        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|task| task.is_completed()).count();

        ProgressReport::Measured {
            total_tasks,
            completed_tasks,
            progress: completion_percentage(completed_tasks, total_tasks),
            tasks,
        }
    }
}

/// `completed / total * 100` rounded half away from zero to two places
pub fn completion_percentage(completed: usize, total: usize) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }

    let ratio = Decimal::from(completed as u64) * Decimal::ONE_HUNDRED / Decimal::from(total as u64);
    let rounded = ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

/// Admin dashboard counts, recomputed on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: i64,
    pub pending_leaves: i64,
    pub total_projects: i64,
    pub completed_tasks: i64,
}
