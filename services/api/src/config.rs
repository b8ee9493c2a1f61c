//! Service configuration read from `STAFFDESK_*` environment variables

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::domain::Policy;

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    pub bind_address: String,
    /// Apply pending schema migrations on start-up
    pub run_migrations: bool,
    pub unique_salary_period: bool,
    pub lock_decided_leaves: bool,
}

impl ServiceConfig {
    /// Load the configuration
    ///
    /// # Environment Variables
    /// - `STAFFDESK_BIND_ADDRESS` (default: `0.0.0.0:5000`)
    /// - `STAFFDESK_RUN_MIGRATIONS` (default: `true`)
    /// - `STAFFDESK_UNIQUE_SALARY_PERIOD` (default: `false`)
    /// - `STAFFDESK_LOCK_DECIDED_LEAVES` (default: `false`)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("run_migrations", true)?
            .set_default("unique_salary_period", false)?
            .set_default("lock_decided_leaves", false)?
            .add_source(Environment::with_prefix("STAFFDESK").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn policy(&self) -> Policy {
        Policy {
            unique_salary_period: self.unique_salary_period,
            lock_decided_leaves: self.lock_decided_leaves,
        }
    }
}
