//! staffdesk API service
//!
//! Employee records, leave requests, project and task assignment, and salary
//! bookkeeping behind a bearer-token protected REST API.

pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;
