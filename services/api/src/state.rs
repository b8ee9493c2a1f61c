//! Application state shared across handlers

use std::sync::Arc;

use crate::{domain::Policy, middleware::TokenVerifier, repositories::RecordStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub verifier: TokenVerifier,
    pub policy: Policy,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, verifier: TokenVerifier, policy: Policy) -> Self {
        Self {
            store,
            verifier,
            policy,
        }
    }
}
