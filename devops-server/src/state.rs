//! Application state

use devops_core::{SecurityConfig, TokenValidator};
use std::sync::Arc;

/// Application state shared across handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Shared secret expected in the API key header
    pub api_key: Arc<str>,

    /// Verifier for the JWT header
    pub tokens: Arc<TokenValidator>,
}

impl AppState {
    /// Create application state from the security configuration
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            api_key: Arc::from(config.api_key.as_str()),
            tokens: Arc::new(TokenValidator::new(config)),
        }
    }
}
