//! Environment service for the hosted-login settings

use crate::client::api_client;
use sysstore_core::{ErrorContext, FrontendEnvironment};

/// Environment API service
#[derive(Clone)]
pub struct EnvironmentService;

impl EnvironmentService {
    /// Create a new environment service
    pub const fn new() -> Self {
        Self
    }

    /// Fetch the frontend environment from the backend
    pub async fn fetch(&self) -> Result<FrontendEnvironment, String> {
        let client = api_client().with_context_str("Failed to get client")?;

        client
            .fetch_environment()
            .await
            .with_context_str("Failed to load environment")
    }
}

impl Default for EnvironmentService {
    fn default() -> Self {
        Self::new()
    }
}
