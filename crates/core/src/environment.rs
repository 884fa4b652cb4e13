//! Frontend environment served by the backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Environment-provided settings, replaced wholesale once fetched
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontendEnvironment {
    /// Hosted-login base URL, already carrying its own query string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognito_login_url: Option<String>,

    /// Settings this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FrontendEnvironment {
    pub fn with_login_url(login_url: impl Into<String>) -> Self {
        Self {
            cognito_login_url: Some(login_url.into()),
            extra: Map::new(),
        }
    }

    /// Hosted-login base URL, or an empty string before the environment is known
    pub fn login_url(&self) -> &str {
        self.cognito_login_url.as_deref().unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.cognito_login_url.is_none() && self.extra.is_empty()
    }
}
