//! API client that attaches the stored JWT to backend calls

use crate::config::SystemConfig;
use crate::environment::FrontendEnvironment;
use crate::error::{CoreError, CoreResult};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, header};

const USER_AGENT: &str = concat!("sysstore/", env!("CARGO_PKG_VERSION"));

/// Backend client; requests carry `Authorization: Bearer` when a token is set
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Same connection settings with a different token; an empty token clears it
    #[must_use]
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: non_empty(token),
        }
    }

    /// Create a request builder, authenticated when a token is present
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// Execute a request and decode a JSON body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> CoreResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            Err(CoreError::http_error(Some(status.as_u16()), message))
        }
    }

    /// Fetch the frontend environment from the backend
    pub async fn fetch_environment(&self) -> CoreResult<FrontendEnvironment> {
        tracing::debug!(base_url = %self.base_url, "Fetching frontend environment");
        let request = self.request(Method::GET, SystemConfig::ENVIRONMENT_PATH);
        let environment: FrontendEnvironment = self.execute(request).await?;
        tracing::info!(
            has_login_url = environment.cognito_login_url.is_some(),
            "Frontend environment loaded"
        );
        Ok(environment)
    }
}

/// Builder for [`ApiClient`]
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Attach a JWT; an empty token leaves the client unauthenticated
    #[must_use]
    pub fn token(mut self, token: &str) -> Self {
        self.token = non_empty(token);
        self
    }

    pub fn build(self) -> CoreResult<ApiClient> {
        let base_url = self
            .base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| CoreError::invalid_config("API base URL is required"))?;

        let client = ClientBuilder::new().user_agent(USER_AGENT).build()?;

        Ok(ApiClient {
            client,
            base_url,
            token: self.token,
        })
    }
}

fn non_empty(token: &str) -> Option<String> {
    (!token.is_empty()).then(|| token.to_string())
}
