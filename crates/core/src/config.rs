//! Store configuration

/// Settings shared by the store, the API client and the login flow
pub struct SystemConfig;

impl SystemConfig {
    /// Local storage key for the API JWT
    pub const TOKEN_STORAGE_KEY: &'static str = "apiJwtToken";

    /// Backend route serving the frontend environment
    pub const ENVIRONMENT_PATH: &'static str = "/api-front/env";

    /// Appended to the page path to form the hosted-login `redirect_uri`
    pub const LOGIN_CALLBACK_SUFFIX: &'static str = "login_callback";
}
