//! System store context

pub mod context;

pub use context::{
    SystemContext, SystemContextData, SystemProvider, use_api_jwt_token,
    use_environment_queried, use_frontend_environment, use_login_callback,
    use_login_redirect_url, use_system,
};
