pub mod app;
pub mod client;
pub mod components;
pub mod logging;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;

pub use app::App;
pub use client::{api_client, set_api_token};
pub use components::LoginLink;
pub use storage::BrowserStorage;
pub use system::{
    SystemContext, SystemContextData, SystemProvider, use_api_jwt_token,
    use_environment_queried, use_frontend_environment, use_login_callback,
    use_login_redirect_url, use_system,
};
