//! Frontend system store
//!
//! Holds the API JWT (persisted across reloads), the frontend environment
//! served by the backend and whether it has been fetched yet, and derives the
//! hosted-login URL that returns the user to the current page.

pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod login;
pub mod storage;
pub mod store;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::SystemConfig;
pub use environment::FrontendEnvironment;
pub use error::{CoreError, CoreResult, ErrorContext};
pub use login::{LoginCallback, build_login_redirect_url, decode_state, encode_uri_component};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{SystemAction, SystemState, SystemStore};
