//! Shared API client carrying the current token

use crate::utils::current_origin;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};
use sysstore_core::{ApiClient, CoreError, CoreResult};

/// Global client instance
static API_CLIENT: Lazy<Mutex<Option<ApiClient>>> = Lazy::new(|| Mutex::new(None));

fn lock_client() -> CoreResult<MutexGuard<'static, Option<ApiClient>>> {
    API_CLIENT
        .lock()
        .map_err(|_| CoreError::internal_error("API client lock poisoned"))
}

fn build_client(token: &str) -> CoreResult<ApiClient> {
    ApiClient::builder()
        .base_url(current_origin())
        .token(token)
        .build()
}

/// Get the API client, creating an unauthenticated one on first use
pub fn api_client() -> CoreResult<ApiClient> {
    let mut client_lock = lock_client()?;

    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }

    let client = build_client("")?;
    *client_lock = Some(client.clone());
    Ok(client)
}

/// Swap the token on the shared client; an empty token signs it out
pub fn set_api_token(token: &str) -> CoreResult<()> {
    let mut client_lock = lock_client()?;

    let client = match client_lock.as_ref() {
        Some(client) => client.with_token(token),
        None => build_client(token)?,
    };
    tracing::debug!(authenticated = client.is_authenticated(), "API client updated");
    *client_lock = Some(client);

    Ok(())
}
