//! System store: API token, frontend environment and the hosted-login redirect

use crate::config::SystemConfig;
use crate::environment::FrontendEnvironment;
use crate::error::CoreResult;
use crate::login::build_login_redirect_url;
use crate::storage::KeyValueStorage;
use tokio::sync::watch;

/// Snapshot of the store
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemState {
    /// JWT attached to API calls; empty until a login exchange completes
    pub api_jwt_token: String,
    /// Set once the environment has been fetched from the backend
    pub frontend_environment_queried: bool,
    pub frontend_environment: FrontendEnvironment,
    /// Last environment fetch failure, cleared by a successful fetch
    pub environment_error: Option<String>,
}

/// Store mutations
#[derive(Clone, Debug, PartialEq)]
pub enum SystemAction {
    SetApiJwtToken(String),
    ClearApiJwtToken,
    /// Replace the environment wholesale and mark it queried
    SetEnvironment(FrontendEnvironment),
    SetEnvironmentQueried(bool),
    EnvironmentFailed(String),
}

impl SystemState {
    /// Fresh state with the token restored from storage
    pub fn hydrate<S: KeyValueStorage + ?Sized>(storage: &S) -> Self {
        let api_jwt_token = match storage.get_item(SystemConfig::TOKEN_STORAGE_KEY) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to restore API token");
                String::new()
            }
        };

        Self {
            api_jwt_token,
            ..Self::default()
        }
    }

    /// Apply an action, returning the next state
    #[must_use]
    pub fn apply(&self, action: SystemAction) -> Self {
        match action {
            SystemAction::SetApiJwtToken(api_jwt_token) => Self {
                api_jwt_token,
                ..self.clone()
            },
            SystemAction::ClearApiJwtToken => Self {
                api_jwt_token: String::new(),
                ..self.clone()
            },
            SystemAction::SetEnvironment(frontend_environment) => Self {
                frontend_environment,
                frontend_environment_queried: true,
                environment_error: None,
                ..self.clone()
            },
            SystemAction::SetEnvironmentQueried(frontend_environment_queried) => Self {
                frontend_environment_queried,
                ..self.clone()
            },
            SystemAction::EnvironmentFailed(error) => Self {
                environment_error: Some(error),
                ..self.clone()
            },
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.api_jwt_token.is_empty()
    }

    /// Hosted-login URL returning to `current_url`, derived on every call
    pub fn login_redirect_url(&self, current_url: &str) -> String {
        build_login_redirect_url(current_url, self.frontend_environment.login_url())
    }
}

impl SystemAction {
    /// Write the storage side effects of this action
    pub fn persist<S: KeyValueStorage + ?Sized>(&self, storage: &S) -> CoreResult<()> {
        match self {
            Self::SetApiJwtToken(token) => storage.set_item(SystemConfig::TOKEN_STORAGE_KEY, token),
            Self::ClearApiJwtToken => storage.remove_item(SystemConfig::TOKEN_STORAGE_KEY),
            _ => Ok(()),
        }
    }
}

/// Process-wide store with the token mirrored into storage
///
/// Observers obtained through [`SystemStore::subscribe`] are woken whenever a
/// dispatched action changes the state.
pub struct SystemStore<S: KeyValueStorage> {
    storage: S,
    state: watch::Sender<SystemState>,
}

impl<S: KeyValueStorage> SystemStore<S> {
    pub fn new(storage: S) -> Self {
        let (state, _) = watch::channel(SystemState::hydrate(&storage));

        Self { storage, state }
    }

    pub fn state(&self) -> SystemState {
        self.state.borrow().clone()
    }

    pub fn api_jwt_token(&self) -> String {
        self.state.borrow().api_jwt_token.clone()
    }

    pub fn frontend_environment_queried(&self) -> bool {
        self.state.borrow().frontend_environment_queried
    }

    pub fn frontend_environment(&self) -> FrontendEnvironment {
        self.state.borrow().frontend_environment.clone()
    }

    /// Hosted-login URL for the page at `current_url`
    pub fn cognito_login_url_with_redirect(&self, current_url: &str) -> String {
        self.state.borrow().login_redirect_url(current_url)
    }

    pub fn subscribe(&self) -> watch::Receiver<SystemState> {
        self.state.subscribe()
    }

    pub fn dispatch(&mut self, action: SystemAction) {
        if let Err(e) = action.persist(&self.storage) {
            tracing::warn!(
                key = SystemConfig::TOKEN_STORAGE_KEY,
                error = %e,
                "Failed to persist API token"
            );
        }

        let changed = self.state.send_if_modified(|state| {
            let next = state.apply(action);
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });

        if changed {
            tracing::debug!("System store updated");
        }
    }
}
