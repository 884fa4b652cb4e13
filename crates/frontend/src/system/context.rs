//! Global system store context and provider

use crate::client::set_api_token;
use crate::services::EnvironmentService;
use crate::storage::BrowserStorage;
use crate::utils::current_href;
use std::rc::Rc;
use sysstore_core::{
    FrontendEnvironment, KeyValueStorage, LoginCallback, SystemAction, SystemConfig, SystemState,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// System store data held by the context
#[derive(Clone)]
pub struct SystemContextData {
    pub state: SystemState,
    storage: Rc<dyn KeyValueStorage>,
}

/// System store context
pub type SystemContext = UseReducerHandle<SystemContextData>;

impl SystemContextData {
    /// Restore the persisted token from `storage`
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self {
            state: SystemState::hydrate(&*storage),
            storage,
        }
    }

    /// Hosted-login URL returning to `current_url`
    pub fn login_redirect_url(&self, current_url: &str) -> String {
        self.state.login_redirect_url(current_url)
    }
}

impl PartialEq for SystemContextData {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl Reducible for SystemContextData {
    type Action = SystemAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if let Err(e) = action.persist(&*self.storage) {
            tracing::warn!(
                key = SystemConfig::TOKEN_STORAGE_KEY,
                error = %e,
                "Failed to persist API token"
            );
        }

        Rc::new(Self {
            state: self.state.apply(action),
            storage: Rc::clone(&self.storage),
        })
    }
}

/// System provider props
#[derive(Properties, PartialEq)]
pub struct SystemProviderProps {
    pub children: Children,
}

/// System provider component
#[function_component(SystemProvider)]
pub fn system_provider(props: &SystemProviderProps) -> Html {
    let system = use_reducer(|| SystemContextData::new(Rc::new(BrowserStorage)));

    // Keep the shared API client on the current token
    use_effect_with(system.state.api_jwt_token.clone(), |token| {
        if let Err(e) = set_api_token(token) {
            tracing::warn!(error = %e, "Failed to update API client token");
        }
    });

    // Fetch the environment once on mount
    {
        let system = system.clone();
        use_effect_with((), move |()| {
            if !system.state.frontend_environment_queried {
                spawn_local(async move {
                    match EnvironmentService::new().fetch().await {
                        Ok(environment) => {
                            system.dispatch(SystemAction::SetEnvironment(environment));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Environment fetch failed");
                            system.dispatch(SystemAction::EnvironmentFailed(e));
                        }
                    }
                });
            }
        });
    }

    html! {
        <ContextProvider<SystemContext> context={system}>
            {props.children.clone()}
        </ContextProvider<SystemContext>>
    }
}

/// Hook to use the system context
#[hook]
pub fn use_system() -> SystemContext {
    use_context::<SystemContext>()
        .expect("SystemContext not found. Make sure to wrap your component with SystemProvider")
}

/// Hook to get the API JWT, empty when signed out
#[hook]
pub fn use_api_jwt_token() -> String {
    let system = use_system();
    system.state.api_jwt_token.clone()
}

#[hook]
pub fn use_environment_queried() -> bool {
    let system = use_system();
    system.state.frontend_environment_queried
}

#[hook]
pub fn use_frontend_environment() -> FrontendEnvironment {
    let system = use_system();
    system.state.frontend_environment.clone()
}

/// Hook to get the hosted-login URL for the current page
///
/// Recomputed on every render from the environment and `window.location`.
#[hook]
pub fn use_login_redirect_url() -> String {
    let system = use_system();
    system.login_redirect_url(&current_href())
}

/// Hook to parse the current page as a hosted-login callback
#[hook]
pub fn use_login_callback() -> Option<LoginCallback> {
    use_memo((), |()| LoginCallback::parse(&current_href()).ok())
        .as_ref()
        .clone()
}
