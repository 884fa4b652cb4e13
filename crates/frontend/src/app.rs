use crate::components::LoginLink;
use crate::system::{SystemProvider, use_login_callback, use_system};
use sysstore_core::SystemAction;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SystemProvider>
            <AppContent />
        </SystemProvider>
    }
}

#[function_component(AppContent)]
fn app_content() -> Html {
    let system = use_system();
    let callback = use_login_callback();

    let on_sign_out = {
        let system = system.clone();
        Callback::from(move |_: MouseEvent| {
            system.dispatch(SystemAction::ClearApiJwtToken);
        })
    };

    let callback_notice = callback.map(|callback| {
        if callback.is_error() {
            html! {
                <p class="text-red-600">
                    {format!(
                        "Sign-in failed: {}",
                        callback.error_description.as_deref().unwrap_or("unknown error")
                    )}
                </p>
            }
        } else {
            html! {
                <p class="text-gray-600">
                    {format!("Completing sign-in, returning to {}", callback.return_url())}
                </p>
            }
        }
    });

    html! {
        <div class="h-screen w-screen flex flex-col bg-gray-50">
            <header class="flex items-center justify-between p-4 bg-white shadow-sm">
                <h1 class="text-2xl font-bold text-gray-900">{"System"}</h1>
                if system.state.is_authenticated() {
                    <button class="px-3 py-1 rounded bg-gray-200" onclick={on_sign_out}>
                        {"Sign out"}
                    </button>
                } else {
                    <LoginLink class="px-3 py-1 rounded bg-blue-600 text-white" />
                }
            </header>
            <main class="flex-1 p-6">
                {callback_notice}
            </main>
        </div>
    }
}
