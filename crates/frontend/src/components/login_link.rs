use crate::system::{use_login_redirect_url, use_system};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginLinkProps {
    #[prop_or(AttrValue::Static("Sign in"))]
    pub label: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Link to the hosted login page that returns to the current page
#[function_component(LoginLink)]
pub fn login_link(props: &LoginLinkProps) -> Html {
    let system = use_system();
    let login_url = use_login_redirect_url();

    if !system.state.frontend_environment_queried {
        return match &system.state.environment_error {
            Some(error) => html! {
                <span class={props.class.clone()} title={error.clone()}>{"Sign-in unavailable"}</span>
            },
            None => html! {
                <span class={props.class.clone()}>{"Loading..."}</span>
            },
        };
    }

    html! {
        <a href={login_url} class={props.class.clone()}>{props.label.clone()}</a>
    }
}
