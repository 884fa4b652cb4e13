use web_sys::window;

/// Full URL of the current page, or empty outside a browser window
pub fn current_href() -> String {
    window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

/// Origin of the current page, used as the API base URL
pub fn current_origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}
