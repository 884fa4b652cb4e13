//! Hosted-login redirect construction and callback handling
//!
//! The hosted login page (Cognito-style) is reached through
//! [`build_login_redirect_url`]. After authenticating, the identity provider
//! sends the browser back to `<page path>login_callback` with the original
//! query string carried in `state`, which [`LoginCallback`] recovers.

use crate::config::SystemConfig;
use crate::error::{CoreError, CoreResult};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::{Url, form_urlencoded};

/// Bytes left untouched by ECMAScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value the way `encodeURIComponent` does
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Split a URL at its first `?` into the part before it and the query after it
pub fn split_at_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Build the hosted-login URL that brings the user back to `current_url`.
///
/// The result is `<login_base_url>&redirect_uri=<encoded path>login_callback`,
/// followed by `&state=<query>` when `current_url` has a query string (an empty
/// query after a trailing `?` still counts).
///
/// `state` is percent-encoded **twice**. The identity provider decodes it
/// once before returning it, so the callback receives the query string still
/// encoded once and must decode it itself (see [`decode_state`]). Encoding it
/// only once loses the original query on the round trip.
///
/// Inputs are treated as opaque strings: nothing is validated and the
/// function never fails.
pub fn build_login_redirect_url(current_url: &str, login_base_url: &str) -> String {
    let (path, query) = split_at_query(current_url);

    let mut url = format!(
        "{login_base_url}&redirect_uri={}{}",
        encode_uri_component(path),
        SystemConfig::LOGIN_CALLBACK_SUFFIX
    );

    if let Some(query) = query {
        url.push_str("&state=");
        url.push_str(&encode_uri_component(&encode_uri_component(query)));
    }

    url
}

/// Undo one layer of percent-encoding on a `state` value
pub fn decode_state(state: &str) -> CoreResult<String> {
    percent_decode_str(state)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| CoreError::invalid_callback(format!("state is not valid UTF-8: {e}")))
}

/// Parameters the identity provider hands back on the callback page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginCallback {
    /// Page the login started from, without its query string
    pub page_url: String,
    /// Authorization code to exchange for a token
    pub code: Option<String>,
    /// Query string of the page the login started from
    pub original_query: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl LoginCallback {
    /// Parse a callback URL of the form `<page>login_callback?code=..&state=..`
    pub fn parse(callback_url: &str) -> CoreResult<Self> {
        let parsed = Url::parse(callback_url)?;

        let (path, _) = split_at_query(callback_url);
        let path = path.split_once('#').map_or(path, |(path, _)| path);
        let page_url = path
            .strip_suffix(SystemConfig::LOGIN_CALLBACK_SUFFIX)
            .ok_or_else(|| {
                CoreError::invalid_callback(format!(
                    "{path} does not end with {}",
                    SystemConfig::LOGIN_CALLBACK_SUFFIX
                ))
            })?
            .to_string();

        let query = parsed.query().unwrap_or_default();

        let mut callback = Self {
            page_url,
            code: None,
            original_query: None,
            error: None,
            error_description: None,
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "code" => callback.code = Some(value.into_owned()),
                "error" => callback.error = Some(value.into_owned()),
                "error_description" => callback.error_description = Some(value.into_owned()),
                _ => {}
            }
        }

        // `state` arrives encoded exactly once; take it raw and decode it here
        // so that `+` and `%2B` in the original query keep their meaning.
        if let Some(raw_state) = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("state="))
        {
            callback.original_query = Some(decode_state(raw_state)?);
        }

        tracing::debug!(
            page_url = %callback.page_url,
            has_code = callback.code.is_some(),
            has_state = callback.original_query.is_some(),
            "Parsed login callback"
        );

        Ok(callback)
    }

    /// The page URL the user should land on after the token exchange
    pub fn return_url(&self) -> String {
        match &self.original_query {
            Some(query) => format!("{}?{query}", self.page_url),
            None => self.page_url.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_BASE: &str = "https://idp.example/login?client_id=abc";

    #[test]
    fn test_redirect_url_with_query() {
        let url = build_login_redirect_url("https://app.example/page?foo=bar", LOGIN_BASE);
        assert_eq!(
            url,
            "https://idp.example/login?client_id=abc\
             &redirect_uri=https%3A%2F%2Fapp.example%2Fpagelogin_callback\
             &state=foo%253Dbar"
        );
    }

    #[test]
    fn test_redirect_url_without_query_has_no_state() {
        let url = build_login_redirect_url("https://app.example/dashboard/", LOGIN_BASE);
        assert_eq!(
            url,
            "https://idp.example/login?client_id=abc\
             &redirect_uri=https%3A%2F%2Fapp.example%2Fdashboard%2Flogin_callback"
        );
        assert!(!url.contains("state="));
    }

    #[test]
    fn test_trailing_question_mark_sends_empty_state() {
        let url = build_login_redirect_url("https://app.example/page?", LOGIN_BASE);
        assert!(url.ends_with("pagelogin_callback&state="));
    }

    #[test]
    fn test_state_decodes_back_to_query() {
        let url = build_login_redirect_url("https://app.example/page?foo=bar", LOGIN_BASE);
        let (_, state) = url.split_once("&state=").unwrap();

        let once = decode_state(state).unwrap();
        assert_eq!(once, "foo%3Dbar");

        let twice = decode_state(&once).unwrap();
        assert_eq!(twice, "foo=bar");
    }

    #[test]
    fn test_only_first_question_mark_splits() {
        let url = build_login_redirect_url("https://a.example/p?x=1?y=2", LOGIN_BASE);
        assert!(url.ends_with(
            "&redirect_uri=https%3A%2F%2Fa.example%2Fplogin_callback&state=x%253D1%253Fy%253D2"
        ));
    }

    #[test]
    fn test_encode_matches_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d/e?f"), "a%20b%26c%3Dd%2Fe%3Ff");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("café+"), "caf%C3%A9%2B");
        assert_eq!(encode_uri_component("#frag"), "%23frag");
    }

    #[test]
    fn test_missing_login_base_is_passed_through() {
        let url = build_login_redirect_url("https://app.example/", "");
        assert_eq!(url, "&redirect_uri=https%3A%2F%2Fapp.example%2Flogin_callback");
    }

    #[test]
    fn test_builder_is_deterministic() {
        let current = "https://app.example/items?page=2&sort=desc";
        assert_eq!(
            build_login_redirect_url(current, LOGIN_BASE),
            build_login_redirect_url(current, LOGIN_BASE)
        );
    }

    #[test]
    fn test_parse_callback_recovers_original_page() {
        // What the identity provider sends back after decoding `state` once
        let callback = LoginCallback::parse(
            "https://app.example/pagelogin_callback?code=abc123&state=foo%3Dbar%26q%3Da%2Bb",
        )
        .unwrap();

        assert_eq!(callback.page_url, "https://app.example/page");
        assert_eq!(callback.code.as_deref(), Some("abc123"));
        assert_eq!(callback.original_query.as_deref(), Some("foo=bar&q=a+b"));
        assert_eq!(callback.return_url(), "https://app.example/page?foo=bar&q=a+b");
        assert!(!callback.is_error());
    }

    #[test]
    fn test_query_survives_login_round_trip() {
        let queries = [
            "q=a%20b&x=%2B",
            "a=1&b=c+d",
            "x=caf%C3%A9",
            "",
            "k=v?w",
            "s=%25",
        ];

        for query in queries {
            let page = format!("https://app.example/p?{query}");
            let redirect = build_login_redirect_url(&page, LOGIN_BASE);
            let (_, state) = redirect.split_once("&state=").unwrap();

            // The identity provider decodes `state` once before sending it back
            let returned_state = decode_state(state).unwrap();
            assert_eq!(returned_state, encode_uri_component(query));

            let callback = LoginCallback::parse(&format!(
                "https://app.example/plogin_callback?code=c&state={returned_state}"
            ))
            .unwrap();

            assert_eq!(callback.original_query.as_deref(), Some(query));
            assert_eq!(callback.return_url(), page);
        }
    }

    #[test]
    fn test_parse_callback_without_state() {
        let callback =
            LoginCallback::parse("https://app.example/login_callback?code=xyz").unwrap();
        assert_eq!(callback.page_url, "https://app.example/");
        assert_eq!(callback.original_query, None);
        assert_eq!(callback.return_url(), "https://app.example/");
    }

    #[test]
    fn test_parse_callback_error() {
        let callback = LoginCallback::parse(
            "https://app.example/login_callback?error=access_denied&error_description=User%20cancelled",
        )
        .unwrap();
        assert!(callback.is_error());
        assert_eq!(callback.error.as_deref(), Some("access_denied"));
        assert_eq!(callback.error_description.as_deref(), Some("User cancelled"));
        assert_eq!(callback.code, None);
    }

    #[test]
    fn test_parse_rejects_non_callback_page() {
        let err = LoginCallback::parse("https://app.example/page?code=abc").unwrap_err();
        assert!(matches!(err, CoreError::InvalidCallback { .. }));

        let err = LoginCallback::parse("not a url").unwrap_err();
        assert!(matches!(err, CoreError::InvalidCallback { .. }));
    }

    #[test]
    fn test_decode_state_rejects_invalid_utf8() {
        assert!(decode_state("%FF%FE").is_err());
    }
}
