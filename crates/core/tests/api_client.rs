//! Integration tests for the environment fetch and token-carrying client

use serde_json::json;
use sysstore_core::{
    ApiClient, CoreError, MemoryStorage, SystemAction, SystemConfig, SystemStore,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_environment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SystemConfig::ENVIRONMENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cognitoLoginUrl": "https://idp.example/login?client_id=abc",
            "stage": "dev"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .build()
        .unwrap();
    let environment = client.fetch_environment().await.unwrap();

    assert_eq!(
        environment.login_url(),
        "https://idp.example/login?client_id=abc"
    );
    assert_eq!(environment.get("stage"), Some(&json!("dev")));
}

#[tokio::test]
async fn test_fetch_environment_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SystemConfig::ENVIRONMENT_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .build()
        .unwrap();
    let err = client.fetch_environment().await.unwrap_err();

    assert_eq!(
        err,
        CoreError::Http {
            status: Some(503),
            message: "maintenance".to_string(),
        }
    );
}

#[tokio::test]
async fn test_fetch_environment_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SystemConfig::ENVIRONMENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .build()
        .unwrap();
    assert!(client.fetch_environment().await.is_err());
}

#[tokio::test]
async fn test_stored_token_is_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer header.payload.sig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Ada" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut store = SystemStore::new(MemoryStorage::new());
    store.dispatch(SystemAction::SetApiJwtToken("header.payload.sig".to_string()));

    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .token(&store.api_jwt_token())
        .build()
        .unwrap();
    let profile: serde_json::Value = client
        .execute(client.request(reqwest::Method::GET, "/api/profile"))
        .await
        .unwrap();

    assert_eq!(profile["name"], "Ada");
}

#[tokio::test]
async fn test_environment_fetch_feeds_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SystemConfig::ENVIRONMENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cognitoLoginUrl": "https://idp.example/login?client_id=abc"
        })))
        .mount(&mock_server)
        .await;

    let mut store = SystemStore::new(MemoryStorage::new());
    let client = ApiClient::builder()
        .base_url(mock_server.uri())
        .build()
        .unwrap();

    match client.fetch_environment().await {
        Ok(environment) => store.dispatch(SystemAction::SetEnvironment(environment)),
        Err(e) => store.dispatch(SystemAction::EnvironmentFailed(e.to_string())),
    }

    assert!(store.frontend_environment_queried());
    assert_eq!(
        store.cognito_login_url_with_redirect("https://app.example/?tab=2"),
        "https://idp.example/login?client_id=abc\
         &redirect_uri=https%3A%2F%2Fapp.example%2Flogin_callback\
         &state=tab%253D2"
    );
}
