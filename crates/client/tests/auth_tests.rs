//! Authentication tests.
//!
//! This module tests how each auth strategy reaches the wire:
//! - Session login and reuse of the session key
//! - Basic and bearer token headers, which never log in
//! - Login failures surfacing as auth errors
//!
//! # Invariants
//! - Concurrent searches on one client share a single login
//! - Any login failure is reported as `AuthFailed`

mod common;

use common::*;
use futures::future::join_all;
use secrecy::SecretString;
use splunk_rest::{AuthStrategy, ClientError, SearchOptions, SearchStage, SplunkClient};
use wiremock::matchers::{body_string_contains, header, method, path};

const SESSION_KEY: &str = "192fd3e46a31246da7ea7f109e7f95fd";

async fn mount_search_endpoints(mock_server: &MockServer, expected_auth: &str) {
    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .and(header("Authorization", expected_auth))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(load_fixture("search/create_job_success.json")),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/1700000000.42"))
        .and(header("Authorization", expected_auth))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/job_done.json")))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/1700000000.42/results"))
        .and(header("Authorization", expected_auth))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/results.json")))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_login_returns_session_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .and(body_string_contains("username=admin"))
        .and(body_string_contains("password=changeme"))
        .and(body_string_contains("output_mode=json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let key = endpoints::login(&client, &mock_server.uri(), "admin", "changeme", 0, None)
        .await
        .unwrap();

    assert_eq!(key, SESSION_KEY);
}

#[tokio::test]
async fn test_login_rejected_is_auth_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(load_fixture("auth/login_failed.json")))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let err = endpoints::login(&client, &mock_server.uri(), "admin", "wrong", 0, None)
        .await
        .unwrap_err();

    match err {
        ClientError::AuthFailed(message) => {
            assert!(message.contains("401"));
            assert!(message.contains("Login failed"));
        }
        other => panic!("expected AuthFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_login_unreachable_server_is_auth_failed() {
    let client = Client::new();
    let err = endpoints::login(&client, "http://127.0.0.1:1", "admin", "changeme", 0, None)
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(err.stage(), SearchStage::Auth);
}

#[tokio::test]
async fn test_session_search_sends_splunk_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_search_endpoints(&mock_server, &format!("Splunk {SESSION_KEY}")).await;

    let client = session_client(&mock_server.uri());
    let rows = client
        .search("search index=main", &SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_concurrent_searches_share_one_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_search_endpoints(&mock_server, &format!("Splunk {SESSION_KEY}")).await;

    let client = session_client(&mock_server.uri());
    let options = SearchOptions::default();
    let searches = (0..5).map(|_| client.search("search index=main", &options));
    let outcomes = join_all(searches).await;

    for outcome in outcomes {
        assert_eq!(outcome.unwrap().len(), 3);
    }
}

#[tokio::test]
async fn test_basic_auth_never_logs_in() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("auth/login_success.json")))
        .expect(0)
        .mount(&mock_server)
        .await;
    mount_search_endpoints(&mock_server, "Basic YWRtaW46Y2hhbmdlbWU=").await;

    let client = SplunkClient::builder()
        .base_url(mock_server.uri())
        .auth_strategy(AuthStrategy::Basic {
            username: "admin".to_string(),
            password: SecretString::new("changeme".to_string().into()),
        })
        .build()
        .unwrap();

    let rows = client
        .search("search index=main", &SearchOptions::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_api_token_sends_bearer_header() {
    let mock_server = MockServer::start().await;

    mount_search_endpoints(&mock_server, "Bearer test-token").await;

    let client = api_token_client(&mock_server.uri());
    let rows = client
        .search("search index=main", &SearchOptions::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_failed_login_fails_search_at_auth_stage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(load_fixture("auth/login_failed.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = session_client(&mock_server.uri());
    let err = client
        .search("search index=main", &SearchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AuthFailed(_)));
    assert_eq!(err.stage(), SearchStage::Auth);
}

#[tokio::test]
async fn test_explicit_login_with_api_token_is_rejected() {
    let client = api_token_client("http://127.0.0.1:1");
    let err = client.login().await.unwrap_err();
    assert!(err.is_auth_error());
}
