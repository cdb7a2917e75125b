//! End-to-end tests: router + `AdobeSignClient` against a mocked provider

mod common;

use axum::http::StatusCode;
use common::{create_request, send_json, status_request};
use esign_session_backend::api::router;
use esign_session_backend::config::ProviderConfig;
use esign_session_backend::orchestrator::SettlePolicy;
use esign_session_backend::provider::AdobeSignClient;
use esign_session_backend::state::AppState;
use mockito::{Mock, Server, ServerGuard};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn app_for(server: &ServerGuard, settle: SettlePolicy) -> axum::Router {
    let config = ProviderConfig {
        api_base: server.url(),
        access_token: "test-token".to_string(),
        template_id: "tmpl-1".to_string(),
        public_base_url: "http://localhost:3000".to_string(),
    };
    let client = AdobeSignClient::new(reqwest::Client::new(), &config);
    router(AppState::new(Arc::new(client), settle), Path::new("public"))
}

fn no_wait() -> SettlePolicy {
    SettlePolicy::fixed(Duration::ZERO)
}

async fn mock_create_and_send(server: &mut ServerGuard) -> (Mock, Mock) {
    let create = server
        .mock("POST", "/agreements")
        .match_header("authorization", "Bearer test-token")
        .with_status(201)
        .with_body(r#"{"id": "agr-42"}"#)
        .create_async()
        .await;
    // Empty success body, as the provider sends for state changes
    let send = server
        .mock("PUT", "/agreements/agr-42/state")
        .with_status(200)
        .create_async()
        .await;
    (create, send)
}

async fn mock_signing_urls(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("GET", "/agreements/agr-42/signingUrls")
        .with_status(status)
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_full_flow_returns_signing_url() {
    let mut server = Server::new_async().await;
    let (create, send) = mock_create_and_send(&mut server).await;
    let urls = mock_signing_urls(
        &mut server,
        200,
        r#"{"signingUrlSetInfos": [{"signingUrls": [
            {"email": "ada@example.com", "esignUrl": "https://secure.example/public/esign?tsid=abc"}
        ]}]}"#,
    )
    .await;

    let (status, body) = send_json(
        app_for(&server, no_wait()),
        create_request("Ada", "ada@example.com"),
    )
    .await;

    create.assert_async().await;
    send.assert_async().await;
    urls.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agreementId"], "agr-42");
    assert_eq!(
        body["signingUrl"],
        "https://secure.example/public/esign?tsid=abc"
    );
}

#[tokio::test]
async fn test_not_exposed_returns_retry_message() {
    let mut server = Server::new_async().await;
    let _mocks = mock_create_and_send(&mut server).await;
    let urls = mock_signing_urls(
        &mut server,
        404,
        r#"{"code": "AGREEMENT_NOT_EXPOSED", "message": "The agreement is not exposed"}"#,
    )
    .await;

    let (status, body) = send_json(
        app_for(&server, no_wait()),
        create_request("Ada", "ada@example.com"),
    )
    .await;

    urls.assert_async().await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("not ready for signing"));
}

#[tokio::test]
async fn test_not_exposed_is_retried_up_to_limit() {
    let mut server = Server::new_async().await;
    let _mocks = mock_create_and_send(&mut server).await;
    let urls = server
        .mock("GET", "/agreements/agr-42/signingUrls")
        .with_status(404)
        .with_body(r#"{"code": "AGREEMENT_NOT_EXPOSED"}"#)
        .expect(3)
        .create_async()
        .await;

    let settle = SettlePolicy {
        initial_delay: Duration::ZERO,
        max_attempts: 3,
        backoff: Duration::from_millis(1),
    };
    let (status, _) = send_json(
        app_for(&server, settle),
        create_request("Ada", "ada@example.com"),
    )
    .await;

    urls.assert_async().await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_empty_url_sets() {
    let mut server = Server::new_async().await;
    let _mocks = mock_create_and_send(&mut server).await;
    let _urls = mock_signing_urls(&mut server, 200, r#"{"signingUrlSetInfos": []}"#).await;

    let (status, body) = send_json(
        app_for(&server, no_wait()),
        create_request("Ada", "ada@example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("No signing URLs"));
}

#[tokio::test]
async fn test_null_url_lists_report_no_signing_urls() {
    for urls_body in [
        r#"{"signingUrlSetInfos": null}"#,
        r#"{"signingUrlSetInfos": [{"signingUrls": null}]}"#,
        r#"{"signingUrlSetInfos": [null]}"#,
    ] {
        let mut server = Server::new_async().await;
        let _mocks = mock_create_and_send(&mut server).await;
        let urls = mock_signing_urls(&mut server, 200, urls_body).await;

        let (status, body) = send_json(
            app_for(&server, no_wait()),
            create_request("Ada", "ada@example.com"),
        )
        .await;

        urls.assert_async().await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", urls_body);
        assert_eq!(
            body,
            serde_json::json!({"error": "No signing URLs were generated"}),
            "{}",
            urls_body
        );
    }
}

#[tokio::test]
async fn test_null_first_signing_url_entry() {
    let mut server = Server::new_async().await;
    let _mocks = mock_create_and_send(&mut server).await;
    let _urls = mock_signing_urls(
        &mut server,
        200,
        r#"{"signingUrlSetInfos": [{"signingUrls": [null]}]}"#,
    )
    .await;

    let (status, body) = send_json(
        app_for(&server, no_wait()),
        create_request("Ada", "ada@example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"error": "Failed to get signing URL"}));
}

#[tokio::test]
async fn test_empty_first_signing_url() {
    let mut server = Server::new_async().await;
    let _mocks = mock_create_and_send(&mut server).await;
    let _urls = mock_signing_urls(
        &mut server,
        200,
        r#"{"signingUrlSetInfos": [{"signingUrls": [{"email": "ada@example.com", "esignUrl": ""}]}]}"#,
    )
    .await;

    let (status, body) = send_json(
        app_for(&server, no_wait()),
        create_request("Ada", "ada@example.com"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"error": "Failed to get signing URL"}));
}

#[tokio::test]
async fn test_create_failure_is_generic() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/agreements")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;
    let send = server
        .mock("PUT", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (status, body) = send_json(
        app_for(&server, no_wait()),
        create_request("Ada", "ada@example.com"),
    )
    .await;

    create.assert_async().await;
    send.assert_async().await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"error": "Error creating agreement"}));
}

#[tokio::test]
async fn test_status_lookup() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/agreements/agr-42")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(r#"{"id": "agr-42", "status": "SIGNED"}"#)
        .create_async()
        .await;

    let (status, body) = send_json(app_for(&server, no_wait()), status_request("agr-42")).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "SIGNED", "isSigned": true}));
}

#[tokio::test]
async fn test_status_lookup_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/agreements/agr-42")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let (status, body) = send_json(app_for(&server, no_wait()), status_request("agr-42")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({"error": "Error checking agreement status"})
    );
}
