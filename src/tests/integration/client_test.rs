//! End-to-end calls through the async client against the mock server.

use std::time::Duration;

use axum::http::Method;

use crate::tests::common::mock_server::{MockBbbServer, SECRET};
use crate::{ApiCall, ApiResponse, BbbConfig, BbbError, BigBlueButtonClient};

fn client_for(server: &MockBbbServer) -> BigBlueButtonClient {
    BigBlueButtonClient::new(BbbConfig::new(&server.api_url, SECRET))
}

#[tokio::test]
async fn test_signed_get_succeeds() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let response = client
        .get_xml(&ApiCall::new("isMeetingRunning", "meetingID=abc"))
        .await
        .unwrap();

    assert!(response.is_success());
    assert!(response.matches("running"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].call, "isMeetingRunning");
    assert!(requests[0].body.is_empty());
    assert!(requests[0].query.starts_with("meetingID=abc&checksum="));
}

#[tokio::test]
async fn test_create_with_pre_upload_posts_xml() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let call = ApiCall::new("create", "name=Demo&meetingID=abc")
        .with_pre_upload_slide("https://files.example.com/deck.pdf")
        .with_timeout(Duration::from_secs(5));
    let response = client.get_xml(&call).await.unwrap();

    assert!(response.is_success());
    assert!(!response.matches("hasBeenForciblyEnded"));
    assert_eq!(response.field_text("meetingID"), Some("abc"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/xml"));
    assert_eq!(
        requests[0].body,
        "<?xml version='1.0' encoding='UTF-8'?>\n<modules><module name='presentation'><document url='https://files.example.com/deck.pdf'/></module></modules>"
    );
}

#[tokio::test]
async fn test_create_without_pre_upload_gets() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let response = client
        .get_xml(&ApiCall::new("create", "name=Demo&meetingID=abc"))
        .await
        .unwrap();

    assert!(response.is_success());
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_wrong_secret_is_absent() {
    let server = MockBbbServer::start();
    let client = BigBlueButtonClient::new(BbbConfig::new(&server.api_url, "not-the-salt"));

    let response = client
        .get_xml(&ApiCall::new("isMeetingRunning", "meetingID=abc"))
        .await
        .unwrap();

    assert_eq!(response, ApiResponse::Absent);
    assert!(!response.matches("running"));
}

#[tokio::test]
async fn test_unknown_call_is_absent() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let response = client
        .get_xml(&ApiCall::new("getRecordings", ""))
        .await
        .unwrap();

    assert_eq!(response, ApiResponse::Absent);
}

#[tokio::test]
async fn test_non_xml_body_is_absent() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let response = client.get_xml(&ApiCall::new("garbage", "")).await.unwrap();
    assert_eq!(response, ApiResponse::Absent);
}

#[tokio::test]
async fn test_server_error_propagates() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let err = client.get_xml(&ApiCall::new("broken", "")).await.unwrap_err();

    match err {
        BbbError::Transport(inner) => {
            assert_eq!(inner.status().map(|status| status.as_u16()), Some(500))
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_propagates() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let call = ApiCall::new("slow", "").with_timeout(Duration::from_millis(200));
    let err = client.get_xml(&call).await.unwrap_err();

    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_refused_propagates() {
    // Bind and drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = BigBlueButtonClient::new(BbbConfig::new(
        format!("http://127.0.0.1:{}/bigbluebutton/api/", port),
        SECRET,
    ));

    let result = client.get_xml(&ApiCall::new("isMeetingRunning", "meetingID=abc")).await;
    assert!(matches!(result, Err(BbbError::Transport(_))));
}
