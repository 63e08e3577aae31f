//! The blocking client must behave exactly like the async one.

use std::time::Duration;

use axum::http::Method;

use crate::blocking::BigBlueButtonClient;
use crate::tests::common::mock_server::{MockBbbServer, SECRET};
use crate::{ApiCall, ApiResponse, BbbConfig, BbbError};

fn client_for(server: &MockBbbServer) -> BigBlueButtonClient {
    BigBlueButtonClient::new(BbbConfig::new(&server.api_url, SECRET))
}

#[test]
fn test_blocking_get() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let response = client
        .get_xml(&ApiCall::new("isMeetingRunning", "meetingID=abc"))
        .unwrap();

    assert!(response.matches("running"));
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
}

#[test]
fn test_blocking_create_with_pre_upload() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    let call = ApiCall::new("create", "name=Demo&meetingID=abc")
        .with_pre_upload_slide("https://files.example.com/deck.pdf");
    let response = client.get_xml(&call).unwrap();

    assert!(response.is_success());
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].content_type.as_deref(), Some("application/xml"));
    assert!(requests[0]
        .body
        .contains("<document url='https://files.example.com/deck.pdf'/>"));
}

#[test]
fn test_blocking_failures() {
    let server = MockBbbServer::start();
    let client = client_for(&server);

    assert_eq!(
        client.get_xml(&ApiCall::new("garbage", "")).unwrap(),
        ApiResponse::Absent
    );
    assert!(matches!(
        client.get_xml(&ApiCall::new("broken", "")),
        Err(BbbError::Transport(_))
    ));
}

#[test]
fn test_blocking_default_timeout() {
    let server = MockBbbServer::start();
    let config =
        BbbConfig::new(&server.api_url, SECRET).with_default_timeout(Duration::from_millis(200));
    let client = BigBlueButtonClient::new(config);

    let err = client.get_xml(&ApiCall::new("slow", "")).unwrap_err();
    assert!(err.is_timeout());
}
