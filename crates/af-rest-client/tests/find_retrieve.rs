// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! HTTP-level tests for the Find and Retrieve calls against a local mock server

use af_client_api::{AddressService, ClientApiError, LookupParams};
use af_domain_types::CandidateKind;
use af_rest_client::{ApiKey, RestClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params(text: &str) -> LookupParams {
    LookupParams {
        text: text.to_string(),
        locale: "en-GB".to_string(),
        limit: 10,
        container: None,
        countries: Vec::new(),
    }
}

#[tokio::test]
async fn find_sends_key_text_and_locale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Find/v1.1/json3.ws"))
        .and(query_param("Key", "1234"))
        .and(query_param("Text", "a"))
        .and(query_param("Language", "en-GB"))
        .and(query_param("Limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Items": [
                {"Id": "baz", "Type": "Address", "Text": "Baz", "Highlight": "0-1", "Description": "Foo Town"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::from_url(&server.uri(), ApiKey::new("1234")).expect("client");
    let items = client.lookup(&params("a")).await.expect("lookup");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "baz");
    assert_eq!(items[0].kind, CandidateKind::Address);
}

#[tokio::test]
async fn find_passes_container_and_countries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Find/v1.1/json3.ws"))
        .and(query_param("Container", "GB|RM|ENG|6AZ-STREET"))
        .and(query_param("Countries", "GB,IE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "Items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::from_url(&server.uri(), ApiKey::new("1234")).expect("client");
    let mut request = params("high");
    request.container = Some("GB|RM|ENG|6AZ-STREET".to_string());
    request.countries = vec!["GB".to_string(), "IE".to_string()];

    let items = client.lookup(&request).await.expect("lookup");
    assert!(items.is_empty());
}

#[tokio::test]
async fn retrieve_returns_first_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Retrieve/v1.2/json3.ws"))
        .and(query_param("Id", "GB|RM|A|21415581"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Items": [
                {"Id": "GB|RM|A|21415581", "Language": "ENG", "Line1": "1 High Street", "City": "London", "PostalCode": "E1 6AZ"},
                {"Id": "GB|RM|A|21415581", "Language": "WEL", "Line1": "1 Stryd Fawr", "City": "Llundain", "PostalCode": "E1 6AZ"}
            ]
        })))
        .mount(&server)
        .await;

    let client = RestClient::from_url(&server.uri(), ApiKey::new("1234")).expect("client");
    let record = client.resolve("GB|RM|A|21415581").await.expect("resolve");

    assert_eq!(record.language.as_deref(), Some("ENG"));
    assert_eq!(record.line1.as_deref(), Some("1 High Street"));
}

#[tokio::test]
async fn service_fault_maps_to_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Find/v1.1/json3.ws"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Items": [{"Error": "2", "Description": "Unknown key", "Cause": "Key not found", "Resolution": "Check the key"}]
        })))
        .mount(&server)
        .await;

    let client = RestClient::from_url(&server.uri(), ApiKey::new("bad")).expect("client");
    let err = client.lookup(&params("a")).await.expect_err("fault");

    assert_eq!(
        err,
        ClientApiError::Service {
            code: "2".to_string(),
            description: "Unknown key".to_string(),
            cause: Some("Key not found".to_string()),
            resolution: Some("Check the key".to_string()),
        }
    );
}

#[tokio::test]
async fn http_failure_maps_to_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = RestClient::from_url(&server.uri(), ApiKey::new("1234")).expect("client");
    let err = client.lookup(&params("a")).await.expect_err("503");

    match err {
        ClientApiError::Transport(message) => assert!(message.contains("503")),
        other => panic!("expected transport error, got {other:?}"),
    }
}
