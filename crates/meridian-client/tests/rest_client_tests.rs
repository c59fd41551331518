//! Integration tests for the REST client.

use meridian_client::{ClientError, RestClient};
use serde::Deserialize;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Record {
    id: u64,
    name: String,
}

#[tokio::test]
async fn test_json_response_is_decoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/records/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1,"name":"x"}"#))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(mock_server.uri());
    let record: Record = client.get("/records/1").send().await.expect("Request failed");

    assert_eq!(
        record,
        Record {
            id: 1,
            name: "x".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(mock_server.uri());
    let result = client.get("/empty").send::<Record>().await;

    assert!(matches!(result, Err(ClientError::EmptyBody)));
}

#[tokio::test]
async fn test_malformed_json_surfaces_the_parse_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(mock_server.uri());
    let result = client.get("/broken").send::<Record>().await;

    match result {
        Err(ClientError::Decode(e)) => assert!(e.is_syntax()),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_query_parameters_appear_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1,"name":"x"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(mock_server.uri());
    let _: Record = client
        .get("/search")
        .query("page", "1")
        .query("limit", "10")
        .query("page", "2")
        .send()
        .await
        .expect("Request failed");

    // The repeated key resolved to a single pair with the last value.
    let requests = mock_server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs.len(), 2);
}

#[tokio::test]
async fn test_body_forces_json_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/records"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":2,"name":"y"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(mock_server.uri());
    let record: Record = client
        .post("/records")
        .header("Content-Type", "text/plain")
        .body(r#"{"name":"y"}"#.as_bytes().to_vec())
        .send()
        .await
        .expect("Request failed");

    assert_eq!(record.id, 2);
}

#[tokio::test]
async fn test_empty_body_is_not_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/records"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":3,"name":"z"}"#))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(mock_server.uri());
    let _: Record = client
        .post("/records")
        .body(Vec::new())
        .send()
        .await
        .expect("Request failed");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_caller_headers_are_applied_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/records"))
        .and(header("X-Request-Id", "abc-123"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":4,"name":"w"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::builder(mock_server.uri())
        .default_header("Accept", "text/plain")
        .build();

    // The per-request Accept wins over the client default.
    let _: Record = client
        .get("/records")
        .header("X-Request-Id", "abc-123")
        .header("Accept", "application/json")
        .send()
        .await
        .expect("Request failed");
}

#[tokio::test]
async fn test_status_is_not_inspected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"id":9,"name":"gone"}"#))
        .mount(&mock_server)
        .await;

    // A 404 with a decodable body is still reported as success.
    let client = RestClient::new(mock_server.uri());
    let record: Record = client.get("/missing").send().await.expect("Request failed");

    assert_eq!(record.id, 9);
}

#[tokio::test]
async fn test_all_methods_are_routed() {
    let mock_server = MockServer::start().await;

    for verb in ["GET", "POST", "PUT", "DELETE"] {
        Mock::given(method(verb))
            .and(path("/records/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":5,"name":"m"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = RestClient::new(mock_server.uri());
    let _: Record = client.get("/records/5").send().await.expect("GET failed");
    let _: Record = client.post("/records/5").send().await.expect("POST failed");
    let _: Record = client.put("/records/5").send().await.expect("PUT failed");
    let _: Record = client
        .delete("/records/5")
        .send()
        .await
        .expect("DELETE failed");
}

#[tokio::test]
async fn test_query_pairs_bulk_setter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "3"))
        .and(query_param("limit", "10"))
        .and(query_param("sort", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1,"name":"x"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Bulk pairs merge with the same set-by-key semantics as query().
    let client = RestClient::new(mock_server.uri());
    let _: Record = client
        .get("/search")
        .query("page", "1")
        .query_pairs([
            ("page".to_string(), "3".to_string()),
            ("limit".to_string(), "10".to_string()),
            ("sort".to_string(), "name".to_string()),
        ])
        .send()
        .await
        .expect("Request failed");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query_pairs().count(), 3);
}

#[tokio::test]
async fn test_transport_failure_is_surfaced() {
    // Nothing listens here; the connection fails before any response.
    let client = RestClient::new("http://127.0.0.1:1");
    let result = client.get("/records").send::<Record>().await;

    assert!(matches!(result, Err(ClientError::Transport(_))));
}
