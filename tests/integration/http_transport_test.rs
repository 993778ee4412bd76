//! HTTP transport tests against a local mock server.

use super::init_test_env;
use beekeeper::transport::{HttpTransport, TransportConfig};
use beekeeper::{
    Client, HttpMethod, RenderedRequest, StaticAction, Transport, TransportError, VariableSpec,
};
use mockito::Matcher;
use serde_json::json;

fn transport() -> HttpTransport {
    let mut config = TransportConfig::new(5000);
    config
        .default_headers
        .insert("User-Agent".to_string(), "beekeeper-tests".to_string());
    HttpTransport::new(config).unwrap()
}

#[test]
fn test_get_with_query_and_headers() {
    init_test_env();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", Matcher::Regex(r"^/users/42".to_string()))
        .match_query(Matcher::UrlEncoded("fields".into(), "name email".into()))
        .match_header("x-api-key", "k-1")
        .match_header("user-agent", "beekeeper-tests")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"{"id": 42, "name": "Ada"}"#)
        .create();

    let action = StaticAction::new("get_user", format!("{}/users/{{id}}", server.url()))
        .variable("id", VariableSpec::new().of_type("url_replacement"))
        .variable("fields", VariableSpec::new())
        .variable("X-Api-Key", VariableSpec::new().of_type("header").value("k-1"));

    let client = Client::new(transport());
    let value = client
        .call(&action, Some(json!("name email")), [("id", json!("42"))])
        .unwrap();

    assert_eq!(value, json!({"id": 42, "name": "Ada"}));
    mock.assert();
}

#[test]
fn test_post_json_body() {
    init_test_env();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", Matcher::Regex(r"^/hives".to_string()))
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"name": "north"})))
        .with_status(201)
        .with_header("content-type", "text/plain; charset=ISO-8859-1")
        .with_header("set-cookie", "session=abc; Path=/")
        .with_body(vec![0x63, 0x72, 0xE9, 0xE9])
        .create();

    let action = StaticAction::new("create", format!("{}/hives", server.url()))
        .variable("hive", VariableSpec::new().of_type("json_data"))
        .returns("application/json");

    let client = Client::new(transport());
    let request = client
        .prepare(&action, None, [("hive", json!({"name": "north"}))])
        .unwrap();
    let response = client.send(&request).unwrap();

    assert_eq!(response.code(), 201);
    assert_eq!(response.mimetype(), "text/plain");
    assert_eq!(response.encoding(), "ISO-8859-1");
    assert_eq!(response.cookies(), vec!["session=abc", "Path=/"]);
    assert_eq!(
        response.read(&beekeeper::StandardDecoder).unwrap(),
        json!("créé")
    );
    mock.assert();
}

#[test]
fn test_error_status_is_returned_not_raised() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", Matcher::Any)
        .with_status(404)
        .with_body("missing")
        .create();

    let request = RenderedRequest::new(format!("{}/nothing?", server.url()));
    let envelope = transport().send(&request).unwrap();

    assert_eq!(envelope.code, 404);
    assert!(envelope.is_client_error());
    assert_eq!(envelope.data, b"missing");
}

#[test]
fn test_request_headers_override_defaults() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", Matcher::Any)
        .match_header("user-agent", "custom-agent")
        .with_status(200)
        .create();

    let mut request = RenderedRequest::new(format!("{}/ua?", server.url()));
    request.method = HttpMethod::GET;
    request.set_header("user-agent".to_string(), "custom-agent".to_string());

    transport().send(&request).unwrap();
    mock.assert();
}

#[test]
fn test_invalid_url() {
    let request = RenderedRequest::new("not a url?");
    let err = transport().send(&request).unwrap_err();
    assert!(matches!(err, TransportError::InvalidUrl(_)));
}

#[test]
fn test_connection_refused() {
    let request = RenderedRequest::new("http://127.0.0.1:1/?");
    let err = transport().send(&request).unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}
