//! Pipeline tests: fill, render, send and read against a stub transport.

use super::{init_test_env, StubTransport};
use beekeeper::comms::Request;
use beekeeper::response::ResponseReader;
use beekeeper::{
    Action, BaseVariable, Client, Error, HttpMethod, RenderError, RenderedRequest, Renderer,
    ResponseEnvelope, StandardDecoder, StandardRenderer, StaticAction, Transport,
    VariableCollection, VariableError, VariableSpec,
};
use serde_json::{json, Value};
use std::rc::Rc;

fn weather_action() -> StaticAction {
    StaticAction::new("forecast", "https://api.example.com/v1/{city}/forecast")
        .variable("city", VariableSpec::new().of_type("url_replacement"))
        .variable("days", VariableSpec::new())
        .variable("from", VariableSpec::new().optional(true))
        .variable("Authorization", VariableSpec::new().of_type("header").value("Token t0k3n"))
        .returns("application/json")
}

#[test]
fn test_full_call_with_stub_transport() {
    init_test_env();

    let stub = Rc::new(StubTransport::new(
        ResponseEnvelope::new(200)
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_data(r#"{"forecast": ["sun", "rain"]}"#),
    ));
    let recorder = Rc::clone(&stub);
    let client = Client::new(move |request: &RenderedRequest| recorder.send(request));

    let action = weather_action();
    let value = client
        .call(
            &action,
            Some(json!(3)),
            [("city", json!("london")), ("from", json!("2024-06-01"))],
        )
        .unwrap();

    assert_eq!(value, json!({"forecast": ["sun", "rain"]}));

    let sent = stub.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].url,
        "https://api.example.com/v1/london/forecast?days=3&from=2024-06-01&"
    );
    assert_eq!(sent[0].header("Authorization"), Some("Token t0k3n"));
    assert_eq!(sent[0].method, HttpMethod::GET);
    assert_eq!(sent[0].data, None);
}

#[test]
fn test_reserved_name_is_escaped_but_rendered_by_external_name() {
    let action = weather_action();
    let variables = action.variables();

    assert!(variables.contains_key("_from"));
    assert_eq!(variables.get_key("_from").unwrap().name(), "from");
}

#[test]
fn test_json_body_sets_content_type_and_post() {
    let action = StaticAction::new("create", "https://api.example.com/hives")
        .variable("hive", VariableSpec::new().of_type("json_data"));

    let mut variables = action.variables();
    variables
        .fill_kwargs([("hive", json!({"name": "north", "frames": 10}))])
        .unwrap();

    let request = Request::new(&action, variables, &StandardRenderer, false).unwrap();
    let output = request.output();

    assert_eq!(output.headers["Content-Type"], "application/json");
    assert_eq!(output.method, HttpMethod::POST);
    let body: Value = serde_json::from_str(output.data.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"name": "north", "frames": 10}));
}

#[test]
fn test_last_data_variable_wins() {
    let renderer = |var_type: &str, _: &VariableCollection| -> Result<Vec<BaseVariable>, RenderError> {
        match var_type {
            "data" => Ok(vec![
                BaseVariable::from_tag("data", "", "first", Some("text/plain"))?,
                BaseVariable::from_tag("data", "", "second", Some("application/xml"))?,
            ]),
            _ => Ok(vec![]),
        }
    };
    let action = StaticAction::new("upload", "https://api.example.com/upload")
        .variable("payload", VariableSpec::new().of_type("data").value("ignored"));

    let request = Request::new(&action, action.variables(), &renderer, false).unwrap();
    assert_eq!(request.output().data.as_deref(), Some("second"));
    assert_eq!(request.output().content_type(), Some("application/xml"));
}

#[test]
fn test_renderer_tag_errors_abort_before_sending() {
    let renderer = |_: &str, _: &VariableCollection| -> Result<Vec<BaseVariable>, RenderError> {
        Ok(vec![BaseVariable::from_tag("smoke_signal", "n", "v", None)?])
    };
    let stub = Rc::new(StubTransport::new(ResponseEnvelope::new(200)));
    let recorder = Rc::clone(&stub);
    let client = Client::new(move |request: &RenderedRequest| recorder.send(request))
        .with_renderer(renderer);

    let action = StaticAction::new("ping", "https://api.example.com/ping");
    let err = client
        .call(&action, None, Vec::<(String, Value)>::new())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Render(RenderError::UnsupportedVariableType(ref t)) if t == "smoke_signal"
    ));
    assert!(stub.sent.borrow().is_empty());
}

#[test]
fn test_positional_fill_ambiguity_surfaces() {
    let action = StaticAction::new("search", "https://api.example.com/search")
        .variable("q", VariableSpec::new())
        .variable("lang", VariableSpec::new());
    let client = Client::new(StubTransport::new(ResponseEnvelope::new(200)));

    let err = client
        .prepare(&action, Some(json!("bees")), Vec::<(String, Value)>::new())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Variable(VariableError::AmbiguousFill { ref candidates }) if candidates.len() == 2
    ));
}

#[test]
fn test_unknown_keyword_surfaces() {
    let action = weather_action();
    let client = Client::new(StubTransport::new(ResponseEnvelope::new(200)));

    let err = client
        .prepare(&action, None, [("country", json!("uk"))])
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Variable(VariableError::UnknownVariable(ref n)) if n == "country"
    ));
}

#[test]
fn test_response_negotiation_scenarios() {
    let latin = ResponseReader::new(
        ResponseEnvelope::new(200)
            .with_header("Content-Type", "application/json; charset=ISO-8859-1")
            .with_header("Set-Cookie", "a=1; b=2"),
        "text/plain",
    );
    assert_eq!(latin.mimetype(), "application/json");
    assert_eq!(latin.encoding(), "ISO-8859-1");
    assert_eq!(latin.cookies(), vec!["a=1", "b=2"]);

    let bare = ResponseReader::new(ResponseEnvelope::new(200).with_data("hello"), "text/plain");
    assert_eq!(bare.mimetype(), "text/plain");
    assert_eq!(bare.encoding(), "utf-8");
    assert!(bare.cookies().is_empty());
    assert_eq!(bare.read(&StandardDecoder).unwrap(), json!("hello"));
}

#[test]
fn test_standard_renderer_is_deterministic() {
    let variables = VariableCollection::from_specs([
        ("a", VariableSpec::new().of_type("json_data").value(1)),
        ("b", VariableSpec::new().of_type("json_data").value(2)),
    ]);
    let first = StandardRenderer.render("json_data", &variables).unwrap();
    let second = StandardRenderer.render("json_data", &variables).unwrap();
    assert_eq!(first, second);
}
