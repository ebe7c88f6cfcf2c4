//! Request pipeline tests: correlation, routing, error handling, records.

use std::collections::HashSet;

use axum::http::StatusCode;
use elk_logging_app::http::ErrorType;
use elk_logging_app::observability::Level;
use serde_json::json;

mod common;

use common::{records_for, TestApp};

#[tokio::test]
async fn root_returns_greeting_with_correlation_id() {
    let app = TestApp::new();

    let res = app.get("/").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["hello"], "world");
    assert_eq!(res.body["correlationId"], res.correlation_id());
}

#[tokio::test]
async fn echo_returns_query_parameters() {
    let app = TestApp::new();

    let res = app.get("/echo?a=1&b=2").await;
    let id = res.correlation_id().to_string();

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["echo"], json!({ "a": "1", "b": "2" }));
    assert_eq!(res.body["correlationId"], id);

    let records = app.finish().await;
    let request_records = records_for(&records, &id);
    let echo = request_records
        .iter()
        .find(|r| r.message == "Echo request received")
        .expect("echo record");
    assert_eq!(echo.level, Level::Info);
    assert_eq!(echo.field("params"), Some(&json!(r#"{"a":"1","b":"2"}"#)));
}

#[tokio::test]
async fn echo_keeps_every_value_of_a_repeated_key() {
    let app = TestApp::new();

    let res = app.get("/echo?a=1&a=2&b=3").await;
    let id = res.correlation_id().to_string();

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["echo"], json!({ "a": ["1", "2"], "b": "3" }));

    let records = app.finish().await;
    let echo = records_for(&records, &id)
        .into_iter()
        .find(|r| r.message == "Echo request received")
        .expect("echo record");
    assert_eq!(echo.field("params"), Some(&json!(r#"{"a":["1","2"],"b":"3"}"#)));
}

#[tokio::test]
async fn echo_without_parameters_returns_empty_object() {
    let app = TestApp::new();

    let res = app.get("/echo").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["echo"], json!({}));
}

#[tokio::test]
async fn bad_request_bypasses_error_handler() {
    let app = TestApp::new();

    let res = app.get("/bad-request").await;
    let id = res.correlation_id().to_string();

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.body,
        json!({ "error": "Bad Request", "correlationId": id })
    );

    let records = app.finish().await;
    let request_records = records_for(&records, &id);
    assert!(request_records
        .iter()
        .all(|r| r.message != "Error caught in middleware"));
    assert_eq!(request_records.len(), 1);
    assert_eq!(request_records[0].field("statusCode"), Some(&json!(400)));
}

#[tokio::test]
async fn induced_error_is_normalized_to_500() {
    let app = TestApp::new();

    let res = app.get("/error").await;
    let id = res.correlation_id().to_string();

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.body,
        json!({ "error": "Internal Server Error", "correlationId": id })
    );

    let records = app.finish().await;
    let request_records = records_for(&records, &id);
    let messages: Vec<_> = request_records.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["An error occurred", "Error caught in middleware", "Response sent"]
    );

    let labels: Vec<_> = ErrorType::ALL.iter().map(|t| t.label()).collect();
    let induced = request_records[0];
    assert_eq!(induced.level, Level::Error);
    let label = induced.field("errorType").and_then(|v| v.as_str()).unwrap();
    assert!(labels.contains(&label), "unexpected label {label}");
    assert_eq!(
        induced.field("errorMessage"),
        Some(&json!(format!("This is a test {label}")))
    );

    let caught = request_records[1];
    assert_eq!(caught.level, Level::Error);
    assert_eq!(caught.field("error"), induced.field("errorMessage"));

    assert_eq!(request_records[2].field("statusCode"), Some(&json!(500)));
}

#[tokio::test]
async fn error_body_never_leaks_the_label() {
    let app = TestApp::new();

    for _ in 0..20 {
        let res = app.get("/error").await;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body["error"], "Internal Server Error");
        assert_eq!(res.body.as_object().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn unknown_route_is_404_with_correlation() {
    let app = TestApp::new();

    let res = app.get("/missing").await;
    let id = res.correlation_id().to_string();
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let records = app.finish().await;
    let request_records = records_for(&records, &id);
    assert_eq!(request_records.len(), 1);
    assert_eq!(request_records[0].message, "Response sent");
    assert_eq!(request_records[0].field("path"), Some(&json!("/missing")));
    assert_eq!(request_records[0].field("statusCode"), Some(&json!(404)));
}

#[tokio::test]
async fn response_sent_is_logged_exactly_once() {
    let app = TestApp::new();

    let res = app.get("/echo?x=y").await;
    let id = res.correlation_id().to_string();

    let records = app.finish().await;
    let sent: Vec<_> = records_for(&records, &id)
        .into_iter()
        .filter(|r| r.message == "Response sent")
        .collect();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].field("method"), Some(&json!("GET")));
    assert_eq!(sent[0].field("path"), Some(&json!("/echo")));
    assert_eq!(sent[0].field("statusCode"), Some(&json!(200)));
}

#[tokio::test]
async fn inbound_correlation_header_is_replaced() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = TestApp::new();
    let request = Request::builder()
        .uri("/")
        .header("x-correlation-id", "client-chosen")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let values: Vec<_> = response.headers().get_all("x-correlation-id").iter().collect();

    assert_eq!(values.len(), 1);
    assert_ne!(values[0], "client-chosen");
}

#[tokio::test]
async fn correlation_ids_are_unique_per_request() {
    let app = TestApp::new();
    let mut seen = HashSet::new();

    for path in ["/", "/echo?a=1", "/bad-request", "/error", "/nope"].iter().cycle().take(50) {
        let res = app.get(path).await;
        assert!(seen.insert(res.correlation_id().to_string()));
    }
    assert_eq!(seen.len(), 50);
}

#[tokio::test]
async fn every_request_record_is_well_formed() {
    let app = TestApp::new();
    let mut ids = Vec::new();

    for path in ["/", "/echo?a=1&b=2", "/bad-request", "/error", "/nope"] {
        ids.push(app.get(path).await.correlation_id().to_string());
    }

    let records = app.finish().await;
    for id in &ids {
        let request_records = records_for(&records, id);
        assert!(!request_records.is_empty());
        for record in request_records {
            assert!(!record.correlation_id.as_deref().unwrap().is_empty());
            assert!(matches!(record.level, Level::Info | Level::Error));
            assert_eq!(record.service, "user-service");
            assert_eq!(record.application, "elk-logging-app");
        }
    }

    // Nothing request-scoped escapes without an ID.
    assert!(records.iter().all(|r| r.correlation_id.is_some()));
}

#[tokio::test]
async fn dead_collector_does_not_change_responses() {
    let healthy = TestApp::new();
    let degraded = TestApp::with_dead_collector();

    for path in ["/", "/echo?a=1&b=2", "/bad-request", "/error"] {
        let expected = healthy.get(path).await;
        let actual = degraded.get(path).await;

        assert_eq!(actual.status, expected.status, "status differs for {path}");

        let mut expected_body = expected.body.clone();
        let mut actual_body = actual.body.clone();
        expected_body["correlationId"] = json!(null);
        actual_body["correlationId"] = json!(null);
        assert_eq!(actual_body, expected_body, "body differs for {path}");
    }

    // The in-process sink still got everything.
    let records = degraded.finish().await;
    assert!(records.iter().any(|r| r.message == "Error caught in middleware"));
}
