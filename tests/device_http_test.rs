//! HTTP surface of a device, exercised through `tower::ServiceExt::oneshot`
//! without binding a port.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use iot_facade::{DeviceAddress, LoggingDevice, MeteredDevice, SmartLight, server};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    let light = SmartLight::new("light_001", DeviceAddress::new("127.0.0.1", 8002));
    server::router(Arc::new(LoggingDevice::new(light)))
}

async fn send(app: &axum::Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn should_serve_status() {
    let (status, body) = send(&app(), Method::GET, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "device_id": "light_001",
            "type": "smart_light",
            "is_on": false,
            "brightness": 50,
            "connection": "127.0.0.1:8002",
        })
    );
}

#[tokio::test]
async fn should_apply_power_and_acknowledge() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/power/on").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));

    let (_, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(body["is_on"], json!(true));

    send(&app, Method::POST, "/power/off").await;
    let (_, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(body["is_on"], json!(false));
}

#[tokio::test]
async fn should_apply_brightness() {
    let app = app();

    let (status, _) = send(&app, Method::POST, "/brightness/80").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(body["brightness"], json!(80));
}

#[tokio::test]
async fn should_answer_bad_request_for_rejected_values() {
    let app = app();

    for uri in ["/power/maybe", "/brightness/101", "/brightness/-5", "/brightness/loud", "/power"] {
        let (status, body) = send(&app, Method::POST, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["detail"].is_string(), "{uri}");
    }

    let (_, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(body["is_on"], json!(false));
    assert_eq!(body["brightness"], json!(50));
}

#[tokio::test]
async fn should_keep_encoded_slash_inside_one_value() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/brightness/7%2Fjunk").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("7/junk"));

    let (_, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(body["brightness"], json!(50));
}

#[tokio::test]
async fn should_reject_extra_and_empty_segments() {
    let app = app();

    for uri in ["/power/on/extra", "/power//on", "/brightness/7/junk"] {
        let (status, _) = send(&app, Method::POST, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }

    let (_, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(body["is_on"], json!(false));
    assert_eq!(body["brightness"], json!(50));
}

#[tokio::test]
async fn should_count_rejected_http_calls() {
    let light = SmartLight::new("light_002", DeviceAddress::new("127.0.0.1", 8003));
    let device = Arc::new(MeteredDevice::new(light));
    let app = server::router(device.clone());

    send(&app, Method::POST, "/power/maybe").await;
    send(&app, Method::POST, "/strobe").await;
    send(&app, Method::POST, "/power/on").await;

    let stats = device.stats();
    assert_eq!(stats.actions_rejected, 2);
    assert_eq!(stats.actions_accepted, 1);
}

#[tokio::test]
async fn should_answer_not_found_for_unknown_action() {
    let (status, body) = send(&app(), Method::POST, "/self_destruct/now").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], json!("Unsupported action: self_destruct"));
}

#[tokio::test]
async fn should_reject_wrong_method_on_status() {
    let (status, _) = send(&app(), Method::POST, "/status").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
