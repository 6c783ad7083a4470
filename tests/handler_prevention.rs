mod common;

use axum::http::StatusCode;
use common::{RecordingWafClient, StaticLocator};
use serde_json::{Value, json};

#[tokio::test]
async fn test_prevention_defaults_to_disabled() {
    let app = common::default_app(vec![]);

    let response = app.server.get("/api/waf/prevention").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "enabled": false }));
}

#[tokio::test]
async fn test_enable_prevention_stores_and_forwards() {
    let app = common::default_app(vec![]);

    let response = app
        .server
        .post("/api/waf/prevention")
        .json(&json!({ "enabled": true }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "enabled": true,
        "status": "success",
        "forwarded": true
    }));

    assert_eq!(app.waf.calls(), vec![true]);
    assert!(app.settings.stored().unwrap().enabled);

    let current = app.server.get("/api/waf/prevention").await;
    current.assert_json(&json!({ "enabled": true }));
}

#[tokio::test]
async fn test_enabled_value_is_coerced_by_truthiness() {
    let app = common::default_app(vec![]);

    for (value, expected) in [
        (json!(1), true),
        (json!("yes"), true),
        (json!(0), false),
        (json!(""), false),
        (json!(null), false),
        (json!([]), false),
    ] {
        let response = app
            .server
            .post("/api/waf/prevention")
            .json(&json!({ "enabled": value }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["enabled"], expected, "{value}");
    }
}

#[tokio::test]
async fn test_missing_enabled_is_rejected() {
    let app = common::default_app(vec![]);

    let response = app
        .server
        .post("/api/waf/prevention")
        .json(&json!({ "mode": "block" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Missing enabled parameter");

    assert!(app.settings.stored().is_none());
    assert!(app.waf.calls().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_rejected() {
    let app = common::default_app(vec![]);

    let response = app.server.post("/api/waf/prevention").text("enabled=true").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Missing enabled parameter"
    );
}

#[tokio::test]
async fn test_unreachable_waf_still_stores_setting() {
    let app = common::spawn_app(vec![], StaticLocator::new(), RecordingWafClient::failing());

    let response = app
        .server
        .post("/api/waf/prevention")
        .json(&json!({ "enabled": true }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "enabled": true,
        "status": "success",
        "forwarded": false
    }));
    assert!(app.settings.stored().unwrap().enabled);
}

#[tokio::test]
async fn test_unconfigured_waf_is_not_called() {
    let app = common::spawn_app(
        vec![],
        StaticLocator::new(),
        RecordingWafClient::unconfigured(),
    );

    let response = app
        .server
        .post("/api/waf/prevention")
        .json(&json!({ "enabled": false }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["forwarded"], false);
    assert!(app.waf.calls().is_empty());
}

#[tokio::test]
async fn test_storage_failure_returns_500() {
    let app = common::default_app(vec![]);
    app.settings.fail();

    let response = app
        .server
        .post("/api/waf/prevention")
        .json(&json!({ "enabled": true }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.waf.calls().is_empty());
}
