#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use dhub_kernel::server::{ApiResponse, ApiState, Envelope, Status, ValidJson};
use dhub_kernel::store::MemoryFleetStore;
use dhub_kernel::validation::{Validate, Violations};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Debug, Deserialize)]
struct Ping {
    level: u8,
}

impl Validate for Ping {
    fn validate(&self) -> Result<(), Violations> {
        let mut violations = Violations::new();
        if self.level > 100 {
            violations.push("level", "Level should be in percentage");
        }
        violations.into_result()
    }
}

async fn ping(ValidJson(body): ValidJson<Ping>) -> ApiResponse {
    ApiResponse::ok(&body.level)
}

async fn call(router: Router, body: &'static str) -> (StatusCode, Value) {
    let request = Request::post("/ping")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn router() -> Router {
    Router::new().route("/ping", post(ping))
}

#[test]
fn envelope_omits_absent_fields() {
    let ok = serde_json::to_value(Envelope::success(&55).unwrap()).unwrap();
    assert_eq!(ok, json!({ "status": "SUCCESS", "data": 55 }));

    let failed = serde_json::to_value(Envelope::failed("nope")).unwrap();
    assert_eq!(failed, json!({ "status": "FAILED", "message": "nope" }));
}

#[test]
fn response_statuses_follow_failure_class() {
    assert_eq!(ApiResponse::rejected("rule").status(), StatusCode::OK);
    assert_eq!(ApiResponse::rejected("rule").envelope().status, Status::Failed);
    assert_eq!(ApiResponse::bad_request("bad").status(), StatusCode::BAD_REQUEST);

    let internal = ApiResponse::internal("disk on fire");
    assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(internal.envelope().message.as_deref(), Some("Internal error: disk on fire"));
    assert_eq!(internal.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn valid_body_reaches_the_handler() {
    let (status, body) = call(router(), r#"{"level": 40}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "SUCCESS", "data": 40 }));
}

#[tokio::test]
async fn invalid_body_is_a_bad_request_with_field_list() {
    let (status, body) = call(router(), r#"{"level": 140}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "FAILED");
    assert_eq!(body["message"], "Request is not valid: level: Level should be in percentage; ");
}

#[tokio::test]
async fn unparseable_body_is_a_bad_request() {
    let (status, body) = call(router(), r#"{"level": -3}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Can't parse request: "));
    assert!(body.get("data").is_none());
}

#[test]
fn state_requires_a_store() {
    assert!(ApiState::builder().build().is_err());

    let state = ApiState::builder().store(Arc::new(MemoryFleetStore::default())).build().unwrap();
    assert_eq!(state.config.server.port, 4583);
    assert_eq!(state.slice_names().count(), 0);
}
