use super::state::ApiState;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::{Json, response::IntoResponse};
use dhub_derive::{api_handler, api_model};
use dhub_domain::constants::SYSTEM_TAG;
use std::num::NonZeroUsize;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::warn;

#[api_model]
/// Health check response
struct HealthResponse {
    /// `up`, or `degraded` when the fleet store does not answer
    status: &'static str,
    /// Version
    version: &'static str,
    /// Uptime in seconds
    uptime: u64,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Service and fleet store are reachable", body = HealthResponse),
        (status = SERVICE_UNAVAILABLE, description = "Fleet store check failed", body = HealthResponse),
    ),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let check = state.store.scan_projection(None, NonZeroUsize::MIN).await;
    let (code, status) = match check {
        Ok(_) => (StatusCode::OK, "up"),
        Err(err) => {
            warn!(error = %err, kind = err.kind(), "Fleet store check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        },
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
    };

    (
        code,
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        Json(body),
    )
}
