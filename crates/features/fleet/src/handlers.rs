use crate::Fleet;
use crate::dto::{DroneView, LoadRequest, MedicationView, RegisterDroneRequest};
use crate::error::FleetError;
use axum::extract::{Path, State};
use dhub_derive::api_handler;
use dhub_domain::constants::FLEET_TAG;
use dhub_kernel::server::{ApiResponse, ApiState, Envelope, ValidJson};
use tracing::{info, warn};

impl From<FleetError> for ApiResponse {
    fn from(err: FleetError) -> Self {
        if err.is_rejection() {
            info!(kind = err.kind(), reason = %err, "Fleet request rejected");
            Self::rejected(err.to_string())
        } else if err.is_client_error() {
            warn!(kind = err.kind(), reason = %err, "Fleet request refused");
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err)
        }
    }
}

fn fleet(state: &ApiState) -> Result<&Fleet, ApiResponse> {
    state.try_get_slice::<Fleet>().map_err(ApiResponse::internal)
}

#[api_handler(
    put,
    path = "/drone/register",
    request_body = RegisterDroneRequest,
    responses(
        (status = OK, description = "Registered drone, data is a drone record", body = Envelope),
        (status = BAD_REQUEST, description = "Invalid body or serial number already taken", body = Envelope),
    ),
    tag = FLEET_TAG,
)]
pub(crate) async fn register_handler(
    State(state): State<ApiState>,
    ValidJson(request): ValidJson<RegisterDroneRequest>,
) -> Result<ApiResponse, ApiResponse> {
    let drone = fleet(&state)?.register(request).await?;
    Ok(ApiResponse::ok(&DroneView::from(&drone)))
}

#[api_handler(
    post,
    path = "/drone/{serial}/load",
    params(("serial" = String, Path, description = "Drone serial number")),
    request_body = LoadRequest,
    responses(
        (status = OK, description = "Loaded drone record, or FAILED with the rule that was broken", body = Envelope),
        (status = BAD_REQUEST, description = "Invalid body", body = Envelope),
    ),
    tag = FLEET_TAG,
)]
pub(crate) async fn load_handler(
    State(state): State<ApiState>,
    Path(serial): Path<String>,
    ValidJson(request): ValidJson<LoadRequest>,
) -> Result<ApiResponse, ApiResponse> {
    let medications = request.into_medications().map_err(FleetError::from)?;
    let drone = fleet(&state)?.load_detached(serial, medications).await?;
    Ok(ApiResponse::ok(&DroneView::from(&drone)))
}

#[api_handler(
    get,
    path = "/drone/available",
    responses((status = OK, description = "IDLE drones with enough battery, data is a list of drone records", body = Envelope)),
    tag = FLEET_TAG,
)]
pub(crate) async fn available_handler(
    State(state): State<ApiState>,
) -> Result<ApiResponse, ApiResponse> {
    let drones = fleet(&state)?.available_for_loading().await?;
    let views: Vec<DroneView> = drones.iter().map(DroneView::from).collect();
    Ok(ApiResponse::ok(&views))
}

#[api_handler(
    get,
    path = "/drone/{serial}/medications",
    params(("serial" = String, Path, description = "Drone serial number")),
    responses((status = OK, description = "Medications on board, or FAILED for an unknown drone", body = Envelope)),
    tag = FLEET_TAG,
)]
pub(crate) async fn medications_handler(
    State(state): State<ApiState>,
    Path(serial): Path<String>,
) -> Result<ApiResponse, ApiResponse> {
    let medications = fleet(&state)?.medications_of(&serial).await?;
    let views: Vec<MedicationView> = medications.into_iter().map(MedicationView::from).collect();
    Ok(ApiResponse::ok(&views))
}

#[api_handler(
    get,
    path = "/drone/{serial}/battery",
    params(("serial" = String, Path, description = "Drone serial number")),
    responses((status = OK, description = "Battery level in percent, or FAILED for an unknown drone", body = Envelope)),
    tag = FLEET_TAG,
)]
pub(crate) async fn battery_handler(
    State(state): State<ApiState>,
    Path(serial): Path<String>,
) -> Result<ApiResponse, ApiResponse> {
    let level = fleet(&state)?.battery_of(&serial).await?;
    Ok(ApiResponse::ok(&level))
}
