use crate::handlers;
use dhub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes of the fleet API under `/drone`.
pub fn fleet_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::register_handler))
        .routes(routes!(handlers::load_handler))
        .routes(routes!(handlers::available_handler))
        .routes(routes!(handlers::medications_handler))
        .routes(routes!(handlers::battery_handler))
}
