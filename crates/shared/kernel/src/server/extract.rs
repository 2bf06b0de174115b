use super::envelope::ApiResponse;
use crate::validation::Validate;
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::warn;

/// JSON body that is parsed and then validated before the handler runs.
///
/// Both failures are rejected with `400` and a `FAILED` envelope:
/// `Can't parse request: ...` or `Request is not valid: field: message; ...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!(reason = %rejection.body_text(), "Unparseable request body");
            ApiResponse::bad_request(format!("Can't parse request: {}", rejection.body_text()))
        })?;

        value
            .validate()
            .map_err(|violations| ApiResponse::bad_request(format!("Request is not valid: {violations}")))?;

        Ok(Self(value))
    }
}
