//! HTTP building blocks shared by every slice router.

mod envelope;
mod extract;
mod health;
mod router;
mod state;

pub use envelope::{ApiResponse, Envelope, Status};
pub use extract::ValidJson;
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
