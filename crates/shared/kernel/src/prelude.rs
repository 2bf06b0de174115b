pub use crate::domain::constants::*;
pub use crate::domain::drone::{Drone, DroneProjection, Medication, Model, State};
pub use crate::store::{FleetStore, SharedFleetStore, StoreError};
pub use crate::validation::{Validate, Violation, Violations};

#[cfg(feature = "server")]
pub use crate::server::{ApiResponse, ApiState, Envelope, Status, ValidJson};
