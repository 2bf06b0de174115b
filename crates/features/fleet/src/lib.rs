//! Fleet feature slice.
//!
//! Registers drones, loads them with medications under a per-drone exclusive lease,
//! answers availability and per-drone queries, and runs the periodic battery audit.
//! The HTTP surface lives behind the `server` feature.

mod auditor;
mod availability;
mod coordinator;
pub mod dto;
mod error;
#[cfg(feature = "server")]
mod handlers;
mod registration;
#[cfg(feature = "server")]
pub mod router;
pub mod state_machine;
mod validation;

pub use auditor::{AuditorHandle, BatteryAuditor, ReadingSink, SweepReport, TracingSink};
pub use error::{FleetError, FleetErrorExt};

use dhub_kernel::domain::registry::InitializedSlice;
use dhub_store::SharedFleetStore;

/// Fleet feature state
#[dhub_derive::dhub_slice]
pub struct Fleet {
    store: SharedFleetStore,
}

impl Fleet {
    #[must_use]
    pub fn with_store(store: SharedFleetStore) -> Self {
        Self::new(FleetInner { store })
    }
}

/// Initialize the fleet feature on top of a fleet store.
///
/// # Errors
///
/// Currently infallible; the signature matches the other slice initializers.
pub fn init(store: SharedFleetStore) -> Result<InitializedSlice, FleetError> {
    tracing::info!("Fleet slice initialized");

    Ok(InitializedSlice::new(Fleet::with_store(store)))
}
