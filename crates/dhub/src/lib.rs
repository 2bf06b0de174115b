//! Facade crate for `DroneHub` features and shared modules.
//! Re-exports domain/kernel/store primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `dhub` with the `server` feature for the HTTP surface.
//! - Call [`open_store`] once, then `dhub::init` (server) to register feature slices.

pub use dhub_domain as domain;
use dhub_domain::config::ApiConfig;
pub use dhub_kernel as kernel;
pub use dhub_store as store;
use dhub_store::{MemoryFleetStore, SharedFleetStore};
use std::sync::Arc;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use dhub_fleet::router::fleet_router;
        pub use dhub_kernel::server::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use dhub_fleet as fleet;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "fleet",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Opens the fleet store configured under `store`.
#[must_use]
pub fn open_store(config: &ApiConfig) -> SharedFleetStore {
    let timeout = config.store.lock_timeout();
    tracing::info!(lock_timeout = ?timeout, "Opening in-memory fleet store");

    Arc::new(MemoryFleetStore::builder().lock_timeout(timeout).build())
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    store: &SharedFleetStore,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // Fleet
    slices.push(features::fleet::init(Arc::clone(store))?);

    Ok(slices)
}
