//! Fleet persistence.
//!
//! [`FleetStore`] is the contract the fleet feature is written against. It offers plain
//! reads, exclusive per-drone leases for read-modify-write, and keyset-paginated scans.
//! [`MemoryFleetStore`] is the in-process engine used by the server and the tests.
//!
//! ```rust
//! use dhub_domain::drone::{Drone, Model};
//! use dhub_store::{FleetStore, MemoryFleetStore, StoreError};
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StoreError> {
//!     let store = MemoryFleetStore::builder().lock_timeout(Duration::from_millis(200)).build();
//!     store.insert(Drone::new("SN-1", Model::Lightweight, 300, 90)).await?;
//!
//!     let lease = store.find_for_update("SN-1").await?.expect("registered above");
//!     let (mut drone, guard) = lease.into_parts();
//!     drone.battery_capacity = 80;
//!     store.upsert(drone).await?;
//!     drop(guard);
//!
//!     assert_eq!(store.find_by_serial("SN-1").await?.map(|d| d.battery_capacity), Some(80));
//!     Ok(())
//! }
//! ```

mod error;
mod lock;
mod memory;
mod store;

pub use error::{StoreError, StoreErrorExt};
pub use lock::{KeyGuard, LockTable};
pub use memory::{MemoryFleetStore, MemoryFleetStoreBuilder};
pub use store::{Cursor, DroneLease, FleetStore, Page, SharedFleetStore};
