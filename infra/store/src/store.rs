use crate::error::StoreError;
use crate::lock::KeyGuard;
use async_trait::async_trait;
use dhub_domain::drone::{Drone, DroneProjection, State};
use std::fmt::Debug;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Shared, type-erased store handle.
pub type SharedFleetStore = Arc<dyn FleetStore>;

/// Position after which the next page of a scan starts.
///
/// Opaque to callers: hand back exactly what [`Page::next`] returned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(String);

impl Cursor {
    #[must_use]
    pub fn new(position: impl Into<String>) -> Self {
        Self(position.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One bounded slice of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` once the scan has reached the end.
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// A drone read under its exclusive lock.
///
/// The lock stays held until the [`KeyGuard`] is dropped; write the updated record
/// back before letting it go.
#[derive(Debug)]
pub struct DroneLease {
    drone: Drone,
    guard: KeyGuard,
}

impl DroneLease {
    #[must_use]
    pub const fn new(drone: Drone, guard: KeyGuard) -> Self {
        Self { drone, guard }
    }

    #[must_use]
    pub const fn drone(&self) -> &Drone {
        &self.drone
    }

    #[must_use]
    pub fn into_parts(self) -> (Drone, KeyGuard) {
        (self.drone, self.guard)
    }
}

/// Persistence contract for drone records.
///
/// Implementations must keep one record per serial number and make `find_for_update`
/// exclusive per serial: a second caller waits until the first lease is dropped.
#[async_trait]
pub trait FleetStore: Debug + Send + Sync {
    /// All drones whose state equals `state`, in serial order.
    async fn find_by_state(&self, state: State) -> Result<Vec<Drone>, StoreError>;

    /// Plain read without locking.
    async fn find_by_serial(&self, serial: &str) -> Result<Option<Drone>, StoreError>;

    /// Read under the drone's exclusive lock. `None` when the serial is unknown.
    async fn find_for_update(&self, serial: &str) -> Result<Option<DroneLease>, StoreError>;

    /// Projections of every drone, `limit` at a time, strictly after `after`.
    ///
    /// Following the returned cursors visits each drone that exists for the whole
    /// scan exactly once.
    async fn scan_projection(
        &self,
        after: Option<&Cursor>,
        limit: NonZeroUsize,
    ) -> Result<Page<DroneProjection>, StoreError>;

    /// Creates a new record.
    ///
    /// # Errors
    ///
    /// [`StoreError::Conflict`] when the serial number is already taken.
    async fn insert(&self, drone: Drone) -> Result<(), StoreError>;

    /// Creates or replaces the record keyed by `drone.serial_number`.
    async fn upsert(&self, drone: Drone) -> Result<(), StoreError>;
}
