use crate::error::StoreError;
use crate::lock::LockTable;
use crate::store::{Cursor, DroneLease, FleetStore, Page};
use async_trait::async_trait;
use dhub_domain::drone::{Drone, DroneProjection, State};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::num::NonZeroUsize;
use std::ops::Bound;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// In-process fleet store.
///
/// Records are kept ordered by serial number, which doubles as the scan cursor.
#[derive(Debug, Clone)]
pub struct MemoryFleetStore {
    inner: Arc<MemoryFleetStoreInner>,
}

#[derive(Debug)]
struct MemoryFleetStoreInner {
    drones: RwLock<BTreeMap<String, Drone>>,
    locks: LockTable,
    lock_timeout: Duration,
}

impl Default for MemoryFleetStore {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MemoryFleetStore {
    #[must_use]
    pub fn builder() -> MemoryFleetStoreBuilder {
        MemoryFleetStoreBuilder::default()
    }

    /// Number of stored drones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.drones.read().len()
    }

    /// Number of drone locks currently held or awaited.
    #[must_use]
    pub fn held_locks(&self) -> usize {
        self.inner.locks.len()
    }
}

#[derive(Debug)]
pub struct MemoryFleetStoreBuilder {
    lock_timeout: Duration,
    seed: Vec<Drone>,
}

impl Default for MemoryFleetStoreBuilder {
    fn default() -> Self {
        Self { lock_timeout: DEFAULT_LOCK_TIMEOUT, seed: Vec::new() }
    }
}

impl MemoryFleetStoreBuilder {
    #[must_use = "Sets how long a loader waits for a drone held by someone else"]
    pub const fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    #[must_use = "Adds drones present from the start"]
    pub fn seed(mut self, drones: impl IntoIterator<Item = Drone>) -> Self {
        self.seed.extend(drones);
        self
    }

    #[must_use]
    pub fn build(self) -> MemoryFleetStore {
        let drones: BTreeMap<_, _> =
            self.seed.into_iter().map(|d| (d.serial_number.clone(), d)).collect();
        debug!(drones = drones.len(), lock_timeout = ?self.lock_timeout, "Memory fleet store ready");

        MemoryFleetStore {
            inner: Arc::new(MemoryFleetStoreInner {
                drones: RwLock::new(drones),
                locks: LockTable::new(),
                lock_timeout: self.lock_timeout,
            }),
        }
    }
}

#[async_trait]
impl FleetStore for MemoryFleetStore {
    async fn find_by_state(&self, state: State) -> Result<Vec<Drone>, StoreError> {
        let drones = self.inner.drones.read();
        Ok(drones.values().filter(|d| d.state == state).cloned().collect())
    }

    async fn find_by_serial(&self, serial: &str) -> Result<Option<Drone>, StoreError> {
        Ok(self.inner.drones.read().get(serial).cloned())
    }

    async fn find_for_update(&self, serial: &str) -> Result<Option<DroneLease>, StoreError> {
        let guard = self.inner.locks.acquire(serial, self.inner.lock_timeout).await?;
        let current = self.inner.drones.read().get(serial).cloned();
        trace!(serial, found = current.is_some(), "Drone leased");

        Ok(current.map(|drone| DroneLease::new(drone, guard)))
    }

    async fn scan_projection(
        &self,
        after: Option<&Cursor>,
        limit: NonZeroUsize,
    ) -> Result<Page<DroneProjection>, StoreError> {
        let drones = self.inner.drones.read();
        let lower = after.map_or(Bound::Unbounded, |c| Bound::Excluded(c.as_str()));

        let mut window = drones
            .range::<str, _>((lower, Bound::Unbounded))
            .map(|(_, d)| d.projection())
            .take(limit.get() + 1)
            .collect::<Vec<_>>();

        if window.len() <= limit.get() {
            return Ok(Page::last(window));
        }
        window.truncate(limit.get());
        let next = window.last().map(|p| Cursor::new(p.serial_number.clone()));

        Ok(Page { items: window, next })
    }

    async fn insert(&self, drone: Drone) -> Result<(), StoreError> {
        match self.inner.drones.write().entry(drone.serial_number.clone()) {
            Entry::Occupied(entry) => {
                Err(StoreError::Conflict { serial: entry.key().clone(), context: None })
            },
            Entry::Vacant(entry) => {
                debug!(serial = %entry.key(), "Drone stored");
                entry.insert(drone);
                Ok(())
            },
        }
    }

    async fn upsert(&self, drone: Drone) -> Result<(), StoreError> {
        trace!(serial = %drone.serial_number, state = %drone.state, "Drone written");
        self.inner.drones.write().insert(drone.serial_number.clone(), drone);
        Ok(())
    }
}
