mod common;

use async_trait::async_trait;
use common::drone;
use dhub_domain::config::BatteryAuditConfig;
use dhub_domain::drone::{Drone, DroneProjection, State};
use dhub_fleet::{BatteryAuditor, FleetError, ReadingSink, SweepReport};
use dhub_store::{Cursor, DroneLease, FleetStore, MemoryFleetStore, Page, StoreError};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::num::{NonZeroU64, NonZeroUsize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
struct Collector(Arc<Mutex<Vec<DroneProjection>>>);

impl Collector {
    fn serials(&self) -> Vec<String> {
        self.0.lock().iter().map(|p| p.serial_number.clone()).collect()
    }
}

impl ReadingSink for Collector {
    fn record(&self, reading: &DroneProjection) {
        self.0.lock().push(reading.clone());
    }
}

fn config(batch_size: usize, period_ms: u64) -> BatteryAuditConfig {
    BatteryAuditConfig {
        batch_size: NonZeroUsize::new(batch_size).unwrap(),
        period_ms: NonZeroU64::new(period_ms).unwrap(),
    }
}

fn fleet_of(count: usize) -> MemoryFleetStore {
    MemoryFleetStore::builder()
        .seed((0..count).map(|i| drone(&format!("SN-{i:04}"), 300, 50, State::Idle)))
        .build()
}

async fn sweep(store: MemoryFleetStore, batch: usize) -> (SweepReport, Vec<String>) {
    let sink = Collector::default();
    let auditor = BatteryAuditor::new(Arc::new(store), &config(batch, 1_000)).with_sink(sink.clone());
    let report = auditor.sweep().await.unwrap();
    (report, sink.serials())
}

#[tokio::test]
async fn batch_of_one_visits_every_drone_once() {
    let (report, seen) = sweep(fleet_of(5), 1).await;
    assert_eq!(report, SweepReport { drones: 5, pages: 5 });
    assert_eq!(seen.iter().collect::<BTreeSet<_>>().len(), 5);
}

#[tokio::test]
async fn batch_larger_than_fleet_is_a_single_page() {
    let (report, seen) = sweep(fleet_of(3), 100).await;
    assert_eq!(report, SweepReport { drones: 3, pages: 1 });
    assert_eq!(seen.len(), 3);
}

#[tokio::test]
async fn batch_equal_to_fleet_is_a_single_page() {
    let (report, _) = sweep(fleet_of(4), 4).await;
    assert_eq!(report, SweepReport { drones: 4, pages: 1 });
}

#[tokio::test]
async fn empty_fleet_sweeps_one_empty_page() {
    let (report, seen) = sweep(fleet_of(0), 10).await;
    assert_eq!(report, SweepReport { drones: 0, pages: 1 });
    assert!(seen.is_empty());
}

#[tokio::test]
async fn readings_carry_battery_and_state() {
    let store = MemoryFleetStore::builder().seed([drone("SN-LOW", 300, 7, State::Returning)]).build();
    let sink = Collector::default();

    BatteryAuditor::new(Arc::new(store), &config(10, 1_000))
        .with_sink(sink.clone())
        .sweep()
        .await
        .unwrap();

    let readings = sink.0.lock().clone();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].battery_capacity, 7);
    assert_eq!(readings[0].state, State::Returning);
}

#[tokio::test(start_paused = true)]
async fn spawned_auditor_sweeps_on_every_tick_until_stopped() {
    let sink = Collector::default();
    let handle = BatteryAuditor::new(Arc::new(fleet_of(2)), &config(1, 1_000))
        .with_sink(sink.clone())
        .spawn();

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    handle.stop().await.unwrap();

    // Ticks at 0s, 1s and 2s.
    assert_eq!(sink.serials().len(), 3 * 2);
}

#[derive(Debug, Default)]
struct FlakyStore {
    scans: AtomicUsize,
    inner: MemoryFleetStore,
}

#[async_trait]
impl FleetStore for FlakyStore {
    async fn find_by_state(&self, state: State) -> Result<Vec<Drone>, StoreError> {
        self.inner.find_by_state(state).await
    }

    async fn find_by_serial(&self, serial: &str) -> Result<Option<Drone>, StoreError> {
        self.inner.find_by_serial(serial).await
    }

    async fn find_for_update(&self, serial: &str) -> Result<Option<DroneLease>, StoreError> {
        self.inner.find_for_update(serial).await
    }

    async fn scan_projection(
        &self,
        after: Option<&Cursor>,
        limit: NonZeroUsize,
    ) -> Result<Page<DroneProjection>, StoreError> {
        // Every other scan call fails.
        if self.scans.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            return Err(StoreError::Unavailable { message: "connection reset".into(), context: None });
        }
        self.inner.scan_projection(after, limit).await
    }

    async fn insert(&self, drone: Drone) -> Result<(), StoreError> {
        self.inner.insert(drone).await
    }

    async fn upsert(&self, drone: Drone) -> Result<(), StoreError> {
        self.inner.upsert(drone).await
    }
}

#[tokio::test]
async fn store_failure_surfaces_from_a_single_sweep() {
    let store = Arc::new(FlakyStore { scans: AtomicUsize::new(0), inner: fleet_of(1) });
    let auditor = BatteryAuditor::new(store, &config(10, 1_000));

    let err = auditor.sweep().await.unwrap_err();
    assert!(matches!(err, FleetError::Store { .. }));
    assert!(err.to_string().contains("scanning fleet for battery audit"));

    assert_eq!(auditor.sweep().await.unwrap(), SweepReport { drones: 1, pages: 1 });
}

#[tokio::test(start_paused = true)]
async fn failed_sweep_is_retried_on_the_next_tick() {
    let store = Arc::new(FlakyStore { scans: AtomicUsize::new(0), inner: fleet_of(1) });
    let sink = Collector::default();
    let handle = BatteryAuditor::new(store, &config(10, 1_000)).with_sink(sink.clone()).spawn();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(sink.serials().is_empty());
    assert!(!handle.is_finished());

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(sink.serials(), ["SN-0000"]);

    handle.stop().await.unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn sweep_reports_each_drone_exactly_once(count in 0usize..80, batch in 1usize..25) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let (report, seen) = rt.block_on(sweep(fleet_of(count), batch));

        let unique: BTreeSet<_> = seen.iter().cloned().collect();
        prop_assert_eq!(seen.len(), count);
        prop_assert_eq!(unique.len(), count);
        prop_assert_eq!(report.drones, count);
        prop_assert_eq!(report.pages, count.div_ceil(batch).max(1));
    }
}
