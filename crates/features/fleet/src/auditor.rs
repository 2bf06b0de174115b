use crate::error::{FleetError, FleetErrorExt};
use dhub_domain::config::BatteryAuditConfig;
use dhub_domain::drone::DroneProjection;
use dhub_store::{Cursor, SharedFleetStore};
use std::fmt::Debug;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// Receives every battery reading of a sweep.
pub trait ReadingSink: Debug + Send + Sync + 'static {
    fn record(&self, reading: &DroneProjection);
}

/// Writes each reading as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReadingSink for TracingSink {
    fn record(&self, reading: &DroneProjection) {
        info!(
            serial = %reading.serial_number,
            battery = reading.battery_capacity,
            state = %reading.state,
            "Drone battery info: {reading}"
        );
    }
}

/// Totals of one completed sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    pub drones: usize,
    pub pages: usize,
}

/// Periodically walks the whole fleet page by page and reports every battery level.
///
/// Only ever reads through [`FleetStore::scan_projection`](dhub_store::FleetStore::scan_projection),
/// so it never contends with loads for drone leases.
#[derive(Debug, Clone)]
pub struct BatteryAuditor {
    store: SharedFleetStore,
    sink: Arc<dyn ReadingSink>,
    batch_size: NonZeroUsize,
    period: Duration,
}

impl BatteryAuditor {
    #[must_use]
    pub fn new(store: SharedFleetStore, config: &BatteryAuditConfig) -> Self {
        Self {
            store,
            sink: Arc::new(TracingSink),
            batch_size: config.batch_size,
            period: config.period(),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: impl ReadingSink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// One full pass over the fleet.
    ///
    /// Every drone present for the whole pass is reported exactly once.
    ///
    /// # Errors
    ///
    /// `Store` when a page cannot be read; readings of earlier pages were already recorded.
    pub async fn sweep(&self) -> Result<SweepReport, FleetError> {
        let mut report = SweepReport::default();
        let mut cursor: Option<Cursor> = None;

        loop {
            let page = self
                .store
                .scan_projection(cursor.as_ref(), self.batch_size)
                .await
                .context("scanning fleet for battery audit")?;

            report.pages += 1;
            report.drones += page.items.len();
            page.items.iter().for_each(|reading| self.sink.record(reading));

            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(report)
    }

    /// Starts sweeping on a fixed period, the first sweep right away.
    ///
    /// Ticks missed while a sweep runs long are skipped rather than bunched up. A failed
    /// sweep is logged and retried on the next tick.
    #[must_use = "dropping the handle stops the auditor"]
    pub fn spawn(self) -> AuditorHandle {
        let (stop, mut stopped) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(batch_size = self.batch_size.get(), period = ?self.period, "Battery auditor started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.run_once().await,
                    _ = stopped.changed() => break,
                }
            }

            info!("Battery auditor stopped");
        });

        AuditorHandle { stop, task }
    }

    async fn run_once(&self) {
        match self.sweep().await {
            Ok(report) => debug!(drones = report.drones, pages = report.pages, "Battery sweep done"),
            Err(err) => warn!(error = %err, kind = err.kind(), "Battery sweep failed"),
        }
    }
}

/// Running auditor. Dropping it stops the auditor after the current sweep.
#[derive(Debug)]
pub struct AuditorHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl AuditorHandle {
    /// Signals the auditor and waits for an in-flight sweep to finish.
    ///
    /// # Errors
    ///
    /// `Internal` if the auditor task panicked.
    pub async fn stop(self) -> Result<(), FleetError> {
        self.stop.send_replace(true);
        self.task.await.map_err(|err| FleetError::from(format!("Battery auditor task failed: {err}")))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
