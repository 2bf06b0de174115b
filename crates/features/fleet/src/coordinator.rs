use crate::error::{FleetError, FleetErrorExt};
use crate::state_machine::load_transition;
use crate::{Fleet, FleetInner};
use dhub_domain::constants::LOW_BATTERY_LEVEL;
use dhub_domain::drone::{Drone, Medication, total_weight};
use tracing::{info, instrument};

impl FleetInner {
    /// Puts `medications` on board of drone `serial` and marks it `LOADED`.
    ///
    /// Checks run in a fixed order and the first failure wins: empty payload, unknown
    /// drone, state, battery, weight. Everything after the empty check happens under
    /// the drone's exclusive lease, which is released on every exit path. The payload
    /// replaces whatever was on board before.
    ///
    /// # Errors
    ///
    /// The matching business [`FleetError`], or `Store` when the lease or the write fails.
    #[instrument(name = "load_drone", skip(self, medications), fields(items = medications.len()))]
    pub async fn load(&self, serial: &str, medications: Vec<Medication>) -> Result<Drone, FleetError> {
        if medications.is_empty() {
            return Err(FleetError::EmptyPayload);
        }

        let (mut drone, guard) = self
            .store
            .find_for_update(serial)
            .await
            .context("leasing drone for load")?
            .ok_or_else(|| FleetError::not_found(serial))?
            .into_parts();

        let next = load_transition(drone.state)?;

        if drone.battery_capacity < LOW_BATTERY_LEVEL {
            return Err(FleetError::LowBattery {
                threshold: LOW_BATTERY_LEVEL,
                actual: drone.battery_capacity,
            });
        }

        let sum = total_weight(&medications);
        if sum > u64::from(drone.weight_limit) {
            return Err(FleetError::OverWeight { sum, limit: drone.weight_limit });
        }

        drone.medications = medications;
        drone.state = next;
        self.store.upsert(drone.clone()).await.context("persisting loaded drone")?;
        drop(guard);

        info!(serial, weight = sum, "Drone loaded");
        Ok(drone)
    }
}

impl Fleet {
    /// [`FleetInner::load`] on its own task.
    ///
    /// The returned future may be dropped (for example by a disconnecting client)
    /// without cutting the transaction short: the spawned task runs to completion and
    /// releases the lease itself.
    ///
    /// # Errors
    ///
    /// As [`FleetInner::load`], plus `Internal` if the task panicked.
    pub async fn load_detached(
        &self,
        serial: String,
        medications: Vec<Medication>,
    ) -> Result<Drone, FleetError> {
        let fleet = self.clone();
        tokio::spawn(async move { fleet.load(&serial, medications).await })
            .await
            .map_err(|err| FleetError::from(format!("Load task failed: {err}")))?
    }
}
