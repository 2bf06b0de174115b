use crate::FleetInner;
use crate::error::{FleetError, FleetErrorExt};
use crate::state_machine::LOADABLE;
use dhub_domain::constants::LOW_BATTERY_LEVEL;
use dhub_domain::drone::Drone;

impl FleetInner {
    /// Drones that could accept a payload right now: `IDLE` with at least 25% battery.
    ///
    /// A plain read; a drone listed here may already be taken by the time it is loaded.
    ///
    /// # Errors
    ///
    /// `Store` when the listing fails.
    pub async fn available_for_loading(&self) -> Result<Vec<Drone>, FleetError> {
        let idle = self.store.find_by_state(LOADABLE).await.context("listing idle drones")?;

        Ok(idle.into_iter().filter(|d| d.battery_capacity >= LOW_BATTERY_LEVEL).collect())
    }
}
