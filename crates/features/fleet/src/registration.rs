use crate::FleetInner;
use crate::dto::RegisterDroneRequest;
use crate::error::{FleetError, FleetErrorExt};
use dhub_domain::drone::{Drone, Medication};
use dhub_store::StoreError;
use tracing::{info, instrument};

impl FleetInner {
    /// Adds a new `IDLE` drone with nothing on board.
    ///
    /// # Errors
    ///
    /// * `MalformedInput` when a field is missing or out of range.
    /// * `DuplicateKey` when the serial number is taken; the stored drone is left as is.
    #[instrument(name = "register_drone", skip_all, fields(serial = request.serial_number.as_deref()))]
    pub async fn register(&self, request: RegisterDroneRequest) -> Result<Drone, FleetError> {
        let drone = request.into_drone()?;

        match self.store.insert(drone.clone()).await {
            Ok(()) => {
                info!(model = %drone.model, "Drone registered");
                Ok(drone)
            },
            Err(StoreError::Conflict { serial, .. }) => Err(FleetError::DuplicateKey { serial }),
            Err(err) => Err(err).context("registering drone"),
        }
    }

    /// What drone `serial` currently carries.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown serial.
    pub async fn medications_of(&self, serial: &str) -> Result<Vec<Medication>, FleetError> {
        Ok(self.lookup(serial).await?.medications)
    }

    /// Battery level of drone `serial`, in percent.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown serial.
    pub async fn battery_of(&self, serial: &str) -> Result<u8, FleetError> {
        Ok(self.lookup(serial).await?.battery_capacity)
    }

    async fn lookup(&self, serial: &str) -> Result<Drone, FleetError> {
        self.store
            .find_by_serial(serial)
            .await
            .context("reading drone")?
            .ok_or_else(|| FleetError::not_found(serial))
    }
}
