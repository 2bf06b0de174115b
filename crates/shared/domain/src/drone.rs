//! Fleet records: drones, the medications they carry, and the scan projection.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Weight class of a drone.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Model {
    Lightweight,
    Middleweight,
    Cruiserweight,
    Heavyweight,
}

/// Drone lifecycle tag.
///
/// Only `Idle -> Loaded` is driven by this system. The remaining values belong to
/// delivery lifecycles handled elsewhere and simply make a drone ineligible for loading.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    Loading,
    Loaded,
    Delivering,
    Delivered,
    Returning,
}

/// A medication carried by a drone. Owned by the drone, no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    /// Grams.
    pub weight: u32,
    pub code: String,
    /// URL of the medication image.
    pub image: String,
}

/// A drone record as kept by the fleet store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drone {
    pub serial_number: String,
    pub model: Model,
    /// Grams, `0..=500`.
    pub weight_limit: u16,
    /// Percent, `0..=100`.
    pub battery_capacity: u8,
    pub state: State,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

impl Drone {
    /// A freshly registered drone: `IDLE`, nothing on board.
    #[must_use]
    pub fn new(
        serial_number: impl Into<String>,
        model: Model,
        weight_limit: u16,
        battery_capacity: u8,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            model,
            weight_limit,
            battery_capacity,
            state: State::Idle,
            medications: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_medications(mut self, medications: Vec<Medication>) -> Self {
        self.medications = medications;
        self
    }

    /// Summed weight of everything currently on board.
    #[must_use]
    pub fn payload_weight(&self) -> u64 {
        total_weight(&self.medications)
    }

    #[must_use]
    pub fn projection(&self) -> DroneProjection {
        DroneProjection {
            serial_number: self.serial_number.clone(),
            battery_capacity: self.battery_capacity,
            state: self.state,
        }
    }
}

/// Summed weight of a payload. Computed in `u64` so it cannot overflow.
#[must_use]
pub fn total_weight(medications: &[Medication]) -> u64 {
    medications.iter().map(|m| u64::from(m.weight)).sum()
}

/// Lightweight per-drone view returned by fleet scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneProjection {
    pub serial_number: String,
    pub battery_capacity: u8,
    pub state: State,
}

impl fmt::Display for DroneProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DroneProjection(serialNumber={}, batteryCapacity={}, state={})",
            self.serial_number, self.battery_capacity, self.state
        )
    }
}
