//! Wire models of the fleet API.
//!
//! Request fields are optional (numerics also signed) so that missing, `null` and
//! negative values surface as field violations instead of parse failures. Requests
//! ignore fields they do not know, so a returned drone record can be sent back as is.

use dhub_derive::api_model;
use dhub_domain::drone::{Drone, Medication, Model, State};

/// Body of `PUT /drone/register`.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq, Default)]
pub struct RegisterDroneRequest {
    /// Unique drone identifier, at most 100 characters
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, example = "Lightweight"))]
    pub model: Option<Model>,
    /// Grams, `0..=500`
    #[serde(default)]
    pub weight_limit: Option<i32>,
    /// Percent, `0..=100`
    #[serde(default)]
    pub battery_capacity: Option<i32>,
}

impl RegisterDroneRequest {
    #[must_use]
    pub fn new(serial_number: impl Into<String>, model: Model, weight_limit: i32, battery_capacity: i32) -> Self {
        Self {
            serial_number: Some(serial_number.into()),
            model: Some(model),
            weight_limit: Some(weight_limit),
            battery_capacity: Some(battery_capacity),
        }
    }
}

/// One medication in a load request.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq, Default)]
pub struct MedicationDto {
    /// Letters, numbers, `-` and `_`
    #[serde(default)]
    pub name: Option<String>,
    /// Grams
    #[serde(default)]
    pub weight: Option<i32>,
    /// Upper case letters, numbers and `_`
    #[serde(default)]
    pub code: Option<String>,
    /// Absolute image URL
    #[serde(default)]
    pub image: Option<String>,
}

impl MedicationDto {
    #[must_use]
    pub fn new(name: impl Into<String>, weight: i32, code: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            weight: Some(weight),
            code: Some(code.into()),
            image: Some(image.into()),
        }
    }
}

/// Body of `POST /drone/{serial}/load`.
///
/// A missing or `null` list reads as empty and is rejected by the coordinator.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq, Default)]
pub struct LoadRequest {
    #[serde(default)]
    pub medications: Option<Vec<MedicationDto>>,
}

impl LoadRequest {
    #[must_use]
    pub const fn new(medications: Vec<MedicationDto>) -> Self {
        Self { medications: Some(medications) }
    }
}

/// Drone record as returned by the API.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct DroneView {
    pub serial_number: String,
    #[cfg_attr(feature = "server", schema(value_type = String, example = "Lightweight"))]
    pub model: Model,
    pub weight_limit: u16,
    pub battery_capacity: u8,
    #[cfg_attr(feature = "server", schema(value_type = String, example = "IDLE"))]
    pub state: State,
}

/// Medication as returned by the API.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct MedicationView {
    pub name: String,
    pub weight: u32,
    pub code: String,
    pub image: String,
}

impl From<&Drone> for DroneView {
    fn from(drone: &Drone) -> Self {
        Self {
            serial_number: drone.serial_number.clone(),
            model: drone.model,
            weight_limit: drone.weight_limit,
            battery_capacity: drone.battery_capacity,
            state: drone.state,
        }
    }
}

impl From<Medication> for MedicationView {
    fn from(m: Medication) -> Self {
        Self { name: m.name, weight: m.weight, code: m.code, image: m.image }
    }
}
