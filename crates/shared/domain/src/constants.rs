//! Shared constants used by more than one crate.

/// Minimum battery level (percent) a drone needs before it may be loaded.
pub const LOW_BATTERY_LEVEL: u8 = 25;

/// Upper bound of a drone's weight limit, in grams.
pub const MAX_WEIGHT_LIMIT: u16 = 500;

/// Upper bound of a battery level, in percent.
pub const MAX_BATTERY_CAPACITY: u8 = 100;

/// Maximum length of a serial number, in characters.
pub const MAX_SERIAL_LENGTH: usize = 100;

/// `OpenAPI` tag for system endpoints (health, docs).
pub const SYSTEM_TAG: &str = "System";

/// `OpenAPI` tag for fleet endpoints.
pub const FLEET_TAG: &str = "Fleet";
