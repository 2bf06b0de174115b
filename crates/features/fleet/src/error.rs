use dhub_domain::drone::State;
use dhub_kernel::validation::Violations;
use dhub_store::StoreError;
use std::borrow::Cow;

/// Every way a fleet operation can fail.
///
/// The first six variants are business outcomes reported back to the caller;
/// `Store` and `Internal` are infrastructure failures.
#[dhub_derive::dhub_error]
pub enum FleetError {
    #[error("Medications list is empty")]
    EmptyPayload,

    #[error("Can't find drone with serial number: {serial}")]
    NotFound { serial: String },

    #[error("Can't load drone in state: {current}, it should be {required}")]
    InvalidState { current: State, required: State },

    #[error("Can't load drone when it's battery level below {threshold}, actual level: {actual}")]
    LowBattery { threshold: u8, actual: u8 },

    #[error("Drone can't be loaded with weight: {sum}gr, it can carry only: {limit}")]
    OverWeight { sum: u64, limit: u16 },

    #[error("Entity with such key already exists : drone with serial number {serial}")]
    DuplicateKey { serial: String },

    #[error("Request is not valid: {violations}")]
    MalformedInput { violations: Violations },

    #[error("Fleet store failure{}: {source}", format_context(.context))]
    Store { source: StoreError, context: Option<Cow<'static, str>> },

    #[error("Internal fleet error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl FleetError {
    pub(crate) fn not_found(serial: &str) -> Self {
        Self::NotFound { serial: serial.to_owned() }
    }

    /// Business rule outcome rather than a broken request or infrastructure.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyPayload
                | Self::NotFound { .. }
                | Self::InvalidState { .. }
                | Self::LowBattery { .. }
                | Self::OverWeight { .. }
        )
    }

    /// Caller sent something that can never succeed as is.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. } | Self::MalformedInput { .. })
    }
}

impl From<Violations> for FleetError {
    fn from(violations: Violations) -> Self {
        Self::MalformedInput { violations }
    }
}
