use std::borrow::Cow;

/// A specialized [`StoreError`] enum of this crate.
#[dhub_derive::dhub_error]
pub enum StoreError {
    #[error("Drone already exists{}: {serial}", format_context(.context))]
    Conflict { serial: String, context: Option<Cow<'static, str>> },

    #[error("Timed out waiting for drone lock{}: {serial}", format_context(.context))]
    LockTimeout { serial: String, context: Option<Cow<'static, str>> },

    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
