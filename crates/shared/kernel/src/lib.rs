//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading, request validation and, behind the
//! `server` feature, the API state and the uniform response envelope.
//!
//! ## Validation
//! ```rust
//! use dhub_kernel::validation::{Validate, Violations};
//!
//! struct Probe(u8);
//!
//! impl Validate for Probe {
//!     fn validate(&self) -> Result<(), Violations> {
//!         let mut violations = Violations::new();
//!         if self.0 > 100 {
//!             violations.push("level", "Level should be in percentage");
//!         }
//!         violations.into_result()
//!     }
//! }
//!
//! let err = Probe(120).validate().unwrap_err();
//! assert_eq!(err.to_string(), "level: Level should be in percentage; ");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use dhub_kernel::config::load_config;
//! use dhub_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(None::<&str>)?;
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;
pub mod validation;

pub use dhub_domain as domain;
pub use dhub_store as store;
