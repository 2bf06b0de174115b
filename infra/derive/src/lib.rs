#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every `DroneHub` crate.
//!
//! * [`macro@dhub_error`] turns an enum into the workspace error type shape.
//! * [`macro@dhub_slice`] wraps feature state into a cheaply clonable slice handle.
//! * [`macro@api_model`] / [`macro@api_handler`] keep the HTTP surface consistent.
//! * [`macro@main`] boots the tokio runtime with a named profile.
//!
//! Examples are `ignore`d because they reference crates that depend on this one.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the tokio runtime from `dhub-runtime`.
///
/// Transforms an `async fn main` into a plain `fn main` that builds the runtime for the
/// requested profile and blocks on the body.
///
/// # Arguments
///
/// * `high_performance` - Server profile (all cores, larger stacks).
/// * `memory_efficient` - Half the workers, smaller stacks.
/// * `default` - Auto-detected workers with default stacks.
///
/// # Examples
///
/// ```rust,ignore
/// #[dhub_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro to define an API data model (request or response body).
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate enables `server`.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` by default.
///
/// # Arguments
///
/// * `rename_all = "..."` - Overrides the default rename policy.
/// * `deny_unknown_fields = false` - Accepts unknown fields.
///
/// # Example
///
/// ```rust,ignore
/// #[dhub_derive::api_model]
/// pub struct BatteryLevel {
///     pub serial_number: String,
///     pub battery_capacity: u8,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro bridging axum handlers with `OpenAPI` documentation.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `path = "..."`, `responses(...)`,
/// `tag = ...`) and applies them only when the consuming crate enables `server`.
///
/// # Example
///
/// ```rust,ignore
/// #[dhub_derive::api_handler(
///     get,
///     path = "/drone/available",
///     responses((status = OK, body = Envelope)),
///     tag = FLEET_TAG
/// )]
/// pub async fn available_handler() -> ApiResponse {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field.
/// * **Internal Fallback**: `From<&'static str>` / `From<String>` when an `Internal`
///   variant is present.
/// * **Kind**: A `kind()` accessor returning the variant name, meant for structured logs.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants use named fields or no fields at all; tuple variants are rejected.
/// 3. Variants with a `source` field must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[dhub_derive::dhub_error]
/// pub enum StoreError {
///     #[error("Drone already exists{}: {serial}", format_context(.context))]
///     Conflict { serial: String, context: Option<Cow<'static, str>> },
///
///     #[error("Lock wait exceeded")]
///     LockTimeout,
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// assert_eq!(StoreError::LockTimeout.kind(), "LockTimeout");
/// ```
#[proc_macro_attribute]
pub fn dhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// 1. Renames the annotated struct to `<Name>Inner`.
/// 2. Generates `<Name>` as an `Arc` wrapper with `Deref` to the inner state.
/// 3. Implements `FeatureSlice` so the slice can be registered in the API state.
///
/// # Example
/// ```rust,ignore
/// #[dhub_derive::dhub_slice]
/// pub struct Fleet {
///     store: SharedFleetStore,
/// }
///
/// let fleet = Fleet::new(FleetInner { store });
/// ```
#[proc_macro_attribute]
pub fn dhub_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
