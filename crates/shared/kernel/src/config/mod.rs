use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DHUB";

const DEFAULT_CONFIG_FILE: &str = "server";

/// Custom error type for config loading.
#[dhub_derive::dhub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: file settings with environment overrides on top.
///
/// 1. **Base File**: `path` when given (must exist), otherwise an optional `server.*` file
///    in the working directory. The format follows the extension (`toml`, `yaml`, `json`).
/// 2. **Environment Overrides**: variables prefixed with `DHUB__`. Nested keys use double
///    underscores, e.g. `DHUB__AUDIT__BATTERY__BATCH_SIZE` maps to `audit.battery.batch_size`.
///
/// Fields missing from every source fall back to the target type's serde defaults.
///
/// # Errors
///
/// * An explicitly given file does not exist or cannot be parsed.
/// * The merged values do not match the structure of `T` (including zero values for
///   `NonZero` fields).
///
/// # Example
/// ```rust
/// use dhub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (effective_path, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
