//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for DroneHub binaries:
//! a compact ANSI console layer, an optional rolling file appender with
//! non-blocking I/O, and an [`EnvFilter`] seeded from the configured level
//! and overridable through `RUST_LOG`.
//!
//! The `log` section of the server configuration maps onto the builder via
//! [`LoggerBuilder::config`].
//!
//! * Optional `profiling` adds the tokio-console layer and requires building
//!   with `--cfg tokio_unstable`.
//!
//! ## Example
//!
//! ```rust
//! # use dhub_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("dronehub")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use dhub_domain::config::LogConfig;
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerSettings {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// Configures and installs the global tracing subscriber.
///
/// A name is required before [`LoggerBuilder::init`] becomes available; it
/// prefixes rolling file names (`dronehub.2026-10-16.log`).
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    settings: LoggerSettings,
    name: N,
}

impl LoggerBuilder<NoName> {
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { settings: self.settings, name: WithName(name.into()) }
    }
}

impl<N: Sealed> LoggerBuilder<N> {
    /// Minimum level for targets without an explicit directive.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Programmatic filter directives (e.g. `dhub_fleet=debug,hyper=warn`).
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.settings.env_filter = Some(filter.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Directory for rolling log files; created on init when missing.
    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.settings.directory = Some(directory.into());
        self
    }

    /// Writes the file output as JSON lines. Console output stays compact.
    #[must_use]
    pub const fn json(mut self) -> Self {
        self.settings.json = true;
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    /// Applies the `log` configuration section.
    ///
    /// A `level` that is a plain level name becomes the default level; any
    /// other string is treated as a full filter directive list.
    #[must_use]
    pub fn config(mut self, config: &LogConfig) -> Self {
        match LevelFilter::from_str(config.level.trim()) {
            Ok(level) => self.settings.level = level,
            Err(_) => self.settings.env_filter = Some(config.level.clone()),
        }
        if let Some(directory) = &config.directory {
            self.settings.directory = Some(directory.clone());
        }
        self.settings.json = config.json;
        self
    }
}

impl LoggerBuilder<WithName> {
    /// Installs the subscriber.
    ///
    /// The returned [`Logger`] owns the file writer's [`WorkerGuard`] and must
    /// live until shutdown so buffered lines are flushed.
    ///
    /// # Errors
    /// [`LoggerError::Subscriber`] when a global subscriber already exists,
    /// [`LoggerError::InvalidConfiguration`] for bad directives or when no
    /// output is enabled, [`LoggerError::Directory`] or
    /// [`LoggerError::Appender`] when the log directory is unusable.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0;
        let settings = self.settings;
        validate(&settings, &name)?;

        let env_filter = build_env_filter(&settings)?;
        let mut layers = Vec::new();

        #[cfg(all(feature = "profiling", tokio_unstable))]
        if settings.console {
            layers.push(console_subscriber::spawn().boxed());
        }

        if settings.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &settings.directory {
            Some(directory) => {
                fs::create_dir_all(directory)
                    .context(format!("Failed to create {}", directory.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(settings.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(settings.max_files)
                    .build(directory)?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if settings.json { file_layer.json().boxed() } else { file_layer.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable the console or set a directory.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// Handle to the installed logging system.
///
/// Holds the background file writer; drop it only on shutdown.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: LoggerSettings::default(), name: NoName }
    }

    /// Whether a file writer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate(settings: &LoggerSettings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if settings.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(settings: &LoggerSettings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    settings.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_console_at_info() {
        let builder = Logger::builder().name("dronehub");
        assert!(builder.settings.console);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert!(builder.settings.directory.is_none());
        assert!(!builder.settings.json);
    }

    #[test]
    fn config_section_sets_level_directory_and_format() {
        let config = LogConfig {
            level: "debug".to_owned(),
            directory: Some(PathBuf::from("/var/log/dronehub")),
            json: true,
        };
        let builder = Logger::builder().name("dronehub").config(&config);

        assert_eq!(builder.settings.level, LevelFilter::DEBUG);
        assert_eq!(builder.settings.directory, config.directory);
        assert!(builder.settings.json);
        assert!(builder.settings.env_filter.is_none());
    }

    #[test]
    fn non_level_strings_become_filter_directives() {
        let config = LogConfig { level: "dhub_fleet=debug,warn".to_owned(), ..LogConfig::default() };
        let builder = Logger::builder().name("dronehub").config(&config);

        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert_eq!(builder.settings.env_filter.as_deref(), Some("dhub_fleet=debug,warn"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = validate(&LoggerSettings::default(), "  ").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn zero_retained_files_is_rejected() {
        let settings = LoggerSettings { max_files: 0, ..LoggerSettings::default() };
        assert!(validate(&settings, "dronehub").is_err());
    }

    #[test]
    fn malformed_directive_is_reported() {
        let settings =
            LoggerSettings { env_filter: Some("dhub=loud".to_owned()), ..LoggerSettings::default() };
        let err = build_env_filter(&settings).unwrap_err();
        assert!(err.to_string().starts_with("Invalid logger configuration: Invalid filter 'dhub=loud'"));
    }
}
