use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::num::{NonZeroU64, NonZeroUsize};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub audit: AuditConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Background audits.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub battery: BatteryAuditConfig,
}

/// Fleet battery sweep. Both values must be positive; zero is rejected while parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatteryAuditConfig {
    /// Drones fetched per page.
    pub batch_size: NonZeroUsize,
    /// Sweep period in milliseconds.
    pub period_ms: NonZeroU64,
}

impl BatteryAuditConfig {
    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms.get())
    }
}

/// Fleet store knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Upper bound for waiting on a drone's exclusive lock, in milliseconds.
    pub lock_timeout_ms: NonZeroU64,
}

impl StoreConfig {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms.get())
    }
}

/// Logging output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level directive (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Rolling log file directory; console only when absent.
    pub directory: Option<PathBuf>,
    /// JSON lines for the file output.
    pub json: bool,
}

// --- Default ---

const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();
const DEFAULT_PERIOD_MS: NonZeroU64 = NonZeroU64::new(60_000).unwrap();
const DEFAULT_LOCK_TIMEOUT_MS: NonZeroU64 = NonZeroU64::new(5_000).unwrap();

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for BatteryAuditConfig {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE, period_ms: DEFAULT_PERIOD_MS }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}
