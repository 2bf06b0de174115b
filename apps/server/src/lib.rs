//! # DroneHub Server
//!
//! HTTP front of the fleet loading engine: an `Axum` router over the fleet slice,
//! the OpenAPI reference at `/api`, and the background battery auditor running for
//! the lifetime of the listener.
//!
//! ## Example
//! ```no_run
//! use dhub_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder().port(4583).build()?.run().await
//! }
//! ```

mod router;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use axum_server::Handle;
use dhub::domain::config::ApiConfig;
use dhub::features::fleet::BatteryAuditor;
use dhub::kernel::server::ApiState;
use dhub::store::SharedFleetStore;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Fluent builder for [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
    store: Option<SharedFleetStore>,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Serves an existing fleet store instead of opening one from `store` config.
    pub fn store(mut self, store: SharedFleetStore) -> Self {
        self.store = Some(store);
        self
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Wires the store, the feature slices and the battery auditor.
    ///
    /// # Errors
    /// * The configured SSL certificate or key is missing.
    /// * A feature slice fails to initialize.
    pub fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let store = self.store.unwrap_or_else(|| dhub::open_store(&self.cfg));
        let slices = dhub::init(&store).map_err(|e| anyhow!("Failed to initialize features: {e}"))?;
        let names: Vec<_> = slices.iter().map(|s| s.name).collect();
        info!(slices = ?names, "Feature slices initialized");

        let auditor = BatteryAuditor::new(store.clone(), &self.cfg.audit.battery);

        let state = ApiState::builder()
            .config(self.cfg)
            .store(store)
            .register_slices(slices)
            .build()
            .context("Failed to build application state")?;

        Ok(Server { state, auditor })
    }
}

/// A wired server, ready to [`run`](Server::run).
#[derive(Debug)]
pub struct Server {
    state: ApiState,
    auditor: BatteryAuditor,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The full HTTP surface, without binding a socket.
    #[must_use]
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Serves until SIGINT or SIGTERM, then drains connections and stops the auditor.
    ///
    /// # Errors
    /// Binding fails, or the TLS material cannot be loaded.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);
        let app = self.router();

        let auditor = self.auditor.spawn();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(GRACE_PERIOD));
        });

        let served = if let Some(ssl) = &cfg.server.ssl {
            info!("Starting HTTPS server on https://{address}");
            let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                .await
                .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")
        } else {
            info!("Starting HTTP server on http://{address}");
            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")
        };

        if let Err(e) = auditor.stop().await {
            warn!(error = %e, "Battery auditor did not stop cleanly");
        }

        served?;
        info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res?,
        res = terminate => res?,
    }

    Ok(())
}
