//! Web server runtime.
//!
//! [`ServerHandle`] owns the listening socket, the serving task and the
//! shutdown coordinator. The binary and the integration tests both start
//! the site through it.

use std::net::SocketAddr;

use tracing::{error, info};

use crate::config::AppConfig;
use crate::interfaces::http::{create_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Handle to a running site.
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address actually bound (the configured port may be 0).
    pub local_addr: SocketAddr,

    shutdown: ShutdownCoordinator,
    task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Load message bundles, build the router and start serving.
    pub async fn start(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        info!(site = %config.site.kind, backend = %config.backend.base_url, "Starting Oquga web...");

        let state = AppState::from_config(&config)?;
        let router = create_router(state);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("🚀 {} site listening on http://{}", config.site.kind, local_addr);

        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 HTTP server received shutdown signal");
        });

        let task = tokio::spawn(async move {
            if let Err(e) = server.await {
                error!("HTTP server error: {}", e);
            }
        });

        Ok(Self {
            config,
            local_addr,
            shutdown,
            task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until the server stops. In-flight requests get the configured
    /// drain timeout once shutdown has been triggered.
    pub async fn wait(self) {
        let Self { shutdown, task, .. } = self;
        let signal = shutdown.signal();
        let mut task = task;

        tokio::select! {
            result = &mut task => {
                if let Err(e) = result {
                    error!("HTTP server task panicked: {}", e);
                }
                return;
            }
            _ = signal.wait() => {}
        }

        info!("⏳ Waiting for in-flight requests...");
        let drained = shutdown
            .drain(async {
                if let Err(e) = (&mut task).await {
                    error!("HTTP server task panicked: {}", e);
                }
            })
            .await;
        if !drained {
            task.abort();
        }
        info!("👋 Oquga web shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
