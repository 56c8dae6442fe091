//! Oquga web server.
//!
//! Reads configuration from TOML (`OQUGA_CONFIG`, else
//! `~/.config/oquga-web/config.toml`) and serves the configured site.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use oquga_web::config::{config_path_from_env, AppConfig, LoggingConfig};
use oquga_web::ServerHandle;

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = config_path_from_env();
    let (config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    let config = config.with_env();

    init_logging(&config.logging);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    // ── Serve ──────────────────────────────────────────────────
    let handle = ServerHandle::start(config).await?;
    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");
    handle.wait().await;
    Ok(())
}
