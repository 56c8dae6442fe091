use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::application::Catalog;
use crate::config::AppConfig;
use crate::domain::{Locale, SiteKind};
use crate::infrastructure::ImagePolicy;
use crate::shared::{ApiError, AppError};

/// Shared, read-only state of the web tier.
#[derive(Clone)]
pub struct AppState {
    pub site: SiteKind,
    pub default_locale: Locale,
    pub backend_url: String,
    pub secure_cookies: bool,
    pub cache_ttl_secs: u64,
    pub catalog: Arc<Catalog>,
    pub images: Arc<ImagePolicy>,
    /// Connection pool shared by every per-request API client.
    pub http: reqwest::Client,
    pub started_at: Instant,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let catalog = Catalog::load(config.site.kind, config.site.messages_dir.as_deref().map(Path::new))?;
        let http = reqwest::Client::builder()
            .timeout(config.backend.timeout())
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            site: config.site.kind,
            default_locale: config.site.default_locale,
            backend_url: config.backend.base_url.clone(),
            secure_cookies: config.security.secure_cookies,
            cache_ttl_secs: config.images.cache_ttl_secs,
            catalog: Arc::new(catalog),
            images: Arc::new(ImagePolicy::new(&config.images.allowed_hosts)),
            http,
            started_at: Instant::now(),
        })
    }
}
