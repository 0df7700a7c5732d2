use crate::config::Config;
use crate::render::PhotoLoader;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Photo loader holding the pooled HTTP client for remote photo references.
    pub photos: PhotoLoader,
}

impl AppState {
    /// Builds the state, including an HTTP client bounded by the configured
    /// fetch timeout.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.photo_fetch_timeout)
            .build()?;
        let photos = PhotoLoader::new(client, config.photo_max_bytes);
        Ok(Self { photos })
    }
}
