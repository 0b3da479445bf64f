use std::path::Path;

use anyhow::bail;

/// API credential and channel identity for the fetch subcommand.
///
/// Constructed once at startup and passed into the fetcher; the fetcher
/// itself never reads the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub channel_id: String,
}

impl ApiConfig {
    /// Validate that both settings are present and non-empty.
    pub fn new(api_key: Option<String>, channel_id: Option<String>) -> anyhow::Result<Self> {
        let api_key = api_key.unwrap_or_default();
        if api_key.trim().is_empty() {
            bail!("GOOGLE_API_KEY not set in .env or environment");
        }
        let channel_id = channel_id.unwrap_or_default();
        if channel_id.trim().is_empty() {
            bail!("CHANNEL_ID not set in .env or environment");
        }
        Ok(Self {
            api_key,
            channel_id,
        })
    }

    /// Load the env file if present, then read both settings from the
    /// environment. A missing env file is only a warning, matching the
    /// behavior of running outside a checkout with the variables exported.
    pub fn from_env(env_file: &Path) -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::from_path(env_file) {
            eprintln!("Warning: could not load {}: {}", env_file.display(), e);
        }
        Self::new(
            std::env::var("GOOGLE_API_KEY").ok(),
            std::env::var("CHANNEL_ID").ok(),
        )
    }
}
