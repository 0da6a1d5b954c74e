use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scheduler_api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            scheduler_api_base_url: env::var("SCHEDULER_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("SCHEDULER_API_BASE_URL not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.scheduler_api_base_url.is_empty()
    }
}
