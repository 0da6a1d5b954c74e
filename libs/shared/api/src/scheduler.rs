use reqwest::{header::CONTENT_TYPE, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Errors surfaced by the scheduling service client.
///
/// `Status` keeps the raw response body: booking rejections carry their
/// conflict payload there and callers classify it themselves.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to scheduling service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("scheduling service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode scheduling service response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin HTTP wrapper around the remote scheduling service.
///
/// All slot computation and conflict resolution happens on the other side of
/// this client; the cells only issue reads and one write through it.
pub struct SchedulerClient {
    client: Client,
    base_url: String,
}

impl SchedulerClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.scheduler_api_base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Scheduling service error ({}): {}", status, body);
            return Err(ApiError::Status { status, body });
        }

        let raw = response.text().await?;
        let data = serde_json::from_str(&raw)?;
        Ok(data)
    }
}
