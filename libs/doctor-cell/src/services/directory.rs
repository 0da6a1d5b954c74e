use reqwest::Method;
use tracing::debug;

use shared_api::{ApiError, SchedulerClient};
use shared_config::AppConfig;

use crate::models::Doctor;

pub struct DirectoryService {
    scheduler: SchedulerClient,
}

impl DirectoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            scheduler: SchedulerClient::new(config),
        }
    }

    /// Fetch the full doctor list. Issued once when the directory activates;
    /// a failure is surfaced to the user and not retried.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        debug!("Fetching doctor directory");

        let doctors: Vec<Doctor> = self
            .scheduler
            .request(Method::GET, "/api/doctors", None)
            .await?;

        debug!("Doctor directory loaded with {} entries", doctors.len());
        Ok(doctors)
    }
}
