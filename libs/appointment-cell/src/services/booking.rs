use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use shared_api::{ApiError, SchedulerClient};
use shared_config::AppConfig;

use crate::models::{BookAppointmentRequest, BookingError, BookingRejection, TimeSlot};

pub struct BookingService {
    scheduler: SchedulerClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            scheduler: SchedulerClient::new(config),
        }
    }

    /// Fetch the open slots for one doctor on one date. Returned verbatim:
    /// no client-side sorting or filtering.
    pub async fn available_slots(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, ApiError> {
        debug!("Fetching available slots for doctor {} on {}", doctor_id, date);

        let path = format!(
            "/api/doctors/available-slots?doctorId={}&date={}",
            doctor_id,
            date.format("%Y-%m-%d")
        );
        self.scheduler.request(Method::GET, &path, None).await
    }

    /// Submit one booking. The confirmation payload is opaque to this client;
    /// a rejection is classified into conflict-with-alternative or generic.
    pub async fn book_appointment(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<(), BookingError> {
        info!(
            "Booking appointment with doctor {} on {} at {}",
            request.doctor_id, request.date, request.start_time
        );

        let body = serde_json::to_value(request).map_err(ApiError::from)?;
        let result: Result<Value, ApiError> = self
            .scheduler
            .request(Method::POST, "/api/appointments", Some(body))
            .await;

        match result {
            Ok(_confirmation) => Ok(()),
            Err(ApiError::Status { status, body }) => {
                warn!("Booking rejected ({}): {}", status, body);
                Err(Self::classify_rejection(status, body))
            }
            Err(other) => Err(BookingError::Api(other)),
        }
    }

    fn classify_rejection(status: reqwest::StatusCode, body: String) -> BookingError {
        if let Ok(rejection) = serde_json::from_str::<BookingRejection>(&body) {
            if let Some(suggested) = rejection.suggested_slot {
                return BookingError::Conflict { suggested };
            }
            if let Some(message) = rejection.message {
                return BookingError::Rejected { message };
            }
        }
        BookingError::Api(ApiError::Status { status, body })
    }
}
