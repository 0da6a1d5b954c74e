use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::time_of_day;

/// One bookable interval on a specific date, exactly as the scheduling
/// service returned it. The client never computes slot boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "time_of_day")]
    pub start: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end: NaiveTime,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(shared_models::time::TIME_OF_DAY_FORMAT),
            self.end.format(shared_models::time::TIME_OF_DAY_FORMAT)
        )
    }
}

/// Body of `POST /api/appointments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub doctor_id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end_time: NaiveTime,
}

/// Error payload of a failed booking. A rejection carrying `suggestedSlot`
/// is a conflict with a proposed alternative; anything else is generic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRejection {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub suggested_slot: Option<TimeSlot>,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Slot already booked. Next available slot: {suggested}")]
    Conflict { suggested: TimeSlot },

    #[error("{message}")]
    Rejected { message: String },

    #[error(transparent)]
    Api(#[from] shared_api::ApiError),
}
