use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use shared_models::time::format_time_of_day;
use shared_models::time_of_day;

/// The daily window during which a doctor accepts appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(with = "time_of_day")]
    pub start: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end: NaiveTime,
}

/// A sub-interval of the working hours on one weekday during which the
/// service offers no slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPeriod {
    pub day: String,
    #[serde(with = "time_of_day")]
    pub start: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end: NaiveTime,
}

/// A doctor as the scheduling service reports it. Immutable on this side:
/// fetched wholesale, never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub working_days: Vec<String>,
    pub working_hours: WorkingHours,
    pub slot_duration: i32,
    #[serde(default)]
    pub breaks: Vec<BreakPeriod>,
}

impl Doctor {
    /// One-line working-hours summary, e.g. `09:00 - 17:00`.
    pub fn hours_summary(&self) -> String {
        format!(
            "{} - {}",
            format_time_of_day(self.working_hours.start),
            format_time_of_day(self.working_hours.end)
        )
    }

    /// Three-letter badges for the directory listing, e.g. `Mon Tue Thu`.
    pub fn day_badges(&self) -> Vec<&str> {
        self.working_days
            .iter()
            .map(|day| {
                let cut = day
                    .char_indices()
                    .nth(3)
                    .map(|(idx, _)| idx)
                    .unwrap_or(day.len());
                &day[..cut]
            })
            .collect()
    }
}
