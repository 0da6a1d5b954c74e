use chrono::NaiveTime;

/// Wire format for times of day. The scheduling service speaks `"HH:mm"`
/// everywhere: working hours, breaks, slot boundaries, booking bodies.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Render a time the way the service (and the user) expects it, e.g. `09:30`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_OF_DAY_FORMAT).to_string()
}

/// Serde codec for `"HH:mm"` fields. Use with `#[serde(with = "time_of_day")]`.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_OF_DAY_FORMAT;

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(TIME_OF_DAY_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, TIME_OF_DAY_FORMAT).map_err(serde::de::Error::custom)
    }
}
