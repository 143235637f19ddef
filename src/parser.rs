//! Row-level parsing for bike-share CSV files.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::table::TripRecord;

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must have.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    START_TIME,
    START_STATION,
    END_STATION,
    TRIP_DURATION,
    USER_TYPE,
];

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One CSV row, keyed by the dataset's own header names.
#[derive(Debug, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type")]
    pub user_type: String,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    /// Stored as a float in the source files, e.g. `1989.0`.
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

impl RawTrip {
    /// Converts to a [`TripRecord`], returning the raw start time on failure.
    pub fn into_record(self, id: Option<String>) -> Result<TripRecord, String> {
        let Some(start) = parse_timestamp(&self.start_time) else {
            return Err(self.start_time);
        };

        let mut record = TripRecord::new(
            start,
            self.trip_duration,
            self.start_station,
            self.end_station,
            self.user_type,
        );
        record.id = id.filter(|s| !s.is_empty());
        record.end_time = self.end_time.filter(|s| !s.is_empty());
        record.gender = self.gender.filter(|s| !s.trim().is_empty());
        record.birth_year = self
            .birth_year
            .filter(|y| y.is_finite())
            .map(|y| y.trunc() as i32);

        Ok(record)
    }
}

/// Parses a start/end timestamp in any of the layouts seen in the datasets.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}
