//! Report types produced by the aggregation pipeline.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::analyzers::utility::ValueCount;
use crate::error::StatError;

pub type StatResult<T> = Result<T, StatError>;

/// Writes a successful statistic as its value and a failed one as an
/// `{"error": ...}` object.
pub fn serialize_stat<T, S>(stat: &StatResult<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match stat {
        Ok(value) => value.serialize(serializer),
        Err(StatError::NoData) => {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("error", "no_data")?;
            map.end()
        }
        Err(StatError::Unavailable { column }) => {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry("error", "unavailable")?;
            map.serialize_entry("column", column)?;
            map.end()
        }
    }
}

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Most frequent times of travel.
#[derive(Debug, Serialize)]
pub struct TimeStats {
    #[serde(serialize_with = "serialize_stat")]
    pub month: StatResult<u32>,
    #[serde(serialize_with = "serialize_stat")]
    pub weekday: StatResult<&'static str>,
    #[serde(serialize_with = "serialize_stat")]
    pub hour: StatResult<u32>,
}

/// Most popular stations and trip.
#[derive(Debug, Serialize)]
pub struct StationStats {
    #[serde(serialize_with = "serialize_stat")]
    pub start_station: StatResult<String>,
    #[serde(serialize_with = "serialize_stat")]
    pub end_station: StatResult<String>,
    #[serde(serialize_with = "serialize_stat")]
    pub trip: StatResult<String>,
}

/// Total and mean travel time, in seconds.
#[derive(Debug, Serialize)]
pub struct DurationStats {
    #[serde(serialize_with = "serialize_stat")]
    pub total_secs: StatResult<f64>,
    #[serde(serialize_with = "serialize_stat")]
    pub mean_secs: StatResult<f64>,
}

/// Rider demographics.
#[derive(Debug, Serialize)]
pub struct UserStats {
    #[serde(serialize_with = "serialize_stat")]
    pub user_types: StatResult<Vec<ValueCount>>,
    #[serde(serialize_with = "serialize_stat")]
    pub genders: StatResult<Vec<ValueCount>>,
    #[serde(serialize_with = "serialize_stat")]
    pub birth_years: StatResult<BirthYearStats>,
}

/// A report section together with how long it took to compute.
#[derive(Debug, Serialize)]
pub struct Timed<T> {
    #[serde(flatten)]
    pub stats: T,
    pub elapsed_secs: f64,
}

/// The four report sections for one (possibly filtered) table.
#[derive(Debug, Serialize)]
pub struct TripReport {
    pub rows: usize,
    pub time: Timed<TimeStats>,
    pub stations: Timed<StationStats>,
    pub durations: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}
