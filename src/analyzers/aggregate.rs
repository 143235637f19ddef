//! Individual statistics over a trip table.
//!
//! Every query is independent: an empty table yields [`StatError::NoData`]
//! and a missing optional column yields [`StatError::Unavailable`], neither
//! of which affects the other queries.

use chrono::Weekday;

use crate::analyzers::types::{BirthYearStats, StatResult};
use crate::analyzers::utility::{ValueCount, mean, mode, value_counts};
use crate::error::StatError;
use crate::filter::WEEKDAYS;
use crate::parser::{BIRTH_YEAR, GENDER};
use crate::table::TripTable;

/// Label used when a trip has no user type.
pub const UNKNOWN_USER_TYPE: &str = "Unknown";

fn non_empty(table: &TripTable) -> StatResult<()> {
    if table.is_empty() {
        Err(StatError::NoData)
    } else {
        Ok(())
    }
}

/// Most common start month, 1-based.
pub fn most_common_month(table: &TripTable) -> StatResult<u32> {
    mode(table.iter().map(|t| t.month)).ok_or(StatError::NoData)
}

/// Most common start weekday. Ties go to the earliest day counting from Sunday.
pub fn most_common_weekday(table: &TripTable) -> StatResult<Weekday> {
    mode(table.iter().map(|t| t.weekday.num_days_from_sunday()))
        .map(|n| WEEKDAYS[n as usize])
        .ok_or(StatError::NoData)
}

/// Most common start hour, 0-23.
pub fn most_common_hour(table: &TripTable) -> StatResult<u32> {
    mode(table.iter().map(|t| t.hour)).ok_or(StatError::NoData)
}

pub fn most_common_start_station(table: &TripTable) -> StatResult<String> {
    mode(table.iter().map(|t| t.start_station.as_str()))
        .map(str::to_string)
        .ok_or(StatError::NoData)
}

pub fn most_common_end_station(table: &TripTable) -> StatResult<String> {
    mode(table.iter().map(|t| t.end_station.as_str()))
        .map(str::to_string)
        .ok_or(StatError::NoData)
}

/// Most frequent "<start> and <end>" combination. Direction matters.
pub fn most_common_trip(table: &TripTable) -> StatResult<String> {
    mode(table.iter().map(|t| t.station_pair())).ok_or(StatError::NoData)
}

/// Sum of all trip durations in seconds.
pub fn total_duration(table: &TripTable) -> StatResult<f64> {
    non_empty(table)?;
    Ok(table.iter().map(|t| t.trip_duration).sum())
}

/// Mean trip duration in seconds.
pub fn mean_duration(table: &TripTable) -> StatResult<f64> {
    let durations: Vec<f64> = table.iter().map(|t| t.trip_duration).collect();
    mean(&durations).ok_or(StatError::NoData)
}

/// Trips per user type. Counts always add up to the table length.
pub fn user_type_counts(table: &TripTable) -> StatResult<Vec<ValueCount>> {
    non_empty(table)?;
    Ok(value_counts(table.iter().map(|t| {
        if t.user_type.trim().is_empty() {
            UNKNOWN_USER_TYPE
        } else {
            t.user_type.as_str()
        }
    })))
}

/// Trips per gender, skipping blank cells.
pub fn gender_counts(table: &TripTable) -> StatResult<Vec<ValueCount>> {
    non_empty(table)?;
    let unavailable = StatError::Unavailable { column: GENDER };
    if !table.schema().has_gender {
        return Err(unavailable);
    }

    let counts = value_counts(table.iter().filter_map(|t| t.gender.as_deref()));
    if counts.is_empty() {
        return Err(unavailable);
    }
    Ok(counts)
}

/// Earliest, most recent and most common birth year, skipping blank cells.
pub fn birth_year_stats(table: &TripTable) -> StatResult<BirthYearStats> {
    non_empty(table)?;
    let unavailable = StatError::Unavailable { column: BIRTH_YEAR };
    if !table.schema().has_birth_year {
        return Err(unavailable);
    }

    let years: Vec<i32> = table.iter().filter_map(|t| t.birth_year).collect();
    let (Some(&earliest), Some(&most_recent), Some(most_common)) = (
        years.iter().min(),
        years.iter().max(),
        mode(years.iter().copied()),
    ) else {
        return Err(unavailable);
    };

    Ok(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}
