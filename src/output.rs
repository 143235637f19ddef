//! Output formatting for trip reports.
//!
//! Supports the console text report, pretty JSON, and raw records as CSV.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::analyzers::types::{StatResult, Timed, TripReport};
use crate::analyzers::utility::ValueCount;
use crate::city::City;
use crate::filter::{FilterSelector, weekday_name};
use crate::parser::{
    BIRTH_YEAR, END_STATION, END_TIME, GENDER, START_STATION, START_TIME, TRIP_DURATION,
    USER_TYPE,
};
use crate::prompt::SEPARATOR;
use crate::table::{Schema, TripRecord};

fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map_or_else(|| month.to_string(), |m| m.name().to_string())
}

fn line<T: Display>(out: &mut dyn Write, label: &str, stat: &StatResult<T>) -> Result<()> {
    match stat {
        Ok(value) => writeln!(out, "{label}: {value}")?,
        Err(e) => writeln!(out, "{label}: {e}")?,
    }
    Ok(())
}

fn counts(out: &mut dyn Write, label: &str, stat: &StatResult<Vec<ValueCount>>) -> Result<()> {
    match stat {
        Ok(rows) => {
            writeln!(out, "{label}:")?;
            for row in rows {
                writeln!(out, "  {}: {}", row.value, row.count)?;
            }
            writeln!(out)?;
        }
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

fn section<T>(
    out: &mut impl Write,
    title: &str,
    timed: &Timed<T>,
    body: impl FnOnce(&mut dyn Write, &T) -> Result<()>,
) -> Result<()> {
    writeln!(out, "\n{title}\n")?;
    body(out, &timed.stats)?;
    writeln!(out, "\nThis took {} seconds.", timed.elapsed_secs)?;
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}

/// Writes the four report sections as console text.
pub fn write_report(out: &mut impl Write, report: &TripReport) -> Result<()> {
    section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        &report.time,
        |out, s| {
            let month = s.month.clone().map(month_name);
            line(out, "Most Common Start Month", &month)?;
            line(out, "Most Common Start Day", &s.weekday)?;
            line(out, "Most Common Start Hour", &s.hour)
        },
    )?;

    section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        &report.stations,
        |out, s| {
            line(out, "Most Common Start Station", &s.start_station)?;
            line(out, "Most Common End Station", &s.end_station)?;
            line(
                out,
                "Most Frequent Combination of Start and End Station",
                &s.trip,
            )
        },
    )?;

    section(out, "Calculating Trip Duration...", &report.durations, |out, s| {
        let total = s.total_secs.clone().map(|v| format!("{v} seconds"));
        let mean = s.mean_secs.clone().map(|v| format!("{v:.2} seconds"));
        line(out, "Total Travel Time", &total)?;
        line(out, "Mean Travel Time", &mean)
    })?;

    section(out, "Calculating User Stats...", &report.users, |out, s| {
        counts(out, "Counts of User Types", &s.user_types)?;
        counts(out, "Counts of Gender", &s.genders)?;
        match &s.birth_years {
            Ok(years) => {
                writeln!(out, "Earliest year of birth: {}", years.earliest)?;
                writeln!(out, "Most recent year of birth: {}", years.most_recent)?;
                writeln!(out, "Most common year of birth: {}", years.most_common)?;
            }
            Err(e) => writeln!(out, "{e}")?,
        }
        Ok(())
    })?;

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    city: City,
    month: &'static str,
    day: &'static str,
    #[serde(flatten)]
    report: &'a TripReport,
}

/// Writes the report, with the city and filter it was computed for, as pretty JSON.
pub fn write_json(
    out: &mut impl Write,
    city: City,
    selector: &FilterSelector,
    report: &TripReport,
) -> Result<()> {
    let doc = JsonReport {
        city,
        month: selector.month.map_or("all", |m| m.name()),
        day: selector.weekday.map_or("all", weekday_name),
        report,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}

/// Writes trips as CSV using the dataset's column names.
///
/// Gender and Birth Year columns appear only when the source had them.
pub fn write_records(out: &mut impl Write, schema: Schema, records: &[&TripRecord]) -> Result<()> {
    debug!(rows = records.len(), "Writing raw records");
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec![
        "",
        START_TIME,
        END_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];
    if schema.has_gender {
        header.push(GENDER);
    }
    if schema.has_birth_year {
        header.push(BIRTH_YEAR);
    }
    writer.write_record(&header)?;

    for trip in records {
        let mut row = vec![
            trip.id.clone().unwrap_or_default(),
            trip.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            trip.end_time.clone().unwrap_or_default(),
            trip.trip_duration.to_string(),
            trip.start_station.clone(),
            trip.end_station.clone(),
            trip.user_type.clone(),
        ];
        if schema.has_gender {
            row.push(trip.gender.clone().unwrap_or_default());
        }
        if schema.has_birth_year {
            row.push(trip.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
