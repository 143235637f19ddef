use std::time::Instant;

use tracing::debug;

use crate::analyzers::aggregate::{
    birth_year_stats, gender_counts, mean_duration, most_common_end_station, most_common_hour,
    most_common_month, most_common_start_station, most_common_trip, most_common_weekday,
    total_duration, user_type_counts,
};
use crate::analyzers::types::{
    DurationStats, StationStats, TimeStats, Timed, TripReport, UserStats,
};
use crate::filter::weekday_name;
use crate::table::TripTable;

/// Computes every report section for `table`.
///
/// Sections are computed one after another and never depend on each other,
/// so a statistic without data only affects its own entry.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn analyze(table: &TripTable) -> TripReport {
    TripReport {
        rows: table.len(),
        time: timed("time", || time_stats(table)),
        stations: timed("stations", || station_stats(table)),
        durations: timed("durations", || duration_stats(table)),
        users: timed("users", || user_stats(table)),
    }
}

pub fn time_stats(table: &TripTable) -> TimeStats {
    TimeStats {
        month: most_common_month(table),
        weekday: most_common_weekday(table).map(weekday_name),
        hour: most_common_hour(table),
    }
}

pub fn station_stats(table: &TripTable) -> StationStats {
    StationStats {
        start_station: most_common_start_station(table),
        end_station: most_common_end_station(table),
        trip: most_common_trip(table),
    }
}

pub fn duration_stats(table: &TripTable) -> DurationStats {
    DurationStats {
        total_secs: total_duration(table),
        mean_secs: mean_duration(table),
    }
}

pub fn user_stats(table: &TripTable) -> UserStats {
    UserStats {
        user_types: user_type_counts(table),
        genders: gender_counts(table),
        birth_years: birth_year_stats(table),
    }
}

fn timed<T>(section: &'static str, compute: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let stats = compute();
    let elapsed_secs = start.elapsed().as_secs_f64();
    debug!(section, elapsed_secs, "Section computed");
    Timed {
        stats,
        elapsed_secs,
    }
}
