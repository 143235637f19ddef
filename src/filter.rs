//! Month / weekday filtering of a [`TripTable`].

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use tracing::debug;

use crate::error::InputError;
use crate::table::{TripRecord, TripTable};

/// Months a table can be filtered by. The datasets only cover January to June.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterMonth {
    January = 1,
    February,
    March,
    April,
    May,
    June,
}

impl FilterMonth {
    pub const ALL: [FilterMonth; 6] = [
        FilterMonth::January,
        FilterMonth::February,
        FilterMonth::March,
        FilterMonth::April,
        FilterMonth::May,
        FilterMonth::June,
    ];

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterMonth::January => "January",
            FilterMonth::February => "February",
            FilterMonth::March => "March",
            FilterMonth::April => "April",
            FilterMonth::May => "May",
            FilterMonth::June => "June",
        }
    }
}

impl fmt::Display for FilterMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterMonth {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FilterMonth::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InputError::Month(s.to_string()))
    }
}

/// Sunday-first, the order the prompts list them in.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English name, e.g. "Monday".
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a full weekday name, ignoring case. Abbreviations are rejected.
pub fn parse_weekday(s: &str) -> Result<Weekday, InputError> {
    let wanted = s.trim();
    WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| InputError::Weekday(s.to_string()))
}

/// A month and weekday constraint; `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelector {
    pub month: Option<FilterMonth>,
    pub weekday: Option<Weekday>,
}

impl FilterSelector {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn month(month: FilterMonth) -> Self {
        Self {
            month: Some(month),
            weekday: None,
        }
    }

    pub fn weekday(weekday: Weekday) -> Self {
        Self {
            month: None,
            weekday: Some(weekday),
        }
    }

    pub fn both(month: FilterMonth, weekday: Weekday) -> Self {
        Self {
            month: Some(month),
            weekday: Some(weekday),
        }
    }

    pub fn is_all(&self) -> bool {
        self.month.is_none() && self.weekday.is_none()
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        let month_ok = self.month.is_none_or(|m| trip.month == m.number());
        let day_ok = self.weekday.is_none_or(|d| trip.weekday == d);
        month_ok && day_ok
    }
}

impl fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map_or("all", FilterMonth::name);
        let day = self.weekday.map_or("all", weekday_name);
        write!(f, "month={month}, day={day}")
    }
}

/// Returns the trips matching `selector`, keeping their original order.
#[tracing::instrument(skip_all, fields(selector = %selector, rows_in = table.len()))]
pub fn filter_table(table: &TripTable, selector: &FilterSelector) -> TripTable {
    let records: Vec<TripRecord> = table
        .iter()
        .filter(|t| selector.matches(t))
        .cloned()
        .collect();

    debug!(rows_out = records.len(), "Filter applied");
    TripTable::new(table.schema(), records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Schema;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_month() {
        assert_eq!("january".parse::<FilterMonth>(), Ok(FilterMonth::January));
        assert_eq!(" JUNE ".parse::<FilterMonth>(), Ok(FilterMonth::June));
        assert_eq!(FilterMonth::March.number(), 3);
    }

    #[test]
    fn test_parse_month_outside_dataset_range() {
        assert_eq!(
            "july".parse::<FilterMonth>(),
            Err(InputError::Month("july".to_string()))
        );
        assert!("jan".parse::<FilterMonth>().is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("sunday"), Ok(Weekday::Sun));
        assert_eq!(parse_weekday("Saturday"), Ok(Weekday::Sat));
        assert!(parse_weekday("mon").is_err());
        assert!(parse_weekday("").is_err());
    }

    #[test]
    fn test_filter_all_returns_table_unchanged() {
        let table = sample_table();
        let filtered = filter_table(&table, &FilterSelector::all());
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_filter_by_month() {
        let table = sample_table();
        let filtered = filter_table(&table, &FilterSelector::month(FilterMonth::January));

        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|t| t.month == 1));
    }

    #[test]
    fn test_filter_by_weekday_keeps_order() {
        let table = sample_table();
        // 2017-01-02 and 2017-02-06 are Mondays
        let filtered = filter_table(&table, &FilterSelector::weekday(Weekday::Mon));

        let stations: Vec<_> = filtered.iter().map(|t| t.start_station.as_str()).collect();
        assert_eq!(stations, vec!["s1", "s3"]);
    }

    #[test]
    fn test_filter_both_is_logical_and() {
        let table = sample_table();
        let filtered = filter_table(
            &table,
            &FilterSelector::both(FilterMonth::February, Weekday::Mon),
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].start_station, "s3");
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let table = sample_table();
        let filtered = filter_table(&table, &FilterSelector::month(FilterMonth::May));

        assert!(filtered.is_empty());
        assert_eq!(filtered.schema(), table.schema());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let table = sample_table();
        let selector = FilterSelector::both(FilterMonth::January, Weekday::Tue);
        let once = filter_table(&table, &selector);
        let twice = filter_table(&once, &selector);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_selector_display() {
        let selector = FilterSelector::both(FilterMonth::April, Weekday::Wed);
        assert_eq!(selector.to_string(), "month=April, day=Wednesday");
        assert_eq!(FilterSelector::all().to_string(), "month=all, day=all");
    }

    // Helper functions for tests
    fn trip(y: i32, m: u32, d: u32, station: &str) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        TripRecord::new(start, 60.0, station, "end", "Subscriber")
    }

    fn sample_table() -> TripTable {
        TripTable::new(
            Schema::full(),
            vec![
                trip(2017, 1, 2, "s1"), // Monday
                trip(2017, 1, 3, "s2"), // Tuesday
                trip(2017, 2, 6, "s3"), // Monday
                trip(2017, 1, 10, "s4"), // Tuesday
                trip(2017, 2, 8, "s5"), // Wednesday
            ],
        )
    }
}
