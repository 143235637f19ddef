//! In-memory trip data.

use chrono::{NaiveDateTime, Timelike, Weekday};

/// A single bike-share ride.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Row id from the unnamed leading column, when the file has one.
    pub id: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    /// Seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived from start_time
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
}

impl TripRecord {
    /// Builds a record and fills in the calendar fields from `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        use chrono::Datelike;

        TripRecord {
            id: None,
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: user_type.into(),
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    /// "<start> and <end>", the key used for the most frequent trip.
    pub fn station_pair(&self) -> String {
        format!("{} and {}", self.start_station, self.end_station)
    }
}

/// Which optional columns the source file carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    pub fn full() -> Self {
        Schema {
            has_gender: true,
            has_birth_year: true,
        }
    }
}

/// Ordered trips for one city sharing a single [`Schema`].
///
/// Filtering builds a new table; a table is never modified after loading.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTable {
    schema: Schema,
    records: Vec<TripRecord>,
}

impl TripTable {
    pub fn new(schema: Schema, records: Vec<TripRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_derives_calendar_fields() {
        let start = NaiveDate::from_ymd_opt(2017, 6, 23)
            .unwrap()
            .and_hms_opt(15, 9, 32)
            .unwrap();
        let trip = TripRecord::new(start, 321.0, "A", "B", "Subscriber");

        assert_eq!(trip.month, 6);
        assert_eq!(trip.weekday, Weekday::Fri);
        assert_eq!(trip.hour, 15);
    }

    #[test]
    fn test_station_pair_is_ordered() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let ab = TripRecord::new(start, 1.0, "A", "B", "Customer");
        let ba = TripRecord::new(start, 1.0, "B", "A", "Customer");

        assert_eq!(ab.station_pair(), "A and B");
        assert_ne!(ab.station_pair(), ba.station_pair());
    }

    #[test]
    fn test_empty_table() {
        let table = TripTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.schema(), Schema::default());
    }
}
