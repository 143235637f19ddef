//! Error types shared by the loader, the statistics and the prompts.

use std::path::PathBuf;

/// Failure to turn a city's CSV file into a [`TripTable`](crate::table::TripTable).
///
/// Never retried; the caller decides whether the round is over.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} has no `{column}` column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}, line {line}: cannot parse start time `{value}`", .path.display())]
    InvalidTimestamp {
        path: PathBuf,
        line: u64,
        value: String,
    },
}

/// Why a single statistic could not be computed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    #[error("no matching data")]
    NoData,
    #[error("No {column} information")]
    Unavailable { column: &'static str },
}

/// An answer that is outside the accepted set for its prompt.
///
/// The display text is what the user sees before being asked again.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid city, please try again.")]
    City(String),
    #[error("Not a valid choice, please try again.")]
    FilterChoice(String),
    #[error("Invalid month, please try again.")]
    Month(String),
    #[error("Invalid day, please try again.")]
    Weekday(String),
    #[error("Not a valid choice, please try again.")]
    YesNo(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_error_messages() {
        assert_eq!(StatError::NoData.to_string(), "no matching data");
        assert_eq!(
            StatError::Unavailable { column: "Gender" }.to_string(),
            "No Gender information"
        );
    }

    #[test]
    fn test_missing_column_mentions_path_and_column() {
        let err = LoadError::MissingColumn {
            path: PathBuf::from("chicago.csv"),
            column: "Start Time",
        };
        let msg = err.to_string();
        assert!(msg.contains("chicago.csv"));
        assert!(msg.contains("Start Time"));
    }
}
