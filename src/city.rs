//! Supported cities and where their trip data lives.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::InputError;

/// One of the three cities with a bike-share dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| InputError::City(s.to_string()))
    }
}

/// Maps each [`City`] to the CSV file holding its trips.
///
/// ```text
/// chicago       -> <data_dir>/chicago.csv
/// new york city -> <data_dir>/new_york_city.csv
/// washington    -> <data_dir>/washington.csv
/// ```
#[derive(Debug, Clone)]
pub struct DataSources {
    chicago: PathBuf,
    new_york_city: PathBuf,
    washington: PathBuf,
}

impl DataSources {
    /// Uses the standard file names inside `data_dir`.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            chicago: dir.join(City::Chicago.file_name()),
            new_york_city: dir.join(City::NewYorkCity.file_name()),
            washington: dir.join(City::Washington.file_name()),
        }
    }

    /// Overrides the source for one city.
    pub fn with_path(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match city {
            City::Chicago => self.chicago = path,
            City::NewYorkCity => self.new_york_city = path,
            City::Washington => self.washington = path,
        }
        self
    }

    pub fn path(&self, city: City) -> &Path {
        match city {
            City::Chicago => &self.chicago,
            City::NewYorkCity => &self.new_york_city,
            City::Washington => &self.washington,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_case_insensitive() {
        assert_eq!("Chicago".parse::<City>(), Ok(City::Chicago));
        assert_eq!("  NEW YORK CITY ".parse::<City>(), Ok(City::NewYorkCity));
        assert_eq!("washington".parse::<City>(), Ok(City::Washington));
    }

    #[test]
    fn test_parse_city_rejects_unknown() {
        assert_eq!(
            "boston".parse::<City>(),
            Err(InputError::City("boston".to_string()))
        );
        assert!("new york".parse::<City>().is_err());
    }

    #[test]
    fn test_data_sources_from_dir() {
        let sources = DataSources::from_dir("/data");
        assert_eq!(
            sources.path(City::NewYorkCity),
            Path::new("/data/new_york_city.csv")
        );
        assert_eq!(sources.path(City::Chicago), Path::new("/data/chicago.csv"));
    }

    #[test]
    fn test_data_sources_override() {
        let sources = DataSources::from_dir("/data").with_path(City::Washington, "/tmp/dc.csv");
        assert_eq!(sources.path(City::Washington), Path::new("/tmp/dc.csv"));
        assert_eq!(sources.path(City::Chicago), Path::new("/data/chicago.csv"));
    }
}
