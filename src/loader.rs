//! Reads a city's CSV file into a [`TripTable`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::city::{City, DataSources};
use crate::error::LoadError;
use crate::parser::{BIRTH_YEAR, GENDER, REQUIRED_COLUMNS, RawTrip};
use crate::table::{Schema, TripTable};

/// Loads the dataset configured for `city`.
pub fn load_city(sources: &DataSources, city: City) -> Result<TripTable, LoadError> {
    let path = sources.path(city);
    info!(city = %city, path = %path.display(), "Loading city data");
    load_table(path)
}

/// Loads a trip table from a CSV file on disk.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_table(path: &Path) -> Result<TripTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, path)
}

/// Loads a trip table from any CSV source; `path` is only used in errors.
pub fn load_from_reader<R: Read>(reader: R, path: &Path) -> Result<TripTable, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let schema = Schema {
        has_gender: headers.iter().any(|h| h == GENDER),
        has_birth_year: headers.iter().any(|h| h == BIRTH_YEAR),
    };
    // exported files carry the row index in an unnamed first column
    let id_column = headers
        .iter()
        .position(|h| h.is_empty() || h.starts_with("Unnamed"));

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(csv_err)?;
        let raw: RawTrip = row.deserialize(Some(&headers)).map_err(csv_err)?;
        let id = id_column.and_then(|i| row.get(i)).map(str::to_string);
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let record = raw
            .into_record(id)
            .map_err(|value| LoadError::InvalidTimestamp {
                path: path.to_path_buf(),
                line,
                value,
            })?;
        records.push(record);
    }

    debug!(
        rows = records.len(),
        has_gender = schema.has_gender,
        has_birth_year = schema.has_birth_year,
        "Trip table loaded"
    );

    Ok(TripTable::new(schema, records))
}
