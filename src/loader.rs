//! Loads a city's trips from disk and applies the month/day filter.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::city::City;
use crate::dataset::{Dataset, Schema};
use crate::error::{BikeshareError, Result};
use crate::filter::Filter;
use crate::parser::{self, RawTrip};

/// Resolves cities to files under a data directory and loads them.
#[derive(Debug, Clone)]
pub struct Loader {
    data_dir: PathBuf,
}

impl Loader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The file backing `city`: the plain CSV, or `<file>.gz` when only that exists.
    pub fn resolve(&self, city: City) -> Result<PathBuf> {
        let plain = city.data_path(&self.data_dir);
        if plain.is_file() {
            return Ok(plain);
        }

        let mut gz = plain.clone().into_os_string();
        gz.push(".gz");
        let gz = PathBuf::from(gz);
        if gz.is_file() {
            return Ok(gz);
        }

        Err(BikeshareError::SourceNotFound { city, path: plain })
    }

    /// Loads `city`, keeping only trips that pass `filter`, in source order.
    ///
    /// # Errors
    ///
    /// [`BikeshareError::InvalidFilter`] before any I/O if the filter is out of range,
    /// [`BikeshareError::SourceNotFound`] if the city has no file, and
    /// [`BikeshareError::Parse`] / [`BikeshareError::MissingColumn`] for malformed data.
    #[tracing::instrument(skip(self), fields(city = city.id(), data_dir = %self.data_dir.display()))]
    pub fn load(&self, city: City, filter: Filter) -> Result<Dataset> {
        filter.validate()?;

        let path = self.resolve(city)?;
        debug!(path = %path.display(), "Opening trip data");

        let file = File::open(&path).map_err(|source| BikeshareError::Io {
            path: path.clone(),
            source,
        })?;

        let reader: Box<dyn Read> = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            Box::new(GzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        load_from_reader(reader, city, filter)
    }

    /// Same as [`Loader::load`] with textual selectors such as `"mar"` / `"fri"` / `"all"`.
    pub fn load_named(&self, city: &str, month: &str, day: &str) -> Result<Dataset> {
        let filter = Filter::parse(month, day)?;
        let city = city.parse::<City>()?;
        self.load(city, filter)
    }
}

/// Parses a CSV stream into a filtered [`Dataset`].
///
/// Every row is parsed, including the ones the filter drops, so a malformed row
/// anywhere in the source fails the whole load.
pub fn load_from_reader<R: Read>(reader: R, city: City, filter: Filter) -> Result<Dataset> {
    filter.validate()?;

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| csv_error(city, "header", e))?
        .clone();

    for column in parser::REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(BikeshareError::MissingColumn { city, column });
        }
    }

    let schema = Schema {
        has_gender: headers.iter().any(|h| h == parser::GENDER_COLUMN),
        has_birth_year: headers.iter().any(|h| h == parser::BIRTH_YEAR_COLUMN),
    };
    debug!(
        has_gender = schema.has_gender,
        has_birth_year = schema.has_birth_year,
        "Resolved schema"
    );

    let mut trips = Vec::new();
    let mut total_rows = 0usize;

    for result in rdr.records() {
        let record = result.map_err(|e| csv_error(city, "record", e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let raw: RawTrip =
            record
                .deserialize(Some(&headers))
                .map_err(|e| BikeshareError::Parse {
                    city,
                    line,
                    field: "record".to_string(),
                    message: e.to_string(),
                })?;

        let trip = parser::parse_trip(raw, city, line)?;
        total_rows += 1;

        if filter.matches(trip.month(), trip.day_of_week()) {
            trips.push(trip);
        }
    }

    info!(
        city = city.id(),
        total_rows,
        retained = trips.len(),
        month = %filter.month,
        day = %filter.day,
        "Trip data loaded"
    );

    Ok(Dataset::new(city, filter, schema, trips))
}

fn csv_error(city: City, field: &str, err: csv::Error) -> BikeshareError {
    let line = err.position().map(|p| p.line()).unwrap_or_default();
    BikeshareError::Parse {
        city,
        line,
        field: field.to_string(),
        message: err.to_string(),
    }
}
