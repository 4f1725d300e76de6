//! Row parser for bike-share trip CSVs.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::city::City;
use crate::dataset::Trip;
use crate::error::{BikeshareError, Result};

/// Timestamp layouts seen across the city exports.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Columns every city must provide.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// A CSV row before validation. Numeric cells stay textual so failures can name the field.
#[derive(Debug, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: String,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<String>,
}

/// Parses a start/end timestamp in any of the supported layouts.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Validates a raw row and derives its calendar fields.
///
/// # Errors
///
/// Returns [`BikeshareError::Parse`] naming the offending field when a timestamp,
/// duration or birth year is malformed, or a station name is blank.
pub fn parse_trip(raw: RawTrip, city: City, line: u64) -> Result<Trip> {
    let fail = |field: &str, message: String| BikeshareError::Parse {
        city,
        line,
        field: field.to_string(),
        message,
    };

    let start_time = parse_timestamp(&raw.start_time)
        .ok_or_else(|| fail("Start Time", format!("invalid timestamp '{}'", raw.start_time)))?;

    let end_time = match non_empty(raw.end_time) {
        Some(value) => Some(
            parse_timestamp(&value)
                .ok_or_else(|| fail("End Time", format!("invalid timestamp '{value}'")))?,
        ),
        None => None,
    };

    let trip_duration_seconds = raw
        .trip_duration
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| {
            fail(
                "Trip Duration",
                format!("expected non-negative seconds, got '{}'", raw.trip_duration),
            )
        })?;

    let start_station = non_empty(Some(raw.start_station))
        .ok_or_else(|| fail("Start Station", "station name is empty".to_string()))?;
    let end_station = non_empty(Some(raw.end_station))
        .ok_or_else(|| fail("End Station", "station name is empty".to_string()))?;

    let birth_year = match non_empty(raw.birth_year) {
        Some(value) => Some(
            parse_year(&value)
                .ok_or_else(|| fail("Birth Year", format!("expected a year, got '{value}'")))?,
        ),
        None => None,
    };

    Ok(Trip::new(
        start_time,
        trip_duration_seconds,
        start_station,
        end_station,
    )
    .with_end_time(end_time)
    .with_user_type(non_empty(raw.user_type))
    .with_gender(non_empty(raw.gender))
    .with_birth_year(birth_year))
}

/// Years are exported as floats (`1989.0`); anything fractional is rejected.
fn parse_year(value: &str) -> Option<i32> {
    let year = value.trim().parse::<f64>().ok()?;
    if year.is_finite() && year.fract() == 0.0 && year.abs() < i32::MAX as f64 {
        Some(year as i32)
    } else {
        None
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn raw(start: &str, duration: &str) -> RawTrip {
        RawTrip {
            start_time: start.to_string(),
            end_time: None,
            trip_duration: duration.to_string(),
            start_station: "Canal St & Adams St".to_string(),
            end_station: "Clinton St & Madison St".to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let ts = parse_timestamp("2017-06-23 15:09:32").unwrap();
        assert_eq!((ts.month(), ts.day(), ts.hour()), (6, 23, 15));

        assert!(parse_timestamp("2017-06-23T15:09:32").is_some());
        assert!(parse_timestamp("2017-06-23 15:09:32.250").is_some());
        assert!(parse_timestamp("2017-06-23 15:09").is_some());
        assert!(parse_timestamp("6/23/2017 15:09").is_some());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2017-13-01 00:00:00").is_none());
    }

    #[test]
    fn test_parse_trip_valid() {
        let mut row = raw("2017-01-02 09:07:57", "776");
        row.birth_year = Some("1992.0".to_string());
        row.gender = Some("Male".to_string());
        row.end_time = Some("2017-01-02 09:20:53".to_string());

        let trip = parse_trip(row, City::Chicago, 2).unwrap();
        assert_eq!(trip.month(), 1);
        assert_eq!(trip.day_of_week(), 0);
        assert_eq!(trip.trip_duration_seconds, 776.0);
        assert_eq!(trip.birth_year, Some(1992));
        assert_eq!(trip.gender.as_deref(), Some("Male"));
        assert!(trip.end_time.is_some());
    }

    #[test]
    fn test_empty_optional_cells_become_none() {
        let mut row = raw("2017-01-02 09:07:57", "776");
        row.gender = Some("".to_string());
        row.birth_year = Some("  ".to_string());
        row.user_type = Some("".to_string());

        let trip = parse_trip(row, City::Chicago, 2).unwrap();
        assert_eq!(trip.gender, None);
        assert_eq!(trip.birth_year, None);
        assert_eq!(trip.user_type, None);
    }

    #[test]
    fn test_bad_timestamp_names_field_and_line() {
        let err = parse_trip(raw("not a date", "10"), City::Washington, 7).unwrap_err();
        match err {
            BikeshareError::Parse { line, field, .. } => {
                assert_eq!(line, 7);
                assert_eq!(field, "Start Time");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_duration_rejected() {
        assert!(parse_trip(raw("2017-01-02 09:07:57", "abc"), City::Chicago, 2).is_err());
        assert!(parse_trip(raw("2017-01-02 09:07:57", "-5"), City::Chicago, 2).is_err());
        assert!(parse_trip(raw("2017-01-02 09:07:57", ""), City::Chicago, 2).is_err());
    }

    #[test]
    fn test_blank_station_rejected() {
        let mut row = raw("2017-01-02 09:07:57", "10");
        row.start_station = "".to_string();
        let err = parse_trip(row, City::Chicago, 4).unwrap_err();
        assert!(matches!(err, BikeshareError::Parse { ref field, line: 4, .. } if field == "Start Station"));

        let mut row = raw("2017-01-02 09:07:57", "10");
        row.end_station = "  ".to_string();
        let err = parse_trip(row, City::Chicago, 5).unwrap_err();
        assert!(matches!(err, BikeshareError::Parse { ref field, .. } if field == "End Station"));
    }

    #[test]
    fn test_fractional_birth_year_rejected() {
        let mut row = raw("2017-01-02 09:07:57", "10");
        row.birth_year = Some("1990.5".to_string());
        let err = parse_trip(row, City::Chicago, 3).unwrap_err();
        assert!(matches!(err, BikeshareError::Parse { ref field, .. } if field == "Birth Year"));
    }
}
