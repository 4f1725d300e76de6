//! In-memory trip records and the filtered dataset handed to the analyzers.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::city::City;
use crate::filter::Filter;

/// Number of records shown per page by the raw-record viewer.
pub const PAGE_SIZE: usize = 5;

/// A single trip with its derived calendar fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    #[serde(rename = "Start Time")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "End Time")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration_seconds: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type")]
    pub user_type: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year")]
    pub birth_year: Option<i32>,

    // derived from start_time, never changed afterwards
    pub(crate) month: u32,
    pub(crate) day_of_week: u32,
}

impl Trip {
    /// Builds a trip, deriving month and weekday from `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            month: start_time.month(),
            day_of_week: start_time.weekday().num_days_from_monday(),
            start_time,
            end_time: None,
            trip_duration_seconds,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
        }
    }

    pub fn with_end_time(mut self, end_time: Option<NaiveDateTime>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_user_type(mut self, user_type: Option<String>) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    /// Month the trip started, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Weekday the trip started, Monday = 0.
    pub fn day_of_week(&self) -> u32 {
        self.day_of_week
    }

    /// Hour of day (0-23) the trip started.
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }
}

/// Which optional columns the source carried. Resolved once per load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// The trips of one city that passed the session's filter, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub city: City,
    pub filter: Filter,
    pub schema: Schema,
    trips: Vec<Trip>,
}

impl Dataset {
    pub fn new(city: City, filter: Filter, schema: Schema, trips: Vec<Trip>) -> Self {
        Self {
            city,
            filter,
            schema,
            trips,
        }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Records `[start, start + PAGE_SIZE)`, clamped to the dataset. Empty past the end.
    pub fn page(&self, start: usize) -> &[Trip] {
        let start = start.min(self.trips.len());
        let end = start.saturating_add(PAGE_SIZE).min(self.trips.len());
        &self.trips[start..end]
    }

    /// Consecutive pages of `PAGE_SIZE` records.
    pub fn pages(&self) -> std::slice::Chunks<'_, Trip> {
        self.trips.chunks(PAGE_SIZE)
    }
}
