use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::analyzers::types::{DurationStats, StationStats, TimeStats, UserStats};
use crate::analyzers::{
    compute_duration_stats, compute_station_stats, compute_time_stats, compute_user_stats,
};
use crate::city::City;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::filter::Filter;

/// Name and message of a section that could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionError {
    pub section: &'static str,
    pub message: String,
}

/// All four statistics sections for one loaded dataset.
///
/// A section that fails is left `None` and recorded in `errors`; the others are
/// still computed.
#[derive(Debug, Clone, Serialize)]
pub struct TripReport {
    pub generated_at: DateTime<Utc>,
    pub city: City,
    pub filter: Filter,
    pub trip_count: usize,

    pub time: Option<TimeStats>,
    pub stations: Option<StationStats>,
    pub durations: Option<DurationStats>,
    pub users: Option<UserStats>,

    #[serde(skip)]
    pub timings: Vec<(&'static str, Duration)>,

    pub errors: Vec<SectionError>,
}

impl TripReport {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut report = TripReport {
            generated_at: Utc::now(),
            city: dataset.city,
            filter: dataset.filter,
            trip_count: dataset.len(),
            time: None,
            stations: None,
            durations: None,
            users: None,
            timings: Vec::new(),
            errors: Vec::new(),
        };

        report.time = report.run("time", || compute_time_stats(dataset));
        report.stations = report.run("stations", || compute_station_stats(dataset));
        report.durations = report.run("durations", || compute_duration_stats(dataset));
        report.users = report.run("users", || compute_user_stats(dataset));

        report
    }

    /// Time taken by `section`, if it ran.
    pub fn timing(&self, section: &str) -> Option<Duration> {
        self.timings
            .iter()
            .find(|(name, _)| *name == section)
            .map(|(_, elapsed)| *elapsed)
    }

    /// The recorded failure for `section`, if any.
    pub fn error(&self, section: &str) -> Option<&SectionError> {
        self.errors.iter().find(|e| e.section == section)
    }

    fn run<T>(&mut self, section: &'static str, compute: impl FnOnce() -> Result<T>) -> Option<T> {
        let started = Instant::now();
        let outcome = compute();
        self.timings.push((section, started.elapsed()));

        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(section, error = %e, "Statistics section failed");
                self.errors.push(SectionError {
                    section,
                    message: e.to_string(),
                });
                None
            }
        }
    }
}
