//! Output formatting and persistence for trip reports.
//!
//! Supports the plain-text report, JSON serialization, the raw-record view and
//! CSV export of the filtered trips.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use csv::WriterBuilder;
use tracing::{debug, info};

use crate::analyzers::types::{
    Availability, BirthYearStats, CategoryCount, DurationStats, StationStats, TimeStats, UserStats,
};
use crate::dataset::{Dataset, Trip};
use crate::filter::{day_name, month_name};
use crate::stats::TripReport;

const RULE: &str = "----------------------------------------";

/// 0-23 hour as a 12-hour clock label: `0 -> 12am`, `12 -> 12pm`, `15 -> 3pm`.
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 | 24 => "12am".to_string(),
        12 => "12pm".to_string(),
        h if h > 12 => format!("{}pm", h - 12),
        h => format!("{h}am"),
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Writes the full text report, one section at a time.
pub fn write_report<W: Write>(out: &mut W, report: &TripReport) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "{} trips in {} for {}, {}",
        report.trip_count, report.city, report.filter.month, report.filter.day
    )?;

    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
    match &report.time {
        Some(time) => write_time_stats(out, time)?,
        None => write_section_error(out, report, "time")?,
    }
    write_footer(out, report.timing("time"))?;

    writeln!(out, "\nCalculating The Most Popular Stations and Trip...\n")?;
    match &report.stations {
        Some(stations) => write_station_stats(out, stations)?,
        None => write_section_error(out, report, "stations")?,
    }
    write_footer(out, report.timing("stations"))?;

    writeln!(out, "\nCalculating Trip Duration...\n")?;
    match &report.durations {
        Some(durations) => write_duration_stats(out, durations)?,
        None => write_section_error(out, report, "durations")?,
    }
    write_footer(out, report.timing("durations"))?;

    writeln!(out, "\nCalculating User Stats...\n")?;
    match &report.users {
        Some(users) => write_user_stats(out, users)?,
        None => write_section_error(out, report, "users")?,
    }
    write_footer(out, report.timing("users"))?;

    Ok(())
}

pub fn write_time_stats<W: Write>(out: &mut W, time: &TimeStats) -> io::Result<()> {
    writeln!(out, "The most popular month is: {}", month_name(time.popular_month))?;
    writeln!(out, "The most popular day is: {}", day_name(time.popular_day))?;
    writeln!(out, "The most popular hour is: {}", format_hour(time.popular_hour))
}

pub fn write_station_stats<W: Write>(out: &mut W, stations: &StationStats) -> io::Result<()> {
    writeln!(
        out,
        "The most popular start station is: {} ({} trips)",
        stations.popular_start.station, stations.popular_start.count
    )?;
    writeln!(
        out,
        "The most popular end station is: {} ({} trips)",
        stations.popular_end.station, stations.popular_end.count
    )?;
    match &stations.popular_combined {
        Some(combined) => writeln!(
            out,
            "The most popular station is: {} ({} starts and ends)",
            combined.station, combined.count
        ),
        None => writeln!(out, "No station is used both as a start and an end"),
    }
}

pub fn write_duration_stats<W: Write>(out: &mut W, durations: &DurationStats) -> io::Result<()> {
    let total = durations.total_seconds;
    writeln!(out, "Total travel time is:")?;
    writeln!(out, "{total} seconds")?;
    writeln!(out, "{} minutes", round2(total / 60.0))?;
    writeln!(out, "{} hours", round2(total / 3600.0))?;
    writeln!(out, "{} days", round2(total / 86400.0))?;

    let mean = durations.mean_seconds;
    writeln!(out, "\nMean travel time is:")?;
    writeln!(out, "{} seconds", round2(mean))?;
    writeln!(out, "{} minutes", round2(mean / 60.0))
}

pub fn write_user_stats<W: Write>(out: &mut W, users: &UserStats) -> io::Result<()> {
    writeln!(out, "Number of users for each user type,")?;
    for CategoryCount { value, count } in &users.type_counts {
        writeln!(out, "{value} type: {count} users")?;
    }

    match &users.gender_counts {
        Availability::Available(genders) if genders.is_empty() => {
            writeln!(out, "\nNo gender was recorded for these trips")?;
        }
        Availability::Available(genders) => {
            writeln!(out, "\nNumber of males and females,")?;
            for CategoryCount { value, count } in genders {
                writeln!(out, "number of {}s is: {count}", value.to_lowercase())?;
            }
        }
        Availability::Unavailable => writeln!(out, "\nThis city does not have gender stats")?,
    }

    match &users.birth_years {
        Availability::Available(Some(BirthYearStats {
            earliest,
            most_recent,
            most_common,
        })) => {
            writeln!(out, "\nThe earliest year of birth is: {earliest}")?;
            writeln!(out, "The most recent year of birth is: {most_recent}")?;
            writeln!(out, "The most common year of birth is: {most_common}")?;
        }
        Availability::Available(None) => {
            writeln!(out, "\nNo birth year was recorded for these trips")?;
        }
        Availability::Unavailable => writeln!(out, "\nThis city does not have birth year stats")?,
    }

    Ok(())
}

fn write_section_error<W: Write>(out: &mut W, report: &TripReport, section: &str) -> io::Result<()> {
    match report.error(section) {
        Some(err) => writeln!(out, "Unavailable: {}", err.message),
        None => writeln!(out, "Unavailable"),
    }
}

fn write_footer<W: Write>(out: &mut W, elapsed: Option<Duration>) -> io::Result<()> {
    if let Some(elapsed) = elapsed {
        writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    }
    writeln!(out, "{RULE}")
}

/// Writes one record of the raw viewer as `field: value` lines.
pub fn write_trip<W: Write>(out: &mut W, index: usize, trip: &Trip) -> io::Result<()> {
    let or_blank = |v: Option<&str>| v.unwrap_or("").to_string();

    writeln!(out, "Record #{index}")?;
    writeln!(out, "  Start Time:    {}", trip.start_time)?;
    writeln!(
        out,
        "  End Time:      {}",
        trip.end_time.map(|t| t.to_string()).unwrap_or_default()
    )?;
    writeln!(out, "  Trip Duration: {}", trip.trip_duration_seconds)?;
    writeln!(out, "  Start Station: {}", trip.start_station)?;
    writeln!(out, "  End Station:   {}", trip.end_station)?;
    writeln!(out, "  User Type:     {}", or_blank(trip.user_type.as_deref()))?;
    writeln!(out, "  Gender:        {}", or_blank(trip.gender.as_deref()))?;
    writeln!(
        out,
        "  Birth Year:    {}",
        trip.birth_year.map(|y| y.to_string()).unwrap_or_default()
    )?;
    writeln!(out, "  month:         {}", trip.month())?;
    writeln!(out, "  day_of_week:   {}", trip.day_of_week())?;
    writeln!(out)
}

/// Prints the report as pretty-printed JSON on stdout.
pub fn print_json(report: &TripReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

/// Writes every trip of `dataset` to a new CSV file at `path`, headers first.
pub fn export_trips(path: &Path, dataset: &Dataset) -> Result<()> {
    debug!(path = %path.display(), trips = dataset.len(), "Exporting trips");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for trip in dataset.trips() {
        writer.serialize(trip)?;
    }
    writer.flush()?;

    info!(path = %path.display(), trips = dataset.len(), "Trips exported");
    Ok(())
}
