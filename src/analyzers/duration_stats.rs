use tracing::debug;

use crate::analyzers::types::DurationStats;
use crate::analyzers::utility::mean;
use crate::dataset::Dataset;
use crate::error::{BikeshareError, Result};

/// Total and mean trip duration in raw seconds.
#[tracing::instrument(skip(dataset), fields(city = dataset.city.id(), trips = dataset.len()))]
pub fn compute_duration_stats(dataset: &Dataset) -> Result<DurationStats> {
    let durations: Vec<f64> = dataset
        .trips()
        .iter()
        .map(|t| t.trip_duration_seconds)
        .collect();

    let mean_seconds = mean(&durations).ok_or(BikeshareError::EmptyDataset {
        statistic: "trip duration stats",
    })?;
    let total_seconds: f64 = durations.iter().sum();

    debug!(total_seconds, mean_seconds, "Duration stats computed");

    Ok(DurationStats {
        trip_count: durations.len(),
        total_seconds,
        mean_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::dataset::{Schema, Trip};
    use crate::filter::Filter;
    use chrono::NaiveDate;

    fn dataset(durations: &[f64]) -> Dataset {
        let ts = NaiveDate::from_ymd_opt(2017, 4, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let trips = durations
            .iter()
            .map(|d| Trip::new(ts, *d, "A", "B"))
            .collect();
        Dataset::new(City::Washington, Filter::default(), Schema::default(), trips)
    }

    #[test]
    fn test_total_and_mean() {
        let stats = compute_duration_stats(&dataset(&[60.0, 120.0, 180.0])).unwrap();
        assert_eq!(stats.total_seconds, 360.0);
        assert_eq!(stats.mean_seconds, 120.0);
        assert_eq!(stats.trip_count, 3);
    }

    #[test]
    fn test_fractional_durations_kept() {
        let stats = compute_duration_stats(&dataset(&[0.5, 1.25])).unwrap();
        assert_eq!(stats.total_seconds, 1.75);
        assert_eq!(stats.mean_seconds, 0.875);
    }

    #[test]
    fn test_empty_dataset() {
        let err = compute_duration_stats(&dataset(&[])).unwrap_err();
        assert!(matches!(err, BikeshareError::EmptyDataset { .. }));
    }
}
