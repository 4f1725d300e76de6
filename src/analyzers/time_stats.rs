use tracing::debug;

use crate::analyzers::types::TimeStats;
use crate::analyzers::utility::FrequencyTable;
use crate::dataset::{Dataset, Trip};
use crate::error::{BikeshareError, Result};

/// Most frequent month, weekday and start hour. Ties go to the smallest value.
#[tracing::instrument(skip(dataset), fields(city = dataset.city.id(), trips = dataset.len()))]
pub fn compute_time_stats(dataset: &Dataset) -> Result<TimeStats> {
    let empty = || BikeshareError::EmptyDataset {
        statistic: "time stats",
    };

    let trips = dataset.trips();
    let months: FrequencyTable<u32> = trips.iter().map(Trip::month).collect();
    let days: FrequencyTable<u32> = trips.iter().map(Trip::day_of_week).collect();
    let hours: FrequencyTable<u32> = trips.iter().map(Trip::hour).collect();

    let (popular_month, month_count) = months.smallest_mode().ok_or_else(empty)?;
    let (popular_day, _) = days.smallest_mode().ok_or_else(empty)?;
    let (popular_hour, _) = hours.smallest_mode().ok_or_else(empty)?;

    debug!(popular_month, month_count, popular_day, popular_hour, "Time stats computed");

    Ok(TimeStats {
        popular_month,
        popular_day,
        popular_hour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::dataset::Schema;
    use crate::filter::Filter;
    use chrono::NaiveDate;

    fn trip(m: u32, d: u32, h: u32) -> Trip {
        let start = NaiveDate::from_ymd_opt(2017, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap();
        Trip::new(start, 60.0, "A", "B")
    }

    fn dataset(trips: Vec<Trip>) -> Dataset {
        Dataset::new(City::Chicago, Filter::default(), Schema::default(), trips)
    }

    #[test]
    fn test_month_tie_picks_smaller() {
        // three trips in May listed first, three in March
        let ds = dataset(vec![
            trip(5, 1, 9),
            trip(5, 2, 9),
            trip(5, 3, 9),
            trip(3, 1, 9),
            trip(3, 2, 9),
            trip(3, 3, 9),
        ]);
        let stats = compute_time_stats(&ds).unwrap();
        assert_eq!(stats.popular_month, 3);
        assert_eq!(compute_time_stats(&ds).unwrap(), stats);
    }

    #[test]
    fn test_popular_day_and_hour() {
        // 2017-01-02 Monday, 2017-01-04 Wednesday
        let ds = dataset(vec![trip(1, 4, 17), trip(1, 4, 17), trip(1, 2, 8)]);
        let stats = compute_time_stats(&ds).unwrap();
        assert_eq!(stats.popular_day, 2);
        assert_eq!(stats.popular_hour, 17);
    }

    #[test]
    fn test_hour_tie_picks_earliest() {
        let ds = dataset(vec![trip(1, 2, 23), trip(1, 2, 0)]);
        assert_eq!(compute_time_stats(&ds).unwrap().popular_hour, 0);
    }

    #[test]
    fn test_empty_dataset() {
        let err = compute_time_stats(&dataset(vec![])).unwrap_err();
        assert!(matches!(err, BikeshareError::EmptyDataset { .. }));
    }
}
