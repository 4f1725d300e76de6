use tracing::debug;

use crate::analyzers::types::{StationCount, StationStats};
use crate::analyzers::utility::FrequencyTable;
use crate::dataset::Dataset;
use crate::error::{BikeshareError, Result};

/// Most popular start, end, and combined start+end stations.
#[tracing::instrument(skip(dataset), fields(city = dataset.city.id(), trips = dataset.len()))]
pub fn compute_station_stats(dataset: &Dataset) -> Result<StationStats> {
    let empty = || BikeshareError::EmptyDataset {
        statistic: "station stats",
    };

    let trips = dataset.trips();
    let starts: FrequencyTable<&str> = trips.iter().map(|t| t.start_station.as_str()).collect();
    let ends: FrequencyTable<&str> = trips.iter().map(|t| t.end_station.as_str()).collect();

    let popular_start = starts.first_mode().map(station_count).ok_or_else(empty)?;
    let popular_end = ends.first_mode().map(station_count).ok_or_else(empty)?;
    let popular_combined = popular_combined(&starts, &ends);

    debug!(
        start_stations = starts.len(),
        end_stations = ends.len(),
        combined = popular_combined.as_ref().map(|c| c.station.as_str()),
        "Station stats computed"
    );

    Ok(StationStats {
        popular_start,
        popular_end,
        popular_combined,
    })
}

/// Walks start stations by descending frequency, summing start and end counts.
///
/// A station missing from either table is skipped, not counted as zero. Only a
/// strictly greater sum replaces the current best.
fn popular_combined(
    starts: &FrequencyTable<&str>,
    ends: &FrequencyTable<&str>,
) -> Option<StationCount> {
    let mut best: Option<StationCount> = None;

    for (station, start_count) in starts.ranked() {
        let Some(end_count) = ends.count(&station) else {
            continue;
        };
        let combined = start_count + end_count;
        if best.as_ref().is_none_or(|b| combined > b.count) {
            best = Some(StationCount {
                station: station.to_string(),
                count: combined,
            });
        }
    }

    best
}

fn station_count((station, count): (&str, u64)) -> StationCount {
    StationCount {
        station: station.to_string(),
        count,
    }
}
