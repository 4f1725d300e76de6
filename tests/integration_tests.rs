use std::path::PathBuf;

use bikeshare_explorer::analyzers::types::{Availability, BirthYearStats};
use bikeshare_explorer::analyzers::{
    compute_duration_stats, compute_station_stats, compute_time_stats, compute_user_stats,
};
use bikeshare_explorer::city::City;
use bikeshare_explorer::error::BikeshareError;
use bikeshare_explorer::filter::{DayFilter, Filter, MonthFilter};
use bikeshare_explorer::loader::Loader;
use bikeshare_explorer::stats::TripReport;

fn fixtures() -> Loader {
    Loader::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

#[test]
fn test_full_pipeline() {
    let dataset = fixtures()
        .load(City::Chicago, Filter::default())
        .expect("Failed to load chicago fixture");
    assert_eq!(dataset.len(), 6);

    let time = compute_time_stats(&dataset).unwrap();
    assert_eq!(time.popular_month, 1);
    assert_eq!(time.popular_day, 4);
    assert_eq!(time.popular_hour, 8);

    let stations = compute_station_stats(&dataset).unwrap();
    assert_eq!(stations.popular_start.station, "Canal St & Adams St");
    assert_eq!(stations.popular_start.count, 3);
    assert_eq!(stations.popular_end.station, "Clinton St & Madison St");
    let combined = stations.popular_combined.unwrap();
    assert_eq!(combined.station, "Canal St & Adams St");
    assert_eq!(combined.count, 5);

    let durations = compute_duration_stats(&dataset).unwrap();
    assert_eq!(durations.total_seconds, 4196.0);
    assert!((durations.mean_seconds - 4196.0 / 6.0).abs() < 1e-9);

    let users = compute_user_stats(&dataset).unwrap();
    assert_eq!(users.type_counts[0].value, "Subscriber");
    assert_eq!(users.type_counts[0].count, 4);
    assert_eq!(users.type_counts[1].count, 2);
    assert_eq!(
        users.birth_years,
        Availability::Available(Some(BirthYearStats {
            earliest: 1970,
            most_recent: 1992,
            most_common: 1992,
        }))
    );
}

#[test]
fn test_filters_select_matching_subset() {
    let loader = fixtures();
    let all = loader.load(City::Chicago, Filter::default()).unwrap();
    let march_fridays = loader.load_named("chicago", "mar", "fri").unwrap();

    assert_eq!(march_fridays.len(), 2);
    assert!(march_fridays.len() <= all.len());
    for trip in march_fridays.trips() {
        assert_eq!(trip.month(), 3);
        assert_eq!(trip.day_of_week(), 4);
    }

    let mondays = loader
        .load(City::Chicago, Filter::new(MonthFilter::All, DayFilter::Day(0)))
        .unwrap();
    assert_eq!(mondays.len(), 2);
}

#[test]
fn test_all_filters_equal_unfiltered_load() {
    let loader = fixtures();
    let first = loader.load(City::Chicago, Filter::default()).unwrap();
    let named = loader.load_named("Chicago", "all", "all").unwrap();
    assert_eq!(first, named);
}

#[test]
fn test_statistics_are_repeatable() {
    let dataset = fixtures().load(City::Chicago, Filter::default()).unwrap();
    assert_eq!(
        compute_time_stats(&dataset).unwrap(),
        compute_time_stats(&dataset).unwrap()
    );
    assert_eq!(
        compute_station_stats(&dataset).unwrap(),
        compute_station_stats(&dataset).unwrap()
    );
    assert_eq!(
        compute_duration_stats(&dataset).unwrap(),
        compute_duration_stats(&dataset).unwrap()
    );
    assert_eq!(
        compute_user_stats(&dataset).unwrap(),
        compute_user_stats(&dataset).unwrap()
    );
}

#[test]
fn test_city_without_demographics() {
    let dataset = fixtures().load(City::Washington, Filter::default()).unwrap();
    let users = compute_user_stats(&dataset).unwrap();

    assert_eq!(users.gender_counts, Availability::Unavailable);
    assert_eq!(users.birth_years, Availability::Unavailable);

    let durations = compute_duration_stats(&dataset).unwrap();
    assert_eq!(durations.total_seconds, 1020.75);
}

#[test]
fn test_demographic_columns_present_but_blank() {
    let dataset = fixtures().load(City::NewYorkCity, Filter::default()).unwrap();
    let users = compute_user_stats(&dataset).unwrap();

    assert_eq!(users.gender_counts, Availability::Available(vec![]));
    assert_eq!(users.birth_years, Availability::Available(None));
}

#[test]
fn test_empty_selection_reports_every_section() {
    // no July trips in the fixture, and "july" is not an accepted token
    let dataset = fixtures()
        .load(City::Chicago, Filter::new(MonthFilter::Month(7), DayFilter::All))
        .unwrap();
    assert!(dataset.is_empty());

    assert!(matches!(
        compute_time_stats(&dataset),
        Err(BikeshareError::EmptyDataset { .. })
    ));
    assert!(matches!(
        compute_station_stats(&dataset),
        Err(BikeshareError::EmptyDataset { .. })
    ));
    assert!(matches!(
        compute_duration_stats(&dataset),
        Err(BikeshareError::EmptyDataset { .. })
    ));
    assert!(matches!(
        compute_user_stats(&dataset),
        Err(BikeshareError::EmptyDataset { .. })
    ));

    let report = TripReport::from_dataset(&dataset);
    assert_eq!(report.errors.len(), 4);
}

#[test]
fn test_raw_pages_follow_source_order() {
    let dataset = fixtures().load(City::Chicago, Filter::default()).unwrap();
    assert_eq!(dataset.page(0).len(), 5);
    assert_eq!(dataset.page(5).len(), 1);
    assert_eq!(dataset.page(5)[0].start_station, "Streeter Dr & Grand Ave");
    assert_eq!(dataset.pages().count(), 2);
}

#[test]
fn test_unknown_inputs_rejected() {
    let loader = fixtures();
    assert!(matches!(
        loader.load_named("boston", "all", "all"),
        Err(BikeshareError::UnknownCity(_))
    ));
    assert!(matches!(
        loader.load_named("chicago", "all", "funday"),
        Err(BikeshareError::InvalidFilter { kind: "day", .. })
    ));
}

#[test]
fn test_missing_source_file() {
    let loader = Loader::new(std::env::temp_dir().join("bikeshare_no_such_dir"));
    assert!(matches!(
        loader.load(City::NewYorkCity, Filter::default()),
        Err(BikeshareError::SourceNotFound {
            city: City::NewYorkCity,
            ..
        })
    ));
}
