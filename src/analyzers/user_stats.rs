use tracing::debug;

use crate::analyzers::types::{Availability, BirthYearStats, CategoryCount, UserStats};
use crate::analyzers::utility::FrequencyTable;
use crate::dataset::Dataset;
use crate::error::{BikeshareError, Result};

/// User type counts, plus gender and birth-year figures where the source has them.
#[tracing::instrument(skip(dataset), fields(city = dataset.city.id(), trips = dataset.len()))]
pub fn compute_user_stats(dataset: &Dataset) -> Result<UserStats> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset {
            statistic: "user stats",
        });
    }

    let trips = dataset.trips();
    let types: FrequencyTable<&str> = trips.iter().filter_map(|t| t.user_type.as_deref()).collect();

    let gender_counts = if dataset.schema.has_gender {
        let genders: FrequencyTable<&str> =
            trips.iter().filter_map(|t| t.gender.as_deref()).collect();
        Availability::Available(category_counts(&genders))
    } else {
        Availability::Unavailable
    };

    let birth_years = if dataset.schema.has_birth_year {
        let years: FrequencyTable<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
        Availability::Available(birth_year_stats(&years))
    } else {
        Availability::Unavailable
    };

    debug!(
        user_types = types.len(),
        has_gender = gender_counts.is_available(),
        has_birth_year = birth_years.is_available(),
        "User stats computed"
    );

    Ok(UserStats {
        type_counts: category_counts(&types),
        gender_counts,
        birth_years,
    })
}

fn category_counts(table: &FrequencyTable<&str>) -> Vec<CategoryCount> {
    table
        .ranked()
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

fn birth_year_stats(years: &FrequencyTable<i32>) -> Option<BirthYearStats> {
    let earliest = years.keys().min().copied()?;
    let most_recent = years.keys().max().copied()?;
    let (most_common, _) = years.smallest_mode()?;

    Some(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}
