//! Result types returned by the statistics routines.

use serde::Serialize;

/// Whether an optional source column exists at all.
///
/// `Unavailable` means the city's data has no such column; an available but
/// empty value means the column exists and no row filled it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Availability<T> {
    Unavailable,
    Available(T),
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    pub fn as_ref(&self) -> Availability<&T> {
        match self {
            Availability::Unavailable => Availability::Unavailable,
            Availability::Available(v) => Availability::Available(v),
        }
    }

    pub fn available(self) -> Option<T> {
        match self {
            Availability::Unavailable => None,
            Availability::Available(v) => Some(v),
        }
    }
}

/// Most frequent month (1-12), weekday (0-6, Monday = 0) and start hour (0-23).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub popular_month: u32,
    pub popular_day: u32,
    pub popular_hour: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationCount {
    pub station: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub popular_start: StationCount,
    pub popular_end: StationCount,
    /// Highest start + end count among stations used both ways; `None` if no station was.
    pub popular_combined: Option<StationCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    /// Ranked by descending count, ties in first-seen order.
    pub type_counts: Vec<CategoryCount>,
    pub gender_counts: Availability<Vec<CategoryCount>>,
    /// `Available(None)` when the column exists but every cell is empty.
    pub birth_years: Availability<Option<BirthYearStats>>,
}
