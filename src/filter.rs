//! Month and day-of-week filters applied at load time.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BikeshareError;

/// Month tokens accepted from the user, January first.
pub const MONTH_TOKENS: [&str; 6] = ["jan", "feb", "mar", "apr", "may", "june"];

/// Day tokens accepted from the user, Monday first.
pub const DAY_TOKENS: [&str; 7] = ["mon", "tu", "wed", "th", "fri", "sat", "sun"];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Month selector: everything, or a single month numbered 1-12.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthFilter {
    #[default]
    All,
    Month(u32),
}

/// Day selector: everything, or a single weekday numbered 0-6 from Monday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFilter {
    #[default]
    All,
    Day(u32),
}

impl MonthFilter {
    pub fn from_number(month: u32) -> Result<Self, BikeshareError> {
        if (1..=12).contains(&month) {
            Ok(MonthFilter::Month(month))
        } else {
            Err(BikeshareError::InvalidFilter {
                kind: "month",
                value: month.to_string(),
            })
        }
    }

    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

impl DayFilter {
    pub fn from_number(day: u32) -> Result<Self, BikeshareError> {
        if day < 7 {
            Ok(DayFilter::Day(day))
        } else {
            Err(BikeshareError::InvalidFilter {
                kind: "day",
                value: day.to_string(),
            })
        }
    }

    pub fn matches(self, day_of_week: u32) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == day_of_week,
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        if token == "all" {
            return Ok(MonthFilter::All);
        }
        MONTH_TOKENS
            .iter()
            .position(|t| *t == token)
            .map(|idx| MonthFilter::Month(idx as u32 + 1))
            .ok_or_else(|| BikeshareError::InvalidFilter {
                kind: "month",
                value: s.to_string(),
            })
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        if token == "all" {
            return Ok(DayFilter::All);
        }
        DAY_TOKENS
            .iter()
            .position(|t| *t == token)
            .map(|idx| DayFilter::Day(idx as u32))
            .ok_or_else(|| BikeshareError::InvalidFilter {
                kind: "day",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all months"),
            MonthFilter::Month(m) => f.write_str(month_name(*m)),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all days"),
            DayFilter::Day(d) => f.write_str(day_name(*d)),
        }
    }
}

/// The pair of selectors a session loads with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Filter {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    /// Parses both selectors, rejecting either before any data is read.
    pub fn parse(month: &str, day: &str) -> Result<Self, BikeshareError> {
        Ok(Self {
            month: month.parse()?,
            day: day.parse()?,
        })
    }

    /// Re-checks selectors built directly from numbers.
    pub fn validate(&self) -> Result<(), BikeshareError> {
        if let MonthFilter::Month(m) = self.month {
            MonthFilter::from_number(m)?;
        }
        if let DayFilter::Day(d) = self.day {
            DayFilter::from_number(d)?;
        }
        Ok(())
    }

    pub fn matches(&self, month: u32, day_of_week: u32) -> bool {
        self.month.matches(month) && self.day.matches(day_of_week)
    }
}

/// Full English month name for 1-12; "Unknown" otherwise.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Full English day name for 0-6 (Monday = 0); "Unknown" otherwise.
pub fn day_name(day: u32) -> &'static str {
    DAY_NAMES.get(day as usize).copied().unwrap_or("Unknown")
}
