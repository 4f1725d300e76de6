//! Trip aggregation routines.
//!
//! Each routine is a pure function of a loaded [`Dataset`](crate::dataset::Dataset):
//! popular travel times, popular stations, trip durations and rider
//! demographics. None of them depends on another.

pub mod duration_stats;
pub mod station_stats;
pub mod time_stats;
pub mod types;
pub mod user_stats;
pub mod utility;

pub use duration_stats::compute_duration_stats;
pub use station_stats::compute_station_stats;
pub use time_stats::compute_time_stats;
pub use user_stats::compute_user_stats;
