//! # boreas-table
//!
//! Reshaping and derived metrics over the annual exceedance table.
//!
//! ```text
//! AnnualTable --filter_long--> LongTable --pivot_wider--> WideTable
//!                                   ^                         |
//!                                   +-------- to_long --------+
//!
//! DailyTable --count_heavy_rain_days--> year -> count --left_join_fill--> WideTable
//! ```
//!
//! Every table is an immutable value; each operation returns a new one.

mod derive;
mod levels;
mod long;
mod reshape;
mod wide;

pub use derive::{HeavyRainConfig, THRESHOLD_TOLERANCE, count_heavy_rain_days};
pub use levels::Levels;
pub use long::LongTable;
pub use reshape::{filter_long, pivot_wider, reshape};
pub use wide::WideTable;
