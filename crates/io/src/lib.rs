//! # boreas-io
//!
//! Read station records from CSV into typed in-memory tables.
//!
//! Two inputs are supported:
//!
//! - annual exceedance counts (`DX90`, `DT32`, `DT00`, `DP01`, `DP1X`, `DSNW`,
//!   `DSND`), one row per station, year and code;
//! - daily readings, of which only `PRCP` (tenths of millimeters) is used
//!   downstream.
//!
//! Both files must carry `date`, `datatype` and `value` columns. Any other
//! column (`station`, `attributes`, ...) is ignored.

mod annual;
mod daily;
mod error;
mod exceedance;
mod reader;

pub use annual::{AnnualObservation, AnnualTable};
pub use daily::{DailyObservation, DailyTable};
pub use error::{IoError, SchemaError};
pub use exceedance::ExceedanceType;
pub use reader::{REQUIRED_COLUMNS, read_annual, read_daily};
