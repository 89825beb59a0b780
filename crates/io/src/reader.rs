//! CSV readers for the annual and daily station files.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::annual::{AnnualObservation, AnnualTable};
use crate::daily::{DailyObservation, DailyTable};
use crate::error::{IoError, SchemaError};
use crate::exceedance::ExceedanceType;

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "datatype", "value"];

/// The subset of columns the pipeline reads. Anything else in the header
/// (`station`, `attributes`, ...) is ignored by the deserializer.
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    datatype: String,
    value: String,
}

/// A deserialized record with its 1-based line number.
struct Located {
    line: u64,
    record: RawRecord,
}

// ---------------------------------------------------------------------------
// read_annual
// ---------------------------------------------------------------------------

/// Read an annual exceedance-count file.
///
/// Rows whose `datatype` is not one of the source exceedance codes are
/// skipped. Rows with a blank `value` are skipped with a warning.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] / [`IoError::Read`] if the file cannot be opened.
/// - [`SchemaError::MissingColumns`] if `date`, `datatype` or `value` is absent.
/// - [`SchemaError::InvalidDate`] for an unparseable date.
/// - [`SchemaError::InvalidValue`] for a count that is not a non-negative
///   integer.
pub fn read_annual(path: &Path) -> Result<AnnualTable, IoError> {
    let records = read_records(path)?;

    let mut rows = Vec::with_capacity(records.len());
    let mut skipped_codes = 0usize;
    let mut skipped_blank = 0usize;

    for Located { line, record } in records {
        let date = parse_date(&record.date).ok_or_else(|| SchemaError::InvalidDate {
            line,
            value: record.date.clone(),
        })?;

        let code = match ExceedanceType::from_code(&record.datatype) {
            Some(code) if !code.is_derived() => code,
            _ => {
                debug!(line, datatype = %record.datatype, "skipping non-exceedance row");
                skipped_codes += 1;
                continue;
            }
        };

        match parse_count(&record.value, line)? {
            Some(count) => rows.push(AnnualObservation::new(date.year(), code, count)),
            None => {
                warn!(line, %code, year = date.year(), "blank annual value skipped");
                skipped_blank += 1;
            }
        }
    }

    info!(
        path = %path.display(),
        n_rows = rows.len(),
        skipped_codes,
        skipped_blank,
        "annual records loaded"
    );
    Ok(AnnualTable::new(rows))
}

// ---------------------------------------------------------------------------
// read_daily
// ---------------------------------------------------------------------------

/// Read a daily readings file.
///
/// Every row is kept regardless of its element code; a blank `value` becomes
/// `None`.
///
/// # Errors
///
/// Same as [`read_annual`], except that any finite number is a valid value.
pub fn read_daily(path: &Path) -> Result<DailyTable, IoError> {
    let records = read_records(path)?;

    let mut rows = Vec::with_capacity(records.len());
    for Located { line, record } in records {
        let date = parse_date(&record.date).ok_or_else(|| SchemaError::InvalidDate {
            line,
            value: record.date.clone(),
        })?;
        let value = parse_reading(&record.value, line)?;
        rows.push(DailyObservation::new(date, record.datatype, value));
    }

    let n_missing = rows.iter().filter(|r| r.value.is_none()).count();
    info!(
        path = %path.display(),
        n_rows = rows.len(),
        n_missing,
        "daily records loaded"
    );
    Ok(DailyTable::new(rows))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Open `path`, check the header row and deserialize every record.
fn read_records(path: &Path) -> Result<Vec<Located>, IoError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);
    let headers = reader.headers()?.clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns {
            columns: missing,
            path: path.to_path_buf(),
        }
        .into());
    }

    let mut out = Vec::new();
    for result in reader.records() {
        let raw = result?;
        let line = raw.position().map_or(0, |p| p.line());
        let record: RawRecord = raw.deserialize(Some(&headers))?;
        out.push(Located { line, record });
    }
    Ok(out)
}

/// Parse the date part of a `date` cell. Accepts `YYYY-MM-DD` with an
/// optional `T...` time suffix, as written by the NOAA CDO export.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split_once('T').map_or(raw, |(d, _)| d);
    NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d").ok()
}

/// Annual counts: blank is `None`, otherwise a non-negative whole number.
fn parse_count(raw: &str, line: u64) -> Result<Option<u32>, SchemaError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let invalid = |reason: &str| SchemaError::InvalidValue {
        line,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let v: f64 = raw.parse().map_err(|_| invalid("not a number"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(invalid("counts must be non-negative"));
    }
    if v.fract() != 0.0 || v > f64::from(u32::MAX) {
        return Err(invalid("counts must be whole days"));
    }
    Ok(Some(v as u32))
}

/// Daily readings: blank is `None`, otherwise any finite number.
fn parse_reading(raw: &str, line: u64) -> Result<Option<f64>, SchemaError> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(SchemaError::InvalidValue {
            line,
            value: raw.to_string(),
            reason: "not a finite number".to_string(),
        }),
    }
}
