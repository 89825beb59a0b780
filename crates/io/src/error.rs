//! Error types for boreas-io.

use std::path::PathBuf;

use crate::exceedance::ExceedanceType;

/// Error type for all fallible reads in the boreas-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when an input file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when an input file exists but cannot be opened.
    #[error("cannot read {}: {reason}", path.display())]
    Read {
        /// Path that failed to open.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Wraps an error originating from the CSV parser.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// The file was readable but its contents do not match the expected shape.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

/// Schema violations: missing columns, unreadable cells, or tables whose
/// shape cannot feed the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// One or more required columns are absent from the header row.
    #[error("missing required column(s) [{}] in {}", columns.join(", "), path.display())]
    MissingColumns {
        /// Names of the absent columns, in declaration order.
        columns: Vec<String>,
        /// File that was inspected.
        path: PathBuf,
    },

    /// A `date` cell could not be parsed as a calendar date.
    #[error("line {line}: invalid date '{value}'")]
    InvalidDate {
        /// 1-based CSV line number.
        line: u64,
        /// Raw cell content.
        value: String,
    },

    /// A `value` cell could not be interpreted.
    #[error("line {line}: invalid value '{value}' ({reason})")]
    InvalidValue {
        /// 1-based CSV line number.
        line: u64,
        /// Raw cell content.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A string is not one of the known exceedance codes.
    #[error("unknown exceedance code '{code}'")]
    UnknownTypeCode {
        /// The rejected code.
        code: String,
    },

    /// A required exceedance code has no rows in the input.
    #[error("exceedance code {code} not present in input")]
    MissingTypeCode {
        /// The code that was expected.
        code: ExceedanceType,
    },

    /// The same (year, code) pair occurs more than once.
    #[error("duplicate entry for {code} in {year}")]
    DuplicateKey {
        /// Year of the repeated entry.
        year: i32,
        /// Code of the repeated entry.
        code: ExceedanceType,
    },

    /// A category ordering lists the same code twice.
    #[error("level {code} declared more than once")]
    DuplicateLevel {
        /// The repeated code.
        code: ExceedanceType,
    },

    /// A category ordering with no codes.
    #[error("at least one exceedance code must be retained")]
    EmptyLevels,
}
