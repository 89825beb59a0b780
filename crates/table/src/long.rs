//! Long-format table restricted to an explicit set of levels.

use boreas_io::{AnnualObservation, ExceedanceType};

use crate::levels::Levels;

/// One row per (year, code), sorted by level position then year.
#[derive(Debug, Clone)]
pub struct LongTable {
    levels: Levels,
    rows: Vec<AnnualObservation>,
}

impl LongTable {
    /// Caller guarantees every row's code is in `levels` and rows are sorted.
    pub(crate) fn from_sorted(levels: Levels, rows: Vec<AnnualObservation>) -> Self {
        Self { levels, rows }
    }

    /// The category ordering of this table.
    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    /// All rows, grouped by level in declared order.
    pub fn rows(&self) -> &[AnnualObservation] {
        &self.rows
    }

    /// Observed (year, count) points for one code, ascending by year.
    pub fn points(&self, code: ExceedanceType) -> Vec<(i32, u32)> {
        self.rows
            .iter()
            .filter(|r| r.exceedance_type == code)
            .map(|r| (r.year, r.count))
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
