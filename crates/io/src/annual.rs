//! Annual exceedance-count table.

use std::collections::BTreeSet;

use crate::exceedance::ExceedanceType;

/// One annual count: the number of days in `year` that crossed the
/// threshold named by `exceedance_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnualObservation {
    /// Calendar year.
    pub year: i32,
    /// Which threshold was counted.
    pub exceedance_type: ExceedanceType,
    /// Number of days.
    pub count: u32,
}

impl AnnualObservation {
    /// Convenience constructor.
    pub fn new(year: i32, exceedance_type: ExceedanceType, count: u32) -> Self {
        Self {
            year,
            exceedance_type,
            count,
        }
    }
}

/// Long-format annual table as read from disk, in file order.
#[derive(Debug, Clone, Default)]
pub struct AnnualTable {
    rows: Vec<AnnualObservation>,
}

impl AnnualTable {
    /// Wraps rows that were built in memory.
    pub fn new(rows: Vec<AnnualObservation>) -> Self {
        Self { rows }
    }

    /// All rows, in input order.
    pub fn rows(&self) -> &[AnnualObservation] {
        &self.rows
    }

    /// Distinct years present in the table, ascending.
    pub fn years(&self) -> BTreeSet<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    /// Returns `true` if at least one row carries `code`.
    pub fn contains_type(&self, code: ExceedanceType) -> bool {
        self.rows.iter().any(|r| r.exceedance_type == code)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_are_distinct_and_sorted() {
        let table = AnnualTable::new(vec![
            AnnualObservation::new(1990, ExceedanceType::Dx90, 3),
            AnnualObservation::new(1950, ExceedanceType::Dx90, 1),
            AnnualObservation::new(1990, ExceedanceType::Dt32, 80),
        ]);
        assert_eq!(table.years().into_iter().collect::<Vec<_>>(), vec![1950, 1990]);
        assert!(table.contains_type(ExceedanceType::Dt32));
        assert!(!table.contains_type(ExceedanceType::Dt00));
        assert_eq!(table.len(), 3);
    }
}
