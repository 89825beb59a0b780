//! Daily readings table.

use chrono::{Datelike, NaiveDate};

/// One daily reading.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservation {
    /// Observation date.
    pub date: NaiveDate,
    /// Element code from the `datatype` column, e.g. `PRCP`.
    pub element: String,
    /// Reported value in the element's native unit (tenths of millimeters for
    /// `PRCP`). `None` when the cell was blank.
    pub value: Option<f64>,
}

impl DailyObservation {
    /// Convenience constructor.
    pub fn new(date: NaiveDate, element: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            date,
            element: element.into(),
            value,
        }
    }

    /// Calendar year of the reading.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// Daily readings in file order.
#[derive(Debug, Clone, Default)]
pub struct DailyTable {
    rows: Vec<DailyObservation>,
}

impl DailyTable {
    /// Wraps rows that were built in memory.
    pub fn new(rows: Vec<DailyObservation>) -> Self {
        Self { rows }
    }

    /// All rows, in input order.
    pub fn rows(&self) -> &[DailyObservation] {
        &self.rows
    }

    /// Iterator over rows for a single element code.
    pub fn element<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a DailyObservation> {
        self.rows.iter().filter(move |r| r.element == code)
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
    fn element_filter_and_year() {
        let d = NaiveDate::from_ymd_opt(1962, 7, 4).unwrap();
        let table = DailyTable::new(vec![
            DailyObservation::new(d, "PRCP", Some(25.0)),
            DailyObservation::new(d, "SNOW", Some(0.0)),
            DailyObservation::new(d, "PRCP", None),
        ]);
        let prcp: Vec<_> = table.element("PRCP").collect();
        assert_eq!(prcp.len(), 2);
        assert_eq!(prcp[0].year(), 1962);
        assert_eq!(prcp[1].value, None);
    }
}
