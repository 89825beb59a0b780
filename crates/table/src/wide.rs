//! Wide-format annual table: one row per year, one column per level.

use std::collections::{BTreeMap, BTreeSet};

use boreas_io::{AnnualObservation, ExceedanceType};
use tracing::{debug, warn};

use crate::levels::Levels;
use crate::long::LongTable;

/// Annual counts keyed by (year, code).
///
/// `years` is the row index. A cell absent from `cells` is a missing value
/// for that year and code.
#[derive(Debug, Clone)]
pub struct WideTable {
    levels: Levels,
    years: BTreeSet<i32>,
    cells: BTreeMap<(i32, ExceedanceType), u32>,
}

impl WideTable {
    pub(crate) fn from_parts(
        levels: Levels,
        years: BTreeSet<i32>,
        cells: BTreeMap<(i32, ExceedanceType), u32>,
    ) -> Self {
        Self {
            levels,
            years,
            cells,
        }
    }

    /// Column ordering.
    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    /// Row index, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    /// Number of rows.
    pub fn n_years(&self) -> usize {
        self.years.len()
    }

    /// Cell value, `None` if missing or not a column.
    pub fn get(&self, year: i32, code: ExceedanceType) -> Option<u32> {
        self.cells.get(&(year, code)).copied()
    }

    /// One row in level order, or `None` if `year` is not a row.
    pub fn row(&self, year: i32) -> Option<Vec<Option<u32>>> {
        if !self.years.contains(&year) {
            return None;
        }
        Some(self.levels.iter().map(|c| self.get(year, c)).collect())
    }

    /// Ordered (year, count) pairs for one column, skipping missing cells.
    /// Returns `None` if `code` is not a column.
    pub fn series(&self, code: ExceedanceType) -> Option<Vec<(i32, f64)>> {
        if !self.levels.contains(code) {
            return None;
        }
        Some(
            self.years
                .iter()
                .filter_map(|&y| self.get(y, code).map(|c| (y, f64::from(c))))
                .collect(),
        )
    }

    /// Unpivot back to long format: rows grouped by level in declared order,
    /// ascending by year within a level. Missing cells produce no row.
    pub fn to_long(&self) -> LongTable {
        let mut rows = Vec::with_capacity(self.cells.len());
        for code in self.levels.iter() {
            for &year in &self.years {
                if let Some(count) = self.get(year, code) {
                    rows.push(AnnualObservation::new(year, code, count));
                }
            }
        }
        LongTable::from_sorted(self.levels.clone(), rows)
    }

    /// Left join a per-year metric onto this table as column `code`.
    ///
    /// Every existing year receives `counts[year]`, or `fill` when the map has
    /// no entry for it. Years present only in `counts` are not added. If
    /// `code` is already a column it is replaced.
    pub fn left_join_fill(
        &self,
        code: ExceedanceType,
        counts: &BTreeMap<i32, u32>,
        fill: u32,
    ) -> WideTable {
        let mut cells = self.cells.clone();
        if self.levels.contains(code) {
            warn!(%code, "replacing existing column");
            cells.retain(|&(_, c), _| c != code);
        }

        let mut n_filled = 0usize;
        for &year in &self.years {
            let value = match counts.get(&year) {
                Some(&v) => v,
                None => {
                    n_filled += 1;
                    fill
                }
            };
            cells.insert((year, code), value);
        }

        let n_unmatched = counts.keys().filter(|y| !self.years.contains(y)).count();
        debug!(%code, n_filled, n_unmatched, "joined derived column");

        WideTable::from_parts(self.levels.with(code), self.years.clone(), cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExceedanceType::*;

    fn sample() -> WideTable {
        let levels = Levels::new([Dx90, Dt32]).unwrap();
        let years: BTreeSet<i32> = [1950, 1951, 1952].into_iter().collect();
        let mut cells = BTreeMap::new();
        cells.insert((1950, Dx90), 10);
        cells.insert((1951, Dx90), 12);
        cells.insert((1952, Dx90), 9);
        cells.insert((1950, Dt32), 90);
        cells.insert((1952, Dt32), 95);
        WideTable::from_parts(levels, years, cells)
    }

    #[test]
    fn row_follows_level_order() {
        let wide = sample();
        assert_eq!(wide.row(1951), Some(vec![Some(12), None]));
        assert_eq!(wide.row(1949), None);
    }

    #[test]
    fn series_skips_missing_cells() {
        let wide = sample();
        assert_eq!(
            wide.series(Dt32),
            Some(vec![(1950, 90.0), (1952, 95.0)])
        );
        assert_eq!(wide.series(Dp2x), None);
    }

    #[test]
    fn to_long_groups_by_level() {
        let long = sample().to_long();
        let codes: Vec<_> = long.rows().iter().map(|r| r.exceedance_type).collect();
        assert_eq!(codes, vec![Dx90, Dx90, Dx90, Dt32, Dt32]);
        assert_eq!(long.points(Dt32), vec![(1950, 90), (1952, 95)]);
    }

    #[test]
    fn left_join_fill_keeps_every_base_year() {
        let wide = sample();
        let counts: BTreeMap<i32, u32> = [(1951, 2), (1990, 5)].into_iter().collect();

        let joined = wide.left_join_fill(Dp2x, &counts, 0);

        assert_eq!(joined.n_years(), 3);
        assert_eq!(joined.get(1950, Dp2x), Some(0));
        assert_eq!(joined.get(1951, Dp2x), Some(2));
        assert_eq!(joined.get(1952, Dp2x), Some(0));
        assert_eq!(joined.get(1990, Dp2x), None);
        assert_eq!(joined.levels().as_slice(), &[Dx90, Dt32, Dp2x]);
        // The source table is untouched.
        assert_eq!(wide.get(1951, Dp2x), None);
    }

    #[test]
    fn left_join_fill_replaces_existing_column() {
        let wide = sample();
        let counts: BTreeMap<i32, u32> = [(1950, 1)].into_iter().collect();

        let joined = wide.left_join_fill(Dt32, &counts, 0);

        assert_eq!(joined.levels().as_slice(), &[Dx90, Dt32]);
        assert_eq!(joined.get(1950, Dt32), Some(1));
        assert_eq!(joined.get(1952, Dt32), Some(0));
    }
}
