//! Filter and pivot the long annual table.

use std::collections::{BTreeMap, BTreeSet};

use boreas_io::{AnnualTable, SchemaError};
use tracing::debug;

use crate::levels::Levels;
use crate::long::LongTable;
use crate::wide::WideTable;

/// Restrict `table` to the codes in `levels`, ordered by level then year.
///
/// # Errors
///
/// [`SchemaError::MissingTypeCode`] if a level has no rows at all.
pub fn filter_long(table: &AnnualTable, levels: &Levels) -> Result<LongTable, SchemaError> {
    let mut rows: Vec<_> = table
        .rows()
        .iter()
        .filter(|r| levels.contains(r.exceedance_type))
        .copied()
        .collect();

    if let Some(code) = levels
        .iter()
        .find(|&code| !rows.iter().any(|r| r.exceedance_type == code))
    {
        return Err(SchemaError::MissingTypeCode { code });
    }

    rows.sort_by_key(|r| (levels.position(r.exceedance_type), r.year));
    debug!(
        kept = rows.len(),
        dropped = table.len() - rows.len(),
        "filtered annual table"
    );
    Ok(LongTable::from_sorted(levels.clone(), rows))
}

/// Pivot a long table to one row per year and one column per level.
///
/// # Errors
///
/// [`SchemaError::DuplicateKey`] if a (year, code) pair occurs twice.
pub fn pivot_wider(long: &LongTable) -> Result<WideTable, SchemaError> {
    let mut years = BTreeSet::new();
    let mut cells = BTreeMap::new();
    for r in long.rows() {
        if cells.insert((r.year, r.exceedance_type), r.count).is_some() {
            return Err(SchemaError::DuplicateKey {
                year: r.year,
                code: r.exceedance_type,
            });
        }
        years.insert(r.year);
    }
    Ok(WideTable::from_parts(long.levels().clone(), years, cells))
}

/// [`filter_long`] followed by [`pivot_wider`].
pub fn reshape(table: &AnnualTable, levels: &Levels) -> Result<(LongTable, WideTable), SchemaError> {
    let long = filter_long(table, levels)?;
    let wide = pivot_wider(&long)?;
    Ok((long, wide))
}
