//! Explicit category ordering for exceedance codes.

use boreas_io::{ExceedanceType, SchemaError};

/// An ordered, duplicate-free list of exceedance codes.
///
/// The order drives row order in long tables, column order in wide tables,
/// and facet/legend order in charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Levels(Vec<ExceedanceType>);

impl Levels {
    /// Builds a level list from codes in the desired order.
    ///
    /// # Errors
    ///
    /// [`SchemaError::EmptyLevels`] for an empty list,
    /// [`SchemaError::DuplicateLevel`] if a code repeats.
    pub fn new(codes: impl IntoIterator<Item = ExceedanceType>) -> Result<Self, SchemaError> {
        let mut out: Vec<ExceedanceType> = Vec::new();
        for code in codes {
            if out.contains(&code) {
                return Err(SchemaError::DuplicateLevel { code });
            }
            out.push(code);
        }
        if out.is_empty() {
            return Err(SchemaError::EmptyLevels);
        }
        Ok(Self(out))
    }

    /// Codes in declared order.
    pub fn as_slice(&self) -> &[ExceedanceType] {
        &self.0
    }

    /// Iterator over codes in declared order.
    pub fn iter(&self) -> impl Iterator<Item = ExceedanceType> + '_ {
        self.0.iter().copied()
    }

    /// Position of `code` in the ordering.
    pub fn position(&self, code: ExceedanceType) -> Option<usize> {
        self.0.iter().position(|&c| c == code)
    }

    /// Returns `true` if `code` is one of the levels.
    pub fn contains(&self, code: ExceedanceType) -> bool {
        self.0.contains(&code)
    }

    /// Returns a copy with `code` appended, or `self` unchanged if it is
    /// already present.
    pub fn with(&self, code: ExceedanceType) -> Self {
        let mut out = self.0.clone();
        if !out.contains(&code) {
            out.push(code);
        }
        Self(out)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; construction rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
