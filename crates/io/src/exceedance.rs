//! Exceedance-type codes.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// Closed set of annual exceedance codes.
///
/// The declaration order is the default category order: temperature series
/// first, then precipitation and snow. Charts and reshaping take an explicit
/// ordering of their own, so this order only matters for [`Self::ALL`] and
/// `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExceedanceType {
    /// Days with maximum temperature at or above 90°F.
    Dx90,
    /// Days with maximum temperature at or below 32°F.
    Dt32,
    /// Days with minimum temperature at or below 0°F.
    Dt00,
    /// Days with at least 0.01 inch of precipitation.
    Dp01,
    /// Days with at least 1 inch of precipitation.
    Dp1x,
    /// Days with at least 2 inches of precipitation. Derived from daily
    /// `PRCP` readings, never read from the annual file.
    Dp2x,
    /// Days with at least 1 inch of snowfall.
    Dsnw,
    /// Days with at least 1 inch of snow depth.
    Dsnd,
}

impl ExceedanceType {
    /// Every code, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Dx90,
        Self::Dt32,
        Self::Dt00,
        Self::Dp01,
        Self::Dp1x,
        Self::Dp2x,
        Self::Dsnw,
        Self::Dsnd,
    ];

    /// The code as it appears in the `datatype` column.
    pub fn code(self) -> &'static str {
        match self {
            Self::Dx90 => "DX90",
            Self::Dt32 => "DT32",
            Self::Dt00 => "DT00",
            Self::Dp01 => "DP01",
            Self::Dp1x => "DP1X",
            Self::Dp2x => "DP2X",
            Self::Dsnw => "DSNW",
            Self::Dsnd => "DSND",
        }
    }

    /// Human-readable name used for facet titles and legend entries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dx90 => "Above 90°F",
            Self::Dt32 => "Below Freezing",
            Self::Dt00 => "Below Zero",
            Self::Dp01 => "> 0.01 inch Precip.",
            Self::Dp1x => "> 1 inch Precip.",
            Self::Dp2x => ">2 inch Precip.",
            Self::Dsnw => "Snowfall ≥ 1 inch",
            Self::Dsnd => "Snow Depth ≥ 1 inch",
        }
    }

    /// Returns `true` for codes computed by the pipeline rather than read.
    pub fn is_derived(self) -> bool {
        matches!(self, Self::Dp2x)
    }

    /// Looks up a code exactly as written in the source files.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for ExceedanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ExceedanceType {
    type Err = SchemaError;

    /// Case-insensitive parse, for codes typed into configuration files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::from_code(&upper).ok_or_else(|| SchemaError::UnknownTypeCode {
            code: s.to_string(),
        })
    }
}
