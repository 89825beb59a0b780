//! Series colors.

use boreas_io::ExceedanceType;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Default color for a series, from a colorblind-safe palette.
    pub fn for_series(series: ExceedanceType) -> Self {
        match series {
            ExceedanceType::Dx90 => Self(213, 94, 0),
            ExceedanceType::Dt32 => Self(0, 114, 178),
            ExceedanceType::Dt00 => Self(86, 180, 233),
            ExceedanceType::Dp01 => Self(230, 159, 0),
            ExceedanceType::Dp1x => Self(0, 158, 115),
            ExceedanceType::Dp2x => Self(204, 121, 167),
            ExceedanceType::Dsnw => Self(120, 120, 120),
            ExceedanceType::Dsnd => Self(60, 60, 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#1b9e77"), Some(Rgb(0x1b, 0x9e, 0x77)));
        assert_eq!(Rgb::from_hex("FFFFFF"), Some(Rgb(255, 255, 255)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(Rgb::from_hex("#ää00"), None);
        assert_eq!(Rgb::from_hex("#+1+2+3"), None);
        assert_eq!(Rgb::from_hex("#-1ff00"), None);
    }

    #[test]
    fn every_series_has_a_distinct_color() {
        let colors: Vec<Rgb> = ExceedanceType::ALL.into_iter().map(Rgb::for_series).collect();
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }
}
