//! Behaviour flags for [`GeoUri`](super::GeoUri).

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A set of codec flags, fixed when a [`GeoUri`](super::GeoUri) is created.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeoUriOptions(u32);

impl GeoUriOptions {
    /// No flags set.
    pub const DEFAULT: Self = Self(0);

    /// Formatting: also write latitude/longitude into `q`.
    ///
    /// `geo:52.1,9.2?q=52.1,9.2` is understood by consumers that only read
    /// the query, where plain `geo:52.1,9.2` is not.
    pub const FORMAT_REDUNDANT_LAT_LON: Self = Self(0x1);

    /// Parsing: fill missing name, time, coordinates, link and symbol from
    /// the description and any other query value.
    ///
    /// `geo:?d=I was in (Hamburg) located at 53,10 on 1991-03-03T04:05:06Z`
    /// then yields name, coordinates and time.
    pub const PARSE_INFER_MISSING: Self = Self(0x100);

    /// Builds a flag set from raw bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every flag in `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for GeoUriOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for GeoUriOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for GeoUriOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::FORMAT_REDUNDANT_LAT_LON) {
            names.push("FORMAT_REDUNDANT_LAT_LON");
        }
        if self.contains(Self::PARSE_INFER_MISSING) {
            names.push("PARSE_INFER_MISSING");
        }
        if names.is_empty() {
            names.push("DEFAULT");
        }
        write!(f, "GeoUriOptions({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_contains_nothing_but_itself() {
        let opts = GeoUriOptions::default();
        assert_eq!(opts, GeoUriOptions::DEFAULT);
        assert!(opts.contains(GeoUriOptions::DEFAULT));
        assert!(!opts.contains(GeoUriOptions::FORMAT_REDUNDANT_LAT_LON));
        assert!(!opts.contains(GeoUriOptions::PARSE_INFER_MISSING));
    }

    #[test]
    fn flags_combine() {
        let mut opts = GeoUriOptions::FORMAT_REDUNDANT_LAT_LON;
        opts |= GeoUriOptions::PARSE_INFER_MISSING;

        assert_eq!(opts.bits(), 0x101);
        assert_eq!(
            opts,
            GeoUriOptions::FORMAT_REDUNDANT_LAT_LON | GeoUriOptions::PARSE_INFER_MISSING
        );
        assert!(opts.contains(GeoUriOptions::PARSE_INFER_MISSING));
    }

    #[test]
    fn debug_lists_flag_names() {
        assert_eq!(
            format!("{:?}", GeoUriOptions::from_bits(0x101)),
            "GeoUriOptions(FORMAT_REDUNDANT_LAT_LON | PARSE_INFER_MISSING)"
        );
        assert_eq!(
            format!("{:?}", GeoUriOptions::DEFAULT),
            "GeoUriOptions(DEFAULT)"
        );
    }
}
