use std::{fmt::Display, str::FromStr};

use crate::error::{ConfigurationError, Error};

/// Limits the alignment matrix to the cells within a fixed distance of the main diagonal.
///
/// A cell `(reference_index, query_index)` lies inside a band of width `w` if
/// `|reference_index - query_index| <= w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandWidth {
    /// Compute the full matrix.
    #[default]
    Unbounded,
    Bounded(usize),
}

impl BandWidth {
    pub fn contains(&self, reference_index: usize, query_index: usize) -> bool {
        match self {
            BandWidth::Unbounded => true,
            BandWidth::Bounded(band_width) => reference_index.abs_diff(query_index) <= *band_width,
        }
    }

    /// The inclusive range of query indices inside the band in the given row.
    ///
    /// The range is not limited by the query length.
    pub fn query_range(&self, reference_index: usize) -> (usize, usize) {
        match self {
            BandWidth::Unbounded => (0, usize::MAX),
            BandWidth::Bounded(band_width) => (
                reference_index.saturating_sub(*band_width),
                reference_index.saturating_add(*band_width),
            ),
        }
    }
}

impl TryFrom<i64> for BandWidth {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .map(BandWidth::Bounded)
            .map_err(|_| ConfigurationError::NegativeBandWidth(value).into())
    }
}

impl FromStr for BandWidth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unbounded") {
            return Ok(BandWidth::Unbounded);
        }

        let value: i64 = s
            .parse()
            .map_err(|_| ConfigurationError::UnparseableBandWidth(s.to_string()))?;
        value.try_into()
    }
}

impl Display for BandWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandWidth::Unbounded => write!(f, "unbounded"),
            BandWidth::Bounded(band_width) => write!(f, "{band_width}"),
        }
    }
}
