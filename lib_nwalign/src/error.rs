use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("The alignment configuration is invalid: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    #[error(
        "The band of width {band_width} excludes the final cell of the {reference_length}x{query_length} alignment matrix."
    )]
    InfeasibleBand {
        band_width: usize,
        reference_length: usize,
        query_length: usize,
    },

    #[error(
        "No predecessor of cell ({reference_index}, {query_index}) explains its cost, the alignment matrix is inconsistent."
    )]
    InconsistentTable {
        reference_index: usize,
        query_index: usize,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("the band width must not be negative, but is {0}.")]
    NegativeBandWidth(i64),

    #[error("the band width '{0}' is neither 'unbounded' nor a non-negative integer.")]
    UnparseableBandWidth(String),

    #[error("the {name} '{value}' is not representable by the chosen cost type.")]
    UnrepresentableCost { name: &'static str, value: String },

    #[error(
        "the costs exceed the range of the chosen cost type in cell ({reference_index}, {query_index})."
    )]
    CostOverflow {
        reference_index: usize,
        query_index: usize,
    },

    #[error("the gap symbol occurs in the reference at position {0}.")]
    GapInReference(usize),

    #[error("the gap symbol occurs in the query at position {0}.")]
    GapInQuery(usize),

    #[error(
        "the sequences have lengths {actual:?}, but the alignment matrix was built for lengths {expected:?}."
    )]
    SequenceLengthMismatch {
        actual: (usize, usize),
        expected: (usize, usize),
    },
}
