use crate::{
    alignment_matrix::BaseAlignmentType,
    cost::AlignmentCost,
    error::{ConfigurationError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentConfiguration<Cost> {
    pub match_cost: Cost,
    pub substitution_cost: Cost,
    /// The cost of a gap in either sequence.
    pub indel_cost: Cost,
}

impl<Cost: Copy> AlignmentConfiguration<Cost> {
    pub fn cost(&self, alignment_type: BaseAlignmentType) -> Cost {
        match alignment_type {
            BaseAlignmentType::None => {
                panic!("Alignment type 'None' has no cost")
            }
            BaseAlignmentType::Insertion | BaseAlignmentType::Deletion => self.indel_cost,
            BaseAlignmentType::Match => self.match_cost,
            BaseAlignmentType::Substitution => self.substitution_cost,
        }
    }
}

impl<Cost: AlignmentCost> AlignmentConfiguration<Cost> {
    /// Converts floating point costs into the cost type.
    ///
    /// Fails if a value is NaN or infinite, or if it cannot be represented by `Cost`
    /// (e.g. a fractional value for an integer cost type).
    pub fn try_from_f64(match_cost: f64, substitution_cost: f64, indel_cost: f64) -> Result<Self> {
        Ok(Self {
            match_cost: convert_cost("match cost", match_cost)?,
            substitution_cost: convert_cost("substitution cost", substitution_cost)?,
            indel_cost: convert_cost("indel cost", indel_cost)?,
        })
    }
}

/// Converts a single floating point cost, using `name` to identify it in errors.
pub fn convert_cost<Cost: AlignmentCost>(
    name: &'static str,
    value: f64,
) -> std::result::Result<Cost, ConfigurationError> {
    Cost::try_from_f64(value).ok_or_else(|| ConfigurationError::UnrepresentableCost {
        name,
        value: value.to_string(),
    })
}

impl<Cost: AlignmentCost> Default for AlignmentConfiguration<Cost> {
    fn default() -> Self {
        Self {
            match_cost: Cost::from_i32(-3),
            substitution_cost: Cost::from_i32(1),
            indel_cost: Cost::from_i32(5),
        }
    }
}
