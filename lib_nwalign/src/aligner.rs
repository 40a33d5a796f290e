use log::{debug, log_enabled, trace};

use crate::{
    alignment_configuration::AlignmentConfiguration,
    alignment_matrix::AlignmentMatrix,
    alignment_result::AlignmentResult,
    band_width::BandWidth,
    cost::AlignmentCost,
    error::{ConfigurationError, Result},
};

/// Computes an optimal global alignment of `reference` and `query` with the Needleman-Wunsch algorithm.
///
/// With a bounded band width, only alignments that stay within the band are considered.
/// If the band excludes the final cell of the matrix, then [`Error::InfeasibleBand`](crate::error::Error::InfeasibleBand)
/// is returned, and the caller may retry with a wider band.
pub fn needleman_wunsch_align<Symbol: Eq + Clone, Cost: AlignmentCost>(
    reference: &[Symbol],
    query: &[Symbol],
    configuration: &AlignmentConfiguration<Cost>,
    band_width: BandWidth,
    gap: &Symbol,
) -> Result<AlignmentResult<Symbol, Cost>> {
    check_gap_symbol(reference, query, gap)?;

    let matrix = AlignmentMatrix::build(configuration.clone(), band_width, reference, query)?;
    if log_enabled!(log::Level::Trace) {
        trace!("Alignment matrix:\n{matrix}");
    }

    let result = matrix.traceback(reference, query, gap)?;
    debug!("Alignment cost: {}", result.cost());
    Ok(result)
}

/// Fails if the gap symbol occurs in one of the sequences.
pub fn check_gap_symbol<Symbol: Eq>(
    reference: &[Symbol],
    query: &[Symbol],
    gap: &Symbol,
) -> std::result::Result<(), ConfigurationError> {
    if let Some(position) = reference.iter().position(|symbol| symbol == gap) {
        return Err(ConfigurationError::GapInReference(position));
    }
    if let Some(position) = query.iter().position(|symbol| symbol == gap) {
        return Err(ConfigurationError::GapInQuery(position));
    }
    Ok(())
}
