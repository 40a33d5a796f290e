use log::trace;

use crate::{
    alignment_result::{Alignment, AlignmentResult},
    band_width::BandWidth,
    cost::AlignmentCost,
    error::{ConfigurationError, Error, Result},
};

use super::{
    AlignmentMatrix, BaseAlignmentType, index::AlignmentMatrixIndex, match_or_substitution,
};

impl<Cost: AlignmentCost> AlignmentMatrix<Cost> {
    /// Reconstructs an optimal alignment by walking from the final cell back to the origin.
    ///
    /// If multiple predecessors explain the cost of a cell, then a match or substitution is preferred
    /// over an insertion, which is preferred over a deletion.
    pub fn traceback<Symbol: Eq + Clone>(
        &self,
        reference: &[Symbol],
        query: &[Symbol],
        gap: &Symbol,
    ) -> Result<AlignmentResult<Symbol, Cost>> {
        if (reference.len(), query.len()) != (self.reference_length, self.query_length) {
            return Err(ConfigurationError::SequenceLengthMismatch {
                actual: (reference.len(), query.len()),
                expected: (self.reference_length, self.query_length),
            }
            .into());
        }

        let Some(cost) = self.final_cost() else {
            return Err(match self.band_width {
                BandWidth::Bounded(band_width) => Error::InfeasibleBand {
                    band_width,
                    reference_length: self.reference_length,
                    query_length: self.query_length,
                },
                // The full matrix reaches every cell.
                BandWidth::Unbounded => Error::InconsistentTable {
                    reference_index: self.reference_length,
                    query_index: self.query_length,
                },
            });
        };

        let mut aligned_reference = Vec::new();
        let mut aligned_query = Vec::new();
        let mut alignment = Alignment::new();
        let mut index = AlignmentMatrixIndex::new(self.reference_length, self.query_length);

        while index.reference_index > 0 || index.query_index > 0 {
            let alignment_type = if index.reference_index > 0 && index.query_index > 0 {
                self.traceback_step(index, reference, query)?
            } else if index.reference_index > 0 {
                BaseAlignmentType::Deletion
            } else {
                BaseAlignmentType::Insertion
            };
            trace!("Traceback {index:?} via {alignment_type:?}");

            match alignment_type {
                BaseAlignmentType::Match | BaseAlignmentType::Substitution => {
                    aligned_reference.push(reference[index.reference_index - 1].clone());
                    aligned_query.push(query[index.query_index - 1].clone());
                }
                BaseAlignmentType::Insertion => {
                    aligned_reference.push(gap.clone());
                    aligned_query.push(query[index.query_index - 1].clone());
                }
                BaseAlignmentType::Deletion => {
                    aligned_reference.push(reference[index.reference_index - 1].clone());
                    aligned_query.push(gap.clone());
                }
                BaseAlignmentType::None => unreachable!(),
            }

            alignment.push(alignment_type);
            index = index.predecessor(alignment_type);
        }

        // The traceback walks from the end to the start.
        aligned_reference.reverse();
        aligned_query.reverse();

        Ok(AlignmentResult::new(
            cost,
            aligned_reference,
            aligned_query,
            alignment.reverse(),
        ))
    }

    /// Selects the predecessor of an inner cell whose cost explains the cost of the cell.
    fn traceback_step<Symbol: Eq>(
        &self,
        index: AlignmentMatrixIndex,
        reference: &[Symbol],
        query: &[Symbol],
    ) -> Result<BaseAlignmentType> {
        let cost = self.cost(index);

        let match_or_substitution_cost =
            self.compute_match_or_substitution_cost(index, reference, query)?;
        if match_or_substitution_cost.is_some() && match_or_substitution_cost == cost {
            return Ok(match_or_substitution(index, reference, query));
        }

        let insertion_cost = self.compute_insertion_cost(index)?;
        if insertion_cost.is_some() && insertion_cost == cost {
            return Ok(BaseAlignmentType::Insertion);
        }

        let deletion_cost = self.compute_deletion_cost(index)?;
        if deletion_cost.is_some() && deletion_cost == cost {
            return Ok(BaseAlignmentType::Deletion);
        }

        Err(Error::InconsistentTable {
            reference_index: index.reference_index,
            query_index: index.query_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        alignment_configuration::AlignmentConfiguration,
        alignment_matrix::{AlignmentMatrix, index::AlignmentMatrixIndex},
        band_width::BandWidth,
        cost::I64Cost,
        error::{ConfigurationError, Error},
    };

    #[test]
    fn corrupted_matrix_is_inconsistent() {
        let mut matrix = AlignmentMatrix::<I64Cost>::new(
            AlignmentConfiguration::default(),
            BandWidth::Unbounded,
            2,
            2,
        );
        matrix.initialise().unwrap();
        matrix.manual_debug_fill(
            [-3, 2, 2, 100]
                .into_iter()
                .map(|cost: i64| Some(cost.into())),
        );

        assert_eq!(
            matrix.traceback(b"AC", b"AC", &b'-'),
            Err(Error::InconsistentTable {
                reference_index: 2,
                query_index: 2,
            })
        );
    }

    #[test]
    fn unreachable_inner_cell_is_inconsistent() {
        let mut matrix = AlignmentMatrix::<I64Cost>::new(
            AlignmentConfiguration::default(),
            BandWidth::Unbounded,
            1,
            1,
        );
        matrix.initialise().unwrap();
        matrix.manual_debug_fill([None]);

        assert_eq!(matrix.cost(AlignmentMatrixIndex::new(1, 1)), None);
        assert_eq!(
            matrix.traceback(b"A", b"A", &b'-'),
            Err(Error::InconsistentTable {
                reference_index: 1,
                query_index: 1,
            })
        );
    }

    #[test]
    fn sequences_must_match_the_matrix() {
        let matrix = AlignmentMatrix::<I64Cost>::build(
            AlignmentConfiguration::default(),
            BandWidth::Unbounded,
            b"ACG",
            b"AC",
        )
        .unwrap();

        assert_eq!(
            matrix.traceback(b"AC", b"AC", &b'-'),
            Err(Error::InvalidConfiguration(
                ConfigurationError::SequenceLengthMismatch {
                    actual: (2, 2),
                    expected: (3, 2),
                }
            ))
        );
    }

    #[test]
    fn infeasible_band() {
        let matrix = AlignmentMatrix::<I64Cost>::build(
            AlignmentConfiguration::default(),
            BandWidth::Bounded(1),
            b"ACGT",
            b"AC",
        )
        .unwrap();

        assert_eq!(
            matrix.traceback(b"ACGT", b"AC", &b'-'),
            Err(Error::InfeasibleBand {
                band_width: 1,
                reference_length: 4,
                query_length: 2,
            })
        );
    }

    #[test]
    fn cigar_of_traceback() {
        let matrix = AlignmentMatrix::<I64Cost>::build(
            AlignmentConfiguration::default(),
            BandWidth::Unbounded,
            b"ATGCATGC",
            b"ATGGTGC",
        )
        .unwrap();
        let result = matrix.traceback(b"ATGCATGC", b"ATGGTGC", &b'-').unwrap();

        assert_eq!(result.cost(), (-12).into());
        assert_eq!(result.aligned_reference(), b"ATGCATGC");
        assert_eq!(result.aligned_query(), b"ATG-GTGC");
        assert_eq!(result.cigar(), "3M1D1S3M");
    }
}
