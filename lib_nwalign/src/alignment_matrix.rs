use index::{
    AlignmentMatrixIndex,
    iterators::{
        AlignmentMatrixInnerIterator, AlignmentMatrixQueryIterator,
        AlignmentMatrixReferenceIterator,
    },
};
use log::debug;
use ndarray::Array2;

use crate::{
    alignment_configuration::AlignmentConfiguration,
    band_width::BandWidth,
    cost::AlignmentCost,
    error::{ConfigurationError, Result},
};

pub mod index;
mod traceback;

/// The dynamic programming table of a global alignment.
///
/// In banded mode, only the cells within the band are stored, using one row of `2 * band_width + 1`
/// cells per reference index. Cells outside of the band are unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentMatrix<Cost> {
    matrix: Array2<Option<Cost>>,
    configuration: AlignmentConfiguration<Cost>,
    band_width: BandWidth,
    reference_length: usize,
    query_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseAlignmentType {
    /// Marks the matrix origin at [0, 0].
    None,
    /// A query character aligned to a gap in the reference.
    Insertion,
    /// A reference character aligned to a gap in the query.
    Deletion,
    Match,
    Substitution,
}

impl<Cost: AlignmentCost> AlignmentMatrix<Cost> {
    fn new(
        configuration: AlignmentConfiguration<Cost>,
        band_width: BandWidth,
        reference_length: usize,
        query_length: usize,
    ) -> Self {
        let band_width = match band_width {
            BandWidth::Bounded(band_width) if band_width >= reference_length.max(query_length) => {
                debug!("Band width {band_width} covers the whole matrix, computing it fully");
                BandWidth::Unbounded
            }
            band_width => band_width,
        };
        let columns = match band_width {
            BandWidth::Unbounded => query_length + 1,
            BandWidth::Bounded(band_width) => 2 * band_width + 1,
        };

        Self {
            matrix: Array2::default((reference_length + 1, columns)),
            configuration,
            band_width,
            reference_length,
            query_length,
        }
    }

    /// Computes the cost of all cells inside the band.
    ///
    /// If the band excludes the final cell, then [`Self::final_cost`] is `None`.
    /// Fails if a cell cost is not representable by `Cost`.
    pub fn build<Symbol: Eq>(
        configuration: AlignmentConfiguration<Cost>,
        band_width: BandWidth,
        reference: &[Symbol],
        query: &[Symbol],
    ) -> Result<Self> {
        let mut matrix = Self::new(configuration, band_width, reference.len(), query.len());
        debug!(
            "Building {}x{} alignment matrix with band width {}",
            matrix.reference_length + 1,
            matrix.query_length + 1,
            matrix.band_width,
        );

        matrix.initialise()?;
        matrix.align_inner(reference, query)?;
        Ok(matrix)
    }

    pub fn configuration(&self) -> &AlignmentConfiguration<Cost> {
        &self.configuration
    }

    /// The band width used for computation.
    ///
    /// Band widths that cover the whole matrix are reported as [`BandWidth::Unbounded`].
    pub fn band_width(&self) -> BandWidth {
        self.band_width
    }

    pub fn reference_length(&self) -> usize {
        self.reference_length
    }

    pub fn query_length(&self) -> usize {
        self.query_length
    }

    /// Returns the cost of the given cell, or `None` if it is unreachable.
    pub fn cost(&self, index: AlignmentMatrixIndex) -> Option<Cost> {
        self.storage_index(index).and_then(|index| self.matrix[index])
    }

    /// The cost of aligning the complete reference to the complete query.
    pub fn final_cost(&self) -> Option<Cost> {
        self.cost(AlignmentMatrixIndex::new(
            self.reference_length,
            self.query_length,
        ))
    }

    fn storage_index(&self, index: AlignmentMatrixIndex) -> Option<[usize; 2]> {
        let AlignmentMatrixIndex {
            reference_index,
            query_index,
        } = index;

        if reference_index > self.reference_length
            || query_index > self.query_length
            || !self.band_width.contains(reference_index, query_index)
        {
            return None;
        }

        Some(match self.band_width {
            BandWidth::Unbounded => [reference_index, query_index],
            BandWidth::Bounded(band_width) => {
                [reference_index, query_index + band_width - reference_index]
            }
        })
    }

    fn first_column_index_iter(&self) -> AlignmentMatrixReferenceIterator {
        let (_, last_reference_index) = self.band_width.query_range(0);
        AlignmentMatrixReferenceIterator::new(
            0,
            last_reference_index.min(self.reference_length) + 1,
        )
    }

    fn first_row_index_iter(&self) -> AlignmentMatrixQueryIterator {
        let (_, last_query_index) = self.band_width.query_range(0);
        AlignmentMatrixQueryIterator::new(0, last_query_index.min(self.query_length) + 1)
    }

    fn inner_index_iter(&self) -> AlignmentMatrixInnerIterator {
        AlignmentMatrixInnerIterator::new(self.reference_length, self.query_length, self.band_width)
    }

    fn initialise(&mut self) -> Result<()> {
        // Initialise matrix origin.
        self.set_cost(AlignmentMatrixIndex::new(0, 0), Some(Cost::zero()));

        // Initialise matrix edges.
        for index in self.first_column_index_iter().skip(1) {
            let cost = self.compute_deletion_cost(index)?;
            self.set_cost(index, cost);
        }
        for index in self.first_row_index_iter().skip(1) {
            let cost = self.compute_insertion_cost(index)?;
            self.set_cost(index, cost);
        }

        Ok(())
    }

    fn align_inner<Symbol: Eq>(&mut self, reference: &[Symbol], query: &[Symbol]) -> Result<()> {
        for index in self.inner_index_iter() {
            let cost = self.compute_min_cost(index, reference, query)?;
            self.set_cost(index, cost);
        }

        Ok(())
    }

    fn set_cost(&mut self, index: AlignmentMatrixIndex, cost: Option<Cost>) {
        let storage_index = self
            .storage_index(index)
            .unwrap_or_else(|| panic!("Cell {index:?} lies outside of the alignment matrix"));
        debug_assert!(
            self.matrix[storage_index].is_none(),
            "Cell {index:?} was written twice"
        );
        self.matrix[storage_index] = cost;
    }

    fn compute_min_cost<Symbol: Eq>(
        &self,
        index: AlignmentMatrixIndex,
        reference: &[Symbol],
        query: &[Symbol],
    ) -> Result<Option<Cost>> {
        // Handle matches and substitutions.
        let mut cost = self.compute_match_or_substitution_cost(index, reference, query)?;

        // Handle insertions.
        let insertion_cost = self.compute_insertion_cost(index)?;
        if is_lower(insertion_cost, cost) {
            cost = insertion_cost;
        }

        // Handle deletions.
        let deletion_cost = self.compute_deletion_cost(index)?;
        if is_lower(deletion_cost, cost) {
            cost = deletion_cost;
        }

        Ok(cost)
    }

    fn compute_insertion_cost(&self, index: AlignmentMatrixIndex) -> Result<Option<Cost>> {
        self.compute_cost_via(index, BaseAlignmentType::Insertion)
    }

    fn compute_deletion_cost(&self, index: AlignmentMatrixIndex) -> Result<Option<Cost>> {
        self.compute_cost_via(index, BaseAlignmentType::Deletion)
    }

    fn compute_match_or_substitution_cost<Symbol: Eq>(
        &self,
        index: AlignmentMatrixIndex,
        reference: &[Symbol],
        query: &[Symbol],
    ) -> Result<Option<Cost>> {
        self.compute_cost_via(index, match_or_substitution(index, reference, query))
    }

    /// The cost of reaching `index` from its predecessor of the given type,
    /// or `None` if the predecessor is unreachable.
    fn compute_cost_via(
        &self,
        index: AlignmentMatrixIndex,
        alignment_type: BaseAlignmentType,
    ) -> Result<Option<Cost>> {
        let Some(predecessor_cost) = self.cost(index.predecessor(alignment_type)) else {
            return Ok(None);
        };

        predecessor_cost
            .checked_add(self.configuration.cost(alignment_type))
            .map(Some)
            .ok_or_else(|| {
                ConfigurationError::CostOverflow {
                    reference_index: index.reference_index,
                    query_index: index.query_index,
                }
                .into()
            })
    }

    #[cfg(test)]
    fn manual_debug_fill(&mut self, costs: impl IntoIterator<Item = Option<Cost>>) {
        let mut costs = costs.into_iter();
        for index in self.inner_index_iter() {
            let storage_index = self.storage_index(index).unwrap();
            self.matrix[storage_index] = costs.next().unwrap();
        }
        assert!(costs.next().is_none());
    }
}

fn match_or_substitution<Symbol: Eq>(
    index: AlignmentMatrixIndex,
    reference: &[Symbol],
    query: &[Symbol],
) -> BaseAlignmentType {
    if reference[index.reference_index - 1] == query[index.query_index - 1] {
        BaseAlignmentType::Match
    } else {
        BaseAlignmentType::Substitution
    }
}

/// Unreachable cells compare greater than all reachable cells.
fn is_lower<Cost: PartialOrd>(cost: Option<Cost>, other: Option<Cost>) -> bool {
    match (cost, other) {
        (Some(cost), Some(other)) => cost < other,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

impl std::fmt::Display for BaseAlignmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BaseAlignmentType::None => "N",
                BaseAlignmentType::Insertion => "I",
                BaseAlignmentType::Deletion => "D",
                BaseAlignmentType::Match => "M",
                BaseAlignmentType::Substitution => "S",
            }
        )
    }
}

/// Renders one bracketed line per reference index.
///
/// Cells outside of the band are printed as `.`.
impl<Cost: AlignmentCost> std::fmt::Display for AlignmentMatrix<Cost> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let render = |reference_index, query_index| {
            self.cost(AlignmentMatrixIndex::new(reference_index, query_index))
                .map(|cost| cost.to_string())
                .unwrap_or_else(|| ".".to_string())
        };

        let mut cost_column_widths = vec![0; self.query_length + 1];
        for reference_index in 0..=self.reference_length {
            for (query_index, cost_column_width) in cost_column_widths.iter_mut().enumerate() {
                *cost_column_width = render(reference_index, query_index)
                    .len()
                    .max(*cost_column_width);
            }
        }

        for reference_index in 0..=self.reference_length {
            write!(f, "[")?;
            for (query_index, cost_column_width) in cost_column_widths.iter().enumerate() {
                write!(
                    f,
                    " {: >width$}",
                    render(reference_index, query_index),
                    width = *cost_column_width,
                )?;
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}
