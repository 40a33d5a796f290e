use super::BaseAlignmentType;

pub mod iterators;

/// A cell of the alignment matrix.
///
/// The reference indexes the rows, the query indexes the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentMatrixIndex {
    pub(in crate::alignment_matrix) reference_index: usize,
    pub(in crate::alignment_matrix) query_index: usize,
}

impl AlignmentMatrixIndex {
    pub fn new(reference_index: usize, query_index: usize) -> Self {
        Self {
            reference_index,
            query_index,
        }
    }

    pub fn reference_index(&self) -> usize {
        self.reference_index
    }

    pub fn query_index(&self) -> usize {
        self.query_index
    }

    /// The cell to the left, i.e. one query character less.
    pub fn insertion_predecessor(&self) -> Self {
        debug_assert!(self.query_index > 0);

        Self {
            reference_index: self.reference_index,
            query_index: self.query_index - 1,
        }
    }

    /// The cell above, i.e. one reference character less.
    pub fn deletion_predecessor(&self) -> Self {
        debug_assert!(self.reference_index > 0);

        Self {
            reference_index: self.reference_index - 1,
            query_index: self.query_index,
        }
    }

    pub fn match_or_substitution_predecessor(&self) -> Self {
        debug_assert!(self.reference_index > 0);
        debug_assert!(self.query_index > 0);

        Self {
            reference_index: self.reference_index - 1,
            query_index: self.query_index - 1,
        }
    }

    pub fn predecessor(&self, alignment_type: BaseAlignmentType) -> Self {
        match alignment_type {
            BaseAlignmentType::None => {
                panic!("Predecessor type 'None' has no predecessor")
            }
            BaseAlignmentType::Insertion => self.insertion_predecessor(),
            BaseAlignmentType::Deletion => self.deletion_predecessor(),
            BaseAlignmentType::Match | BaseAlignmentType::Substitution => {
                self.match_or_substitution_predecessor()
            }
        }
    }
}
