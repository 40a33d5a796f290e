use crate::band_width::BandWidth;

use super::AlignmentMatrixIndex;

pub struct AlignmentMatrixReferenceIterator {
    index: AlignmentMatrixIndex,
    limit: usize,
}

pub struct AlignmentMatrixQueryIterator {
    index: AlignmentMatrixIndex,
    limit: usize,
}

/// An iterator over the alignment matrix indices inside the band, skipping row and column zero.
///
/// The iterator is reference-major, i.e. it increments the query position every iteration,
/// and increments the reference position only after reaching the end of the band in the current row.
pub struct AlignmentMatrixInnerIterator {
    index: AlignmentMatrixIndex,
    reference_length: usize,
    query_length: usize,
    band_width: BandWidth,
}

impl AlignmentMatrixReferenceIterator {
    pub(in crate::alignment_matrix) fn new(query_index: usize, limit: usize) -> Self {
        Self {
            index: AlignmentMatrixIndex::new(0, query_index),
            limit,
        }
    }
}

impl AlignmentMatrixQueryIterator {
    pub(in crate::alignment_matrix) fn new(reference_index: usize, limit: usize) -> Self {
        Self {
            index: AlignmentMatrixIndex::new(reference_index, 0),
            limit,
        }
    }
}

impl AlignmentMatrixInnerIterator {
    pub(in crate::alignment_matrix) fn new(
        reference_length: usize,
        query_length: usize,
        band_width: BandWidth,
    ) -> Self {
        let mut result = Self {
            index: AlignmentMatrixIndex::new(1, 0),
            reference_length,
            query_length,
            band_width,
        };
        result.index.query_index = result.first_query_index(1);
        result
    }

    fn first_query_index(&self, reference_index: usize) -> usize {
        self.band_width.query_range(reference_index).0.max(1)
    }

    fn last_query_index(&self, reference_index: usize) -> usize {
        self.band_width
            .query_range(reference_index)
            .1
            .min(self.query_length)
    }
}

impl Iterator for AlignmentMatrixReferenceIterator {
    type Item = AlignmentMatrixIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index.reference_index < self.limit {
            let result = self.index;
            self.index.reference_index += 1;
            Some(result)
        } else {
            None
        }
    }
}

impl Iterator for AlignmentMatrixQueryIterator {
    type Item = AlignmentMatrixIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index.query_index < self.limit {
            let result = self.index;
            self.index.query_index += 1;
            Some(result)
        } else {
            None
        }
    }
}

impl Iterator for AlignmentMatrixInnerIterator {
    type Item = AlignmentMatrixIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index.reference_index <= self.reference_length {
            if self.index.query_index <= self.last_query_index(self.index.reference_index) {
                let result = self.index;
                self.index.query_index += 1;
                return Some(result);
            }

            self.index.reference_index += 1;
            self.index.query_index = self.first_query_index(self.index.reference_index);
        }

        None
    }
}
