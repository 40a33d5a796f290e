use std::fmt::{Display, Formatter, Result, Write};

use crate::alignment_matrix::BaseAlignmentType;

/// A run-length encoded sequence of alignment operations, ordered from the start of the sequences.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Alignment {
    alignment: Vec<(usize, BaseAlignmentType)>,
}

/// An optimal global alignment.
///
/// Both aligned sequences have the same length, and each column holds at least one non-gap symbol.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AlignmentResult<Symbol, Cost> {
    cost: Cost,
    aligned_reference: Vec<Symbol>,
    aligned_query: Vec<Symbol>,
    alignment: Alignment,
}

impl Alignment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, alignment_type: BaseAlignmentType) {
        if let Some((multiplicity, last_alignment_type)) = self.alignment.last_mut() {
            if *last_alignment_type == alignment_type {
                *multiplicity += 1;
            } else {
                self.alignment.push((1, alignment_type));
            }
        } else {
            self.alignment.push((1, alignment_type));
        }
    }

    pub fn iter_compact(&self) -> impl Iterator<Item = &(usize, BaseAlignmentType)> {
        self.alignment.iter()
    }

    pub fn iter_flat(&self) -> impl Iterator<Item = BaseAlignmentType> + '_ {
        self.alignment
            .iter()
            .flat_map(|&(multiplicity, alignment_type)| {
                std::iter::repeat_n(alignment_type, multiplicity)
            })
    }

    /// The number of alignment columns.
    pub fn len(&self) -> usize {
        self.alignment
            .iter()
            .map(|(multiplicity, _)| multiplicity)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.alignment.is_empty()
    }

    pub fn cigar(&self) -> String {
        let mut result = String::new();
        self.write_cigar(&mut result).unwrap();
        result
    }

    pub fn write_cigar(&self, writer: &mut impl Write) -> Result {
        for (amount, alignment_type) in &self.alignment {
            write!(writer, "{amount}{alignment_type}")?;
        }

        Ok(())
    }

    pub fn reverse(&self) -> Self {
        Self {
            alignment: self.alignment.iter().copied().rev().collect(),
        }
    }
}

impl From<Vec<(usize, BaseAlignmentType)>> for Alignment {
    fn from(value: Vec<(usize, BaseAlignmentType)>) -> Self {
        Self { alignment: value }
    }
}

impl Display for Alignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.write_cigar(f)
    }
}

impl<Symbol, Cost: Copy> AlignmentResult<Symbol, Cost> {
    pub(crate) fn new(
        cost: Cost,
        aligned_reference: Vec<Symbol>,
        aligned_query: Vec<Symbol>,
        alignment: Alignment,
    ) -> Self {
        debug_assert_eq!(aligned_reference.len(), aligned_query.len());
        debug_assert_eq!(aligned_reference.len(), alignment.len());

        Self {
            cost,
            aligned_reference,
            aligned_query,
            alignment,
        }
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The reference with gap symbols inserted.
    pub fn aligned_reference(&self) -> &[Symbol] {
        &self.aligned_reference
    }

    /// The query with gap symbols inserted.
    pub fn aligned_query(&self) -> &[Symbol] {
        &self.aligned_query
    }

    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    pub fn cigar(&self) -> String {
        self.alignment.cigar()
    }

    /// Returns the `(cost, aligned reference, aligned query)` triple.
    pub fn into_parts(self) -> (Cost, Vec<Symbol>, Vec<Symbol>) {
        (self.cost, self.aligned_reference, self.aligned_query)
    }
}

impl<Cost: Copy> AlignmentResult<char, Cost> {
    pub fn aligned_reference_string(&self) -> String {
        self.aligned_reference.iter().collect()
    }

    pub fn aligned_query_string(&self) -> String {
        self.aligned_query.iter().collect()
    }
}

impl<Symbol: Display, Cost: Display> Display for AlignmentResult<Symbol, Cost> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Cost: {}", self.cost)?;
        writeln!(f, "CIGAR: {}", self.alignment)?;
        for symbol in &self.aligned_reference {
            write!(f, "{symbol}")?;
        }
        writeln!(f)?;
        for symbol in &self.aligned_query {
            write!(f, "{symbol}")?;
        }
        writeln!(f)
    }
}
