pub mod aligner;
pub mod alignment_configuration;
pub mod alignment_matrix;
pub mod alignment_result;
pub mod band_width;
pub mod cost;
pub mod error;

pub use aligner::needleman_wunsch_align;

#[cfg(test)]
mod tests;
