use noisy_float::types::{R64, r64};
use proptest::prelude::*;

use crate::{
    alignment_configuration::AlignmentConfiguration,
    band_width::BandWidth,
    cost::I64Cost,
    error::{ConfigurationError, Error, Result},
    needleman_wunsch_align,
};

fn align_strings(
    reference: &str,
    query: &str,
    band_width: BandWidth,
) -> Result<(I64Cost, String, String)> {
    let reference = reference.chars().collect::<Vec<_>>();
    let query = query.chars().collect::<Vec<_>>();
    let result = needleman_wunsch_align(
        &reference,
        &query,
        &AlignmentConfiguration::default(),
        band_width,
        &'-',
    )?;

    Ok((
        result.cost(),
        result.aligned_reference_string(),
        result.aligned_query_string(),
    ))
}

fn expected(cost: i64, reference: &str, query: &str) -> Result<(I64Cost, String, String)> {
    Ok((cost.into(), reference.to_string(), query.to_string()))
}

#[test]
fn polynomial_exponential() {
    assert_eq!(
        align_strings("polynomial", "exponential", BandWidth::Unbounded),
        expected(-1, "polyn-omial", "exponential"),
    );
    assert_eq!(
        align_strings("exponential", "polynomial", BandWidth::Unbounded),
        expected(-1, "exponential", "polyn-omial"),
    );
}

#[test]
fn shifted_repeat() {
    assert_eq!(
        align_strings("ATATATATAT", "TATATATATA", BandWidth::Unbounded),
        expected(-17, "ATATATATAT-", "-TATATATATA"),
    );
}

#[test]
fn single_deletion() {
    assert_eq!(
        align_strings("ATGCATGC", "ATGGTGC", BandWidth::Unbounded),
        expected(-12, "ATGCATGC", "ATG-GTGC"),
    );
}

#[test]
fn empty_sequences() {
    assert_eq!(
        align_strings("", "", BandWidth::Unbounded),
        expected(0, "", ""),
    );
    assert_eq!(
        align_strings("", "", BandWidth::Bounded(0)),
        expected(0, "", ""),
    );
}

#[test]
fn empty_against_non_empty() {
    assert_eq!(
        align_strings("", "ACG", BandWidth::Unbounded),
        expected(15, "---", "ACG"),
    );
    assert_eq!(
        align_strings("ACG", "", BandWidth::Unbounded),
        expected(15, "ACG", "---"),
    );
    assert_eq!(
        align_strings("AAA", "A", BandWidth::Unbounded),
        expected(7, "AAA", "--A"),
    );
}

#[test]
fn band_boundary() {
    assert_eq!(
        align_strings("ATGCATGC", "ATGGTGC", BandWidth::Bounded(0)),
        Err(Error::InfeasibleBand {
            band_width: 0,
            reference_length: 8,
            query_length: 7,
        }),
    );
    for band_width in 1..=8 {
        assert_eq!(
            align_strings("ATGCATGC", "ATGGTGC", BandWidth::Bounded(band_width)),
            expected(-12, "ATGCATGC", "ATG-GTGC"),
            "band width {band_width}",
        );
    }

    assert_eq!(
        align_strings("", "ACG", BandWidth::Bounded(2)),
        Err(Error::InfeasibleBand {
            band_width: 2,
            reference_length: 0,
            query_length: 3,
        }),
    );
    assert_eq!(
        align_strings("", "ACG", BandWidth::Bounded(3)),
        expected(15, "---", "ACG"),
    );
}

#[test]
fn narrow_band_forces_suboptimal_alignment() {
    assert_eq!(
        align_strings("ATATATATAT", "TATATATATA", BandWidth::Bounded(0)),
        expected(10, "ATATATATAT", "TATATATATA"),
    );
    assert_eq!(
        align_strings("ATATATATAT", "TATATATATA", BandWidth::Bounded(1)),
        expected(-17, "ATATATATAT-", "-TATATATATA"),
    );
}

#[test]
fn gap_symbol_must_not_occur_in_sequences() {
    assert_eq!(
        align_strings("AC-G", "ACG", BandWidth::Unbounded),
        Err(Error::InvalidConfiguration(
            ConfigurationError::GapInReference(2)
        )),
    );
    assert_eq!(
        align_strings("ACG", "-ACG", BandWidth::Unbounded),
        Err(Error::InvalidConfiguration(ConfigurationError::GapInQuery(
            0
        ))),
    );
}

#[test]
fn real_valued_costs() {
    let configuration = AlignmentConfiguration::<R64>::try_from_f64(-0.5, 0.25, 1.0).unwrap();
    let result = needleman_wunsch_align(
        b"ACG",
        b"ACCG",
        &configuration,
        BandWidth::Unbounded,
        &b'_',
    )
    .unwrap();

    assert_eq!(result.cost(), r64(-0.5));
    assert_eq!(result.aligned_reference(), b"A_CG");
    assert_eq!(result.aligned_query(), b"ACCG");
    assert_eq!(result.cigar(), "1M1I2M");
}

#[test]
fn costs_exceeding_the_cost_type_are_rejected() {
    let configuration = AlignmentConfiguration::<I64Cost>::try_from_f64(-3.0, 1.0, 4e18).unwrap();
    assert_eq!(
        needleman_wunsch_align(b"ACG", b"", &configuration, BandWidth::Unbounded, &b'-'),
        Err(Error::InvalidConfiguration(
            ConfigurationError::CostOverflow {
                reference_index: 3,
                query_index: 0,
            }
        )),
    );

    let configuration = AlignmentConfiguration::<R64>::try_from_f64(-3.0, 1.0, 1e308).unwrap();
    assert_eq!(
        needleman_wunsch_align(b"ACG", b"", &configuration, BandWidth::Unbounded, &b'-'),
        Err(Error::InvalidConfiguration(
            ConfigurationError::CostOverflow {
                reference_index: 2,
                query_index: 0,
            }
        )),
    );
}

#[test]
fn arbitrary_tokens() {
    let reference = ["let", "x", "=", "1", ";"];
    let query = ["let", "mut", "x", "=", "2", ";"];
    let result = needleman_wunsch_align(
        &reference,
        &query,
        &AlignmentConfiguration::<I64Cost>::default(),
        BandWidth::Unbounded,
        &"",
    )
    .unwrap();

    assert_eq!(result.cigar(), "1M1I2M1S1M");
    let (cost, aligned_reference, aligned_query) = result.into_parts();
    assert_eq!(cost, (-3 * 4 + 5 + 1).into());
    assert_eq!(aligned_reference, ["let", "", "x", "=", "1", ";"]);
    assert_eq!(aligned_query, query);
}

fn strip_gaps(aligned: &str) -> String {
    aligned.chars().filter(|&c| c != '-').collect()
}

proptest! {
    #[test]
    fn removing_gaps_restores_the_sequences(
        reference in "[ACGT]{0,12}",
        query in "[ACGT]{0,12}",
    ) {
        let (_, aligned_reference, aligned_query) =
            align_strings(&reference, &query, BandWidth::Unbounded).unwrap();

        prop_assert_eq!(aligned_reference.chars().count(), aligned_query.chars().count());
        prop_assert_eq!(strip_gaps(&aligned_reference), reference);
        prop_assert_eq!(strip_gaps(&aligned_query), query);
        prop_assert!(aligned_reference
            .chars()
            .zip(aligned_query.chars())
            .all(|(r, q)| r != '-' || q != '-'));
    }

    #[test]
    fn cost_is_symmetric(
        reference in "[ACGT]{0,12}",
        query in "[ACGT]{0,12}",
    ) {
        let (cost, _, _) = align_strings(&reference, &query, BandWidth::Unbounded).unwrap();
        let (swapped_cost, _, _) = align_strings(&query, &reference, BandWidth::Unbounded).unwrap();
        prop_assert_eq!(cost, swapped_cost);
    }

    #[test]
    fn alignment_is_deterministic(
        reference in "[ACGT]{0,12}",
        query in "[ACGT]{0,12}",
        band_width in 0usize..6,
    ) {
        let band_width = BandWidth::Bounded(band_width);
        prop_assert_eq!(
            align_strings(&reference, &query, band_width),
            align_strings(&reference, &query, band_width),
        );
    }

    #[test]
    fn banding_never_lowers_the_cost(
        reference in "[ACGT]{0,12}",
        query in "[ACGT]{0,12}",
        band_width in 0usize..6,
    ) {
        let (cost, _, _) = align_strings(&reference, &query, BandWidth::Unbounded).unwrap();
        match align_strings(&reference, &query, BandWidth::Bounded(band_width)) {
            Ok((banded_cost, aligned_reference, aligned_query)) => {
                prop_assert!(banded_cost >= cost);
                prop_assert_eq!(strip_gaps(&aligned_reference), reference);
                prop_assert_eq!(strip_gaps(&aligned_query), query);
            }
            Err(error) => {
                prop_assert!(reference.len().abs_diff(query.len()) > band_width);
                prop_assert!(matches!(error, Error::InfeasibleBand { .. }), "{}", error);
            }
        }
    }

    #[test]
    fn wide_band_matches_unbounded(
        reference in "[ACGT]{0,12}",
        query in "[ACGT]{0,12}",
    ) {
        let band_width = BandWidth::Bounded(reference.len().max(query.len()));
        prop_assert_eq!(
            align_strings(&reference, &query, band_width),
            align_strings(&reference, &query, BandWidth::Unbounded),
        );
    }
}
