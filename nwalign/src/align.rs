use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use lib_nwalign::{
    aligner::check_gap_symbol,
    alignment_configuration::{AlignmentConfiguration, convert_cost},
    alignment_matrix::AlignmentMatrix,
    alignment_result::AlignmentResult,
    band_width::BandWidth,
    cost::{AlignmentCost, I64Cost},
};
use log::{LevelFilter, debug, info};
use noisy_float::types::R64;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The first sequence. It indexes the rows of the alignment matrix.
    #[clap(long, short = 'r')]
    reference: String,

    /// The second sequence. It indexes the columns of the alignment matrix.
    #[clap(long, short = 'q')]
    query: String,

    /// A toml file containing any of the keys `match_cost`, `substitution_cost`, `indel_cost`,
    /// `band_width` and `gap`.
    ///
    /// Values given on the command line take precedence over values from the file.
    #[clap(long, short = 'c')]
    configuration_file: Option<PathBuf>,

    /// The cost of aligning two equal characters. Negative values act as a reward.
    #[clap(long, allow_negative_numbers = true)]
    match_cost: Option<f64>,

    /// The cost of aligning two different characters.
    #[clap(long, allow_negative_numbers = true)]
    substitution_cost: Option<f64>,

    /// The cost of aligning a character to a gap.
    #[clap(long, allow_negative_numbers = true)]
    indel_cost: Option<f64>,

    /// Either `unbounded` or the maximum distance of a computed cell from the main diagonal.
    ///
    /// If the band is too narrow to contain any alignment, the aligner aborts without result.
    #[clap(long, short = 'b', allow_negative_numbers = true)]
    band_width: Option<BandWidth>,

    /// The character inserted into the aligned sequences to represent gaps.
    ///
    /// It must not occur in the input sequences. Defaults to `-`.
    #[clap(long)]
    gap: Option<char>,

    /// The number type used for costs.
    #[clap(long, default_value = "integer")]
    cost_type: CostType,

    /// Print the alignment matrix before the alignment.
    ///
    /// This is for debug purposes only.
    #[clap(long)]
    print_matrix: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum CostType {
    Integer,
    Real,
}

#[derive(Debug, Default, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct MatrixConfig {
    match_cost: Option<f64>,
    substitution_cost: Option<f64>,
    indel_cost: Option<f64>,
    band_width: Option<i64>,
    gap: Option<char>,
}

pub fn cli(cli: Cli) -> Result<()> {
    TermLogger::init(
        cli.log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    match cli.cost_type {
        CostType::Integer => execute_with_cost::<I64Cost>(cli),
        CostType::Real => execute_with_cost::<R64>(cli),
    }
}

fn execute_with_cost<Cost: AlignmentCost>(cli: Cli) -> Result<()> {
    let matrix_config = if let Some(configuration_file) = &cli.configuration_file {
        info!("Loading configuration file {configuration_file:?}");
        load_matrix_config(configuration_file)?
    } else {
        MatrixConfig::default()
    };

    let default_configuration = AlignmentConfiguration::<Cost>::default();
    let configuration = AlignmentConfiguration {
        match_cost: resolve_cost(
            "match cost",
            cli.match_cost.or(matrix_config.match_cost),
            default_configuration.match_cost,
        )?,
        substitution_cost: resolve_cost(
            "substitution cost",
            cli.substitution_cost.or(matrix_config.substitution_cost),
            default_configuration.substitution_cost,
        )?,
        indel_cost: resolve_cost(
            "indel cost",
            cli.indel_cost.or(matrix_config.indel_cost),
            default_configuration.indel_cost,
        )?,
    };
    let band_width = resolve_band_width(cli.band_width, matrix_config.band_width)?;
    let gap = cli.gap.or(matrix_config.gap).unwrap_or('-');
    debug!("Using {configuration:?} with band width {band_width} and gap symbol {gap:?}");

    let reference = cli.reference.chars().collect::<Vec<_>>();
    let query = cli.query.chars().collect::<Vec<_>>();
    ensure!(
        !reference.iter().chain(&query).any(|c| c.is_whitespace()),
        "The sequences must not contain whitespace"
    );
    info!(
        "Aligning reference of length {} against query of length {}",
        reference.len(),
        query.len()
    );

    let alignment = align_sequences(
        &reference,
        &query,
        configuration,
        band_width,
        gap,
        cli.print_matrix,
    )?;
    print!("{alignment}");

    Ok(())
}

fn align_sequences<Cost: AlignmentCost>(
    reference: &[char],
    query: &[char],
    configuration: AlignmentConfiguration<Cost>,
    band_width: BandWidth,
    gap: char,
    print_matrix: bool,
) -> Result<AlignmentResult<char, Cost>> {
    check_gap_symbol(reference, query, &gap)?;
    let matrix = AlignmentMatrix::build(configuration, band_width, reference, query)?;
    if print_matrix {
        println!("{matrix}");
    }

    Ok(matrix.traceback(reference, query, &gap)?)
}

fn load_matrix_config(path: &Path) -> Result<MatrixConfig> {
    let mut config_file = BufReader::new(
        File::open(path).with_context(|| format!("Cannot open configuration file {path:?}"))?,
    );
    let mut config = String::new();
    config_file.read_to_string(&mut config)?;
    parse_matrix_config(&config)
}

fn parse_matrix_config(config: &str) -> Result<MatrixConfig> {
    Ok(toml::from_str(config)?)
}

fn resolve_cost<Cost: AlignmentCost>(
    name: &'static str,
    value: Option<f64>,
    default: Cost,
) -> Result<Cost> {
    Ok(value
        .map(|value| convert_cost(name, value))
        .transpose()?
        .unwrap_or(default))
}

fn resolve_band_width(
    cli_band_width: Option<BandWidth>,
    config_band_width: Option<i64>,
) -> Result<BandWidth> {
    if let Some(band_width) = cli_band_width {
        return Ok(band_width);
    }

    Ok(config_band_width
        .map(BandWidth::try_from)
        .transpose()?
        .unwrap_or_default())
}
