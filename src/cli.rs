//! Command-line interface
//!
//! Thin adapter over the analyzers: it collects rows (from a CSV file or a
//! classroom default dataset), runs one analysis, prints the table and the
//! summary, and optionally exports CSV, a chart and JSON.
//!
//! ```text
//! chemlab phenol-water --demo 10 --plot phase.png
//! chemlab titration --input readings.csv --naoh-volume 18.2 --csv curve.csv
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use crate::analysis::conductometric::{self, compute_acid_amounts, DEFAULT_SAMPLE_VOLUME_ML};
use crate::analysis::{
    phenol_water,
    samples,
    MiscibilitySeries,
    PhenolWaterAnalysis,
    Standardization,
    TitrationAnalysis,
    TitrationResult,
    TitrationSeries,
};
use crate::output::export::{read_csv_file, CsvConfig, CsvExporter, CsvMetadata, Exporter};
use crate::output::report::{self, ReportConfig};
use crate::output::table::Tabular;
use crate::output::visualization::{render_chart, Chartable, PlotConfig};

// =================================================================================================
// Arguments
// =================================================================================================

#[derive(Debug, Parser)]
#[command(name = "chemlab", version, about = "Phenol-water CST and conductometric titration analysis")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Critical solution temperature of the phenol-water system
    PhenolWater(PhenolWaterArgs),

    /// Conductometric titration of an HCl + CH₃COOH mixture
    Titration(TitrationArgs),
}

/// Where the readings come from
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// CSV file with a header row
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Use the classroom default dataset with this many rows
    #[arg(long)]
    pub demo: Option<usize>,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Write the annotated table to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the chart to this file (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Chart title override
    #[arg(long)]
    pub title: Option<String>,

    /// Print a JSON document instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Read and write CSV with ';' delimiters and ',' decimals
    #[arg(long)]
    pub european: bool,

    /// Decimal places in the printed table
    #[arg(long, default_value_t = 2)]
    pub decimals: usize,
}

#[derive(Debug, Args)]
pub struct PhenolWaterArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct TitrationArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Volume of oxalic acid used in standardization (ml)
    #[arg(long, default_value_t = 25.0)]
    pub oxalic_volume: f64,

    /// Volume of NaOH consumed in standardization (ml)
    #[arg(long, default_value_t = 18.5)]
    pub naoh_volume: f64,

    /// Normality of the oxalic acid standard (N)
    #[arg(long, default_value_t = 0.1)]
    pub oxalic_normality: f64,

    /// Volume of sample titrated (ml)
    #[arg(long, default_value_t = DEFAULT_SAMPLE_VOLUME_ML)]
    pub sample_volume: f64,
}

impl TitrationArgs {
    pub fn standardization(&self) -> Standardization {
        Standardization {
            oxalic_acid_volume_ml: self.oxalic_volume,
            naoh_volume_ml: self.naoh_volume,
            oxalic_normality: self.oxalic_normality,
        }
    }
}

impl OutputArgs {
    fn csv_config(&self) -> CsvConfig {
        if self.european {
            CsvConfig::european()
        } else {
            CsvConfig::default()
        }
    }

    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            decimals: self.decimals,
        }
    }
}

// =================================================================================================
// JSON documents
// =================================================================================================

#[derive(Serialize)]
struct PhenolWaterReport<'a> {
    analysis: &'a PhenolWaterAnalysis,
}

#[derive(Serialize)]
struct TitrationReport<'a> {
    standardization: Standardization,
    naoh_normality: f64,
    analysis: &'a TitrationAnalysis,
    result: &'a TitrationResult,
}

// =================================================================================================
// Commands
// =================================================================================================

pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::PhenolWater(args) => run_phenol_water(&args),
        Command::Titration(args) => run_titration(&args),
    }
}

fn load_miscibility_series(input: &InputArgs, config: &CsvConfig) -> Result<MiscibilitySeries, Box<dyn Error>> {
    match (&input.input, input.demo) {
        (Some(path), _) => Ok(read_csv_file(path, config)?.to_miscibility_series()?),
        (None, Some(n)) if samples::PHENOL_WATER_ROWS.contains(&n) => Ok(samples::phenol_water(n)),
        (None, Some(n)) => Err(format!(
            "--demo for phenol-water must be between {} and {}, got {}",
            samples::PHENOL_WATER_ROWS.start(),
            samples::PHENOL_WATER_ROWS.end(),
            n
        )
        .into()),
        (None, None) => Err("either --input or --demo is required".into()),
    }
}

fn load_titration_series(input: &InputArgs, config: &CsvConfig) -> Result<TitrationSeries, Box<dyn Error>> {
    match (&input.input, input.demo) {
        (Some(path), _) => Ok(read_csv_file(path, config)?.to_titration_series()?),
        (None, Some(n)) if samples::CONDUCTOMETRIC_POINTS.contains(&n) => Ok(samples::conductometric(n)),
        (None, Some(n)) => Err(format!(
            "--demo for titration must be between {} and {}, got {}",
            samples::CONDUCTOMETRIC_POINTS.start(),
            samples::CONDUCTOMETRIC_POINTS.end(),
            n
        )
        .into()),
        (None, None) => Err("either --input or --demo is required".into()),
    }
}

fn export_artifacts<T: Tabular + Chartable>(
    analysis: &T,
    output: &OutputArgs,
    metadata: CsvMetadata,
    plot_config: PlotConfig,
) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &output.csv {
        CsvExporter::new(output.csv_config().with_metadata(metadata)).export(analysis, path)?;
    }
    if let Some(path) = &output.plot {
        render_chart(&analysis.chart_spec(), path, Some(&plot_config))?;
    }
    Ok(())
}

pub fn run_phenol_water(args: &PhenolWaterArgs) -> Result<(), Box<dyn Error>> {
    let series = load_miscibility_series(&args.input, &args.output.csv_config())?;
    info!("phenol-water: {} observations loaded", series.len());

    let analysis = phenol_water::analyze(&series)?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&PhenolWaterReport { analysis: &analysis })?);
    } else {
        println!("{}", report::format_table(&analysis, &args.output.report_config()));
        print!("{}", report::phenol_water_summary(&analysis));
    }

    let cp = &analysis.critical_point;
    let mut metadata = CsvMetadata::for_experiment(analysis.experiment());
    metadata.add_custom("CST", format!("{} °C", cp.temperature_c));
    metadata.add_custom("CST composition", format!("{} % phenol", cp.phenol_volume_percent));

    export_artifacts(
        &analysis,
        &args.output,
        metadata,
        PlotConfig::phase_diagram(args.output.title.clone()),
    )
}

pub fn run_titration(args: &TitrationArgs) -> Result<(), Box<dyn Error>> {
    let standardization = args.standardization();
    let naoh_normality = standardization.naoh_normality()?;

    let series = load_titration_series(&args.input, &args.output.csv_config())?;
    info!("titration: {} points loaded", series.len());

    let analysis = conductometric::analyze(&series)?;

    let mut metadata = CsvMetadata::for_experiment(analysis.experiment());
    metadata.add_custom("HCl endpoint", format!("{} ml", analysis.endpoints.first_endpoint_volume_ml));
    metadata.add_custom(
        "CH3COOH endpoint",
        format!("{} ml", analysis.endpoints.second_endpoint_volume_ml),
    );

    // Table and chart are exported even when the endpoints turn out unusable
    export_artifacts(
        &analysis,
        &args.output,
        metadata,
        PlotConfig::titration_curve(args.output.title.clone()),
    )?;

    if !args.output.json {
        print!("{}", report::standardization_summary(naoh_normality));
        println!("{}", report::format_table(&analysis, &args.output.report_config()));
        print!("{}", report::endpoints_summary(&analysis));
    }

    let result = compute_acid_amounts(&analysis.endpoints, naoh_normality, args.sample_volume)?;

    if args.output.json {
        let document = TitrationReport {
            standardization,
            naoh_normality,
            analysis: &analysis,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", report::titration_summary(&result));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_titration_defaults() {
        let cli = Cli::try_parse_from(["chemlab", "titration", "--demo", "20"]).unwrap();
        match cli.command {
            Command::Titration(args) => {
                assert_eq!(args.input.demo, Some(20));
                assert_eq!(args.standardization(), Standardization::default());
                assert_eq!(args.sample_volume, 10.0);
                assert_eq!(args.output.decimals, 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_input_and_demo_conflict() {
        let parsed = Cli::try_parse_from([
            "chemlab", "phenol-water", "--demo", "10", "--input", "data.csv",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(Cli::try_parse_from(["chemlab", "phenol-water"]).is_err());
    }

    #[test]
    fn test_demo_out_of_range_is_error() {
        let input = InputArgs { input: None, demo: Some(3) };
        let err = load_miscibility_series(&input, &CsvConfig::default()).unwrap_err();
        assert!(err.to_string().contains("between 5 and 16"));
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["chemlab", "-vv", "phenol-water", "--demo", "5"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
