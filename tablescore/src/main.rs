//! Data quality scoring tool for tabular datasets.
//!
//! This binary ingests CSV or JSON datasets, scores them on four quality
//! dimensions, and writes a structured JSON report. It operates fully
//! offline and never echoes cell values into logs or reports.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tablescore_core::validation::get_report_schema;
use tablescore_core::{
    DimensionWeights, QualityAnalyzer, QualityReport, Result, ScoringConfig, Severity,
    SourceFormat, TablescoreError, init_logging, initialize_report_validator, read_dataset,
    validate_and_parse_report, validate_report_json,
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "tablescore")]
#[command(about = "Data quality scoring for CSV and JSON datasets")]
#[command(version)]
#[command(long_about = "
Tablescore - Offline data quality scoring for tabular datasets

This tool scores a dataset on four quality dimensions and reports
severity-ranked issues:
- Completeness: how many values are missing
- Correctness: how many values violate their inferred type or range
- Uniqueness: how many values repeat
- Consistency: how uniformly values are formatted

GUARANTEES:
- Fully offline operation
- Raw cell values never appear in logs or reports
- Deterministic output for identical inputs and settings

EXAMPLES:
  tablescore customers.csv
  tablescore --label orders -o orders.tablescore.json exports/orders.json
  tablescore --weight completeness:0.4,uniqueness:0.4 orders.csv
  tablescore --key-columns order_id,line_no orders.csv
  tablescore validate report.tablescore.json
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Dataset file to score
    #[arg(help = "Input dataset (.csv or .json)")]
    pub input: Option<PathBuf>,

    /// Input format override
    #[arg(
        long,
        value_enum,
        default_value = "auto",
        help = "Input format (auto detects from the file extension)"
    )]
    pub format: InputFormat,

    /// Logical table name used in the report
    #[arg(long, help = "Table name for the report (defaults to the file stem)")]
    pub label: Option<String>,

    /// Output file path
    #[arg(
        short,
        long,
        default_value = "report.tablescore.json",
        help = "Output report path"
    )]
    pub output: PathBuf,

    /// Print the report to stdout instead of writing a file
    #[arg(long, help = "Write the report to stdout instead of a file")]
    pub stdout: bool,

    /// Emit compact JSON
    #[arg(long, help = "Emit compact JSON instead of pretty-printed output")]
    pub compact: bool,

    /// Dimension weight overrides (format: dimension:value)
    #[arg(
        long,
        value_delimiter = ',',
        help = "Dimension weights (completeness:0.4,correctness:0.2,uniqueness:0.2,consistency:0.2)"
    )]
    pub weight: Vec<String>,

    /// Plausible numeric range override (format: min:max)
    #[arg(long, help = "Plausible numeric range, e.g. -1000:1000")]
    pub numeric_range: Option<String>,

    /// Plausible year range override (format: min:max)
    #[arg(long, help = "Plausible year range for dates, e.g. 1950:2050")]
    pub year_range: Option<String>,

    /// Categorical detection limits (format: max_distinct:max_ratio)
    #[arg(long, help = "Categorical limits, e.g. 20:0.1")]
    pub categorical_limit: Option<String>,

    /// Type inference sample size
    #[arg(long, help = "Number of values sampled per column for type inference")]
    pub sample_size: Option<usize>,

    /// Columns forming the designated row key
    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated columns whose combination must be unique"
    )]
    pub key_columns: Vec<String>,

    /// Allowed value lists (format: column:value|value)
    #[arg(
        long,
        value_delimiter = ',',
        help = "Allowed values per column (status:active|inactive)"
    )]
    pub allowed: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an existing report file
    Validate(ValidateArgs),
    /// Print the report JSON Schema
    Schema,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Report file to validate
    #[arg(help = "Path to a .tablescore.json report")]
    pub report: PathBuf,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

/// Available input formats
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum InputFormat {
    /// Detect from the file extension
    Auto,
    /// Comma-separated values with a header row
    Csv,
    /// JSON array of flat objects
    Json,
}

impl InputFormat {
    fn as_source_format(self) -> Option<SourceFormat> {
        match self {
            Self::Auto => None,
            Self::Csv => Some(SourceFormat::Csv),
            Self::Json => Some(SourceFormat::Json),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.verbose, cli.global.quiet)?;

    // Initialize JSON Schema validator
    initialize_report_validator().map_err(|e| {
        TablescoreError::configuration(format!("Failed to initialize report validator: {}", e))
    })?;

    // Handle commands
    match &cli.command {
        Some(Command::Validate(args)) => validate_report_file(&args.report),
        Some(Command::Schema) => print_report_schema(),
        None => {
            if let Some(ref input) = cli.input {
                score_dataset(input, &cli)
            } else {
                eprintln!("Error: An input dataset is required");
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
        }
    }
}

/// Scores a dataset file and writes the report
fn score_dataset(input: &Path, cli: &Cli) -> Result<()> {
    info!("Starting quality analysis...");
    info!("Input: {}", input.display());

    let dataset = read_dataset(input, cli.format.as_source_format()).map_err(|e| {
        error!("Failed to read dataset: {}", e);
        e
    })?;

    info!(
        "✓ Loaded {} rows across {} columns",
        dataset.row_count(),
        dataset.columns().len()
    );

    let label = cli
        .label
        .clone()
        .unwrap_or_else(|| table_label_from_path(input));

    let config = build_config(cli)?;
    let analyzer = QualityAnalyzer::new(config);
    let report = analyzer.analyze(&dataset, &label).map_err(|e| {
        error!("Quality analysis failed: {}", e);
        e
    })?;

    report_findings(&report);

    save_report(&report, cli)?;

    if !cli.stdout {
        println!("Quality analysis completed successfully");
        println!("Output: {}", cli.output.display());
        println!("Table: {} ({} rows)", report.table_name, report.analyzed_rows);
        println!(
            "Overall score: {:.1} (grade {})",
            report.table_scores.overall_score, report.table_scores.quality_grade
        );
        println!("Issues: {}", report.issues.len());
    }

    Ok(())
}

/// Derives a table label from the input file name
fn table_label_from_path(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string())
}

/// Builds the scoring configuration from CLI overrides
fn build_config(cli: &Cli) -> Result<ScoringConfig> {
    let mut config = ScoringConfig::new();

    if !cli.weight.is_empty() {
        config = config.with_weights(parse_weight_overrides(&cli.weight));
    }

    if let Some(ref spec) = cli.numeric_range {
        if let Some((min, max)) = parse_float_pair(spec) {
            config = config.with_numeric_range(min, max);
        }
    }

    if let Some(ref spec) = cli.year_range {
        if let Some((min, max)) = parse_year_pair(spec) {
            config = config.with_year_range(min, max);
        }
    }

    if let Some(ref spec) = cli.categorical_limit {
        if let Some((max_distinct, max_ratio)) = parse_categorical_pair(spec) {
            config = config.with_categorical_limits(max_distinct, max_ratio);
        }
    }

    if let Some(sample_size) = cli.sample_size {
        config = config.with_inference_sample_size(sample_size);
    }

    if !cli.key_columns.is_empty() {
        config = config.with_key_columns(cli.key_columns.clone());
    }

    for entry in &cli.allowed {
        if let Some((column, values)) = parse_allowed_entry(entry) {
            config = config.with_allowed_values(column, values);
        }
    }

    config.validate().map_err(|e| {
        TablescoreError::configuration(format!("Invalid scoring configuration: {}", e))
    })?;

    Ok(config)
}

/// Parses dimension weight overrides from CLI arguments.
fn parse_weight_overrides(entries: &[String]) -> DimensionWeights {
    let mut weights = DimensionWeights::new();

    for entry in entries {
        if let Some((dimension, value)) = entry.split_once(':') {
            if let Ok(v) = value.trim().parse::<f64>() {
                match dimension.trim().to_lowercase().as_str() {
                    "completeness" => weights = weights.with_completeness(v),
                    "correctness" => weights = weights.with_correctness(v),
                    "uniqueness" => weights = weights.with_uniqueness(v),
                    "consistency" => weights = weights.with_consistency(v),
                    _ => warn!("Unknown scoring dimension: {}", dimension),
                }
            } else {
                warn!("Invalid weight value for {}: {}", dimension, value);
            }
        }
    }

    weights
}

/// Parses a `min:max` float pair.
fn parse_float_pair(spec: &str) -> Option<(f64, f64)> {
    if let Some((min, max)) = spec.split_once(':') {
        if let (Ok(min), Ok(max)) = (min.trim().parse::<f64>(), max.trim().parse::<f64>()) {
            return Some((min, max));
        }
    }
    warn!("Ignoring malformed numeric range override: {}", spec);
    None
}

/// Parses a `min:max` year pair.
fn parse_year_pair(spec: &str) -> Option<(i32, i32)> {
    if let Some((min, max)) = spec.split_once(':') {
        if let (Ok(min), Ok(max)) = (min.trim().parse::<i32>(), max.trim().parse::<i32>()) {
            return Some((min, max));
        }
    }
    warn!("Ignoring malformed year range override: {}", spec);
    None
}

/// Parses a `max_distinct:max_ratio` categorical pair.
fn parse_categorical_pair(spec: &str) -> Option<(usize, f64)> {
    if let Some((distinct, ratio)) = spec.split_once(':') {
        if let (Ok(distinct), Ok(ratio)) =
            (distinct.trim().parse::<usize>(), ratio.trim().parse::<f64>())
        {
            return Some((distinct, ratio));
        }
    }
    warn!("Ignoring malformed categorical limit override: {}", spec);
    None
}

/// Parses a `column:value|value` allowed-values entry.
fn parse_allowed_entry(entry: &str) -> Option<(String, Vec<String>)> {
    if let Some((column, values)) = entry.split_once(':') {
        let column = column.trim();
        let values: Vec<String> = values
            .split('|')
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if !column.is_empty() && !values.is_empty() {
            return Some((column.to_string(), values));
        }
    }
    warn!("Ignoring malformed allowed-values override: {}", entry);
    None
}

/// Logs the most severe findings from a report
fn report_findings(report: &QualityReport) {
    let mut severe_count = 0;
    for issue in &report.issues {
        if issue.severity <= Severity::High {
            severe_count += 1;
            warn!("[{}] {}", issue.severity, issue.description);
        }
    }

    if severe_count > 0 {
        info!(
            "✓ Quality analysis completed with {} critical or high issue(s)",
            severe_count
        );
    } else {
        info!("✓ Quality analysis completed");
    }
}

/// Serializes, validates, and writes the report
fn save_report(report: &QualityReport, cli: &Cli) -> Result<()> {
    let json_data = if cli.compact {
        serde_json::to_string(report)
    } else {
        serde_json::to_string_pretty(report)
    }
    .map_err(|e| TablescoreError::serialization_failed("report serialization", e))?;

    // Validate output against the report schema before emitting
    let json_value: serde_json::Value = serde_json::from_str(&json_data)
        .map_err(|e| TablescoreError::serialization_failed("report parsing for validation", e))?;

    validate_report_json(&json_value).map_err(|e| {
        TablescoreError::configuration(format!("Report validation failed: {}", e))
    })?;

    info!("✓ Output validation passed");

    if cli.stdout {
        println!("{}", json_data);
    } else {
        std::fs::write(&cli.output, json_data).map_err(|e| {
            TablescoreError::io_failed(
                format!("Failed to write report to {}", cli.output.display()),
                e,
            )
        })?;
        info!("✓ Report saved to {}", cli.output.display());
    }

    Ok(())
}

/// Validates an existing report file
fn validate_report_file(path: &Path) -> Result<()> {
    info!("Validating report {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        TablescoreError::io_failed(format!("Failed to read report from {}", path.display()), e)
    })?;

    let report = validate_and_parse_report(&content).map_err(|e| {
        error!("Report validation failed: {}", e);
        TablescoreError::configuration(format!("Report validation failed: {}", e))
    })?;

    info!("✓ Report validation passed");
    println!("Report is valid");
    println!("Table: {} ({} rows)", report.table_name, report.analyzed_rows);
    println!(
        "Overall score: {:.1} (grade {})",
        report.table_scores.overall_score, report.table_scores.quality_grade
    );
    println!("Issues: {}", report.issues.len());

    Ok(())
}

/// Prints the embedded report JSON Schema
fn print_report_schema() -> Result<()> {
    let schema = get_report_schema().map_err(|e| {
        TablescoreError::configuration(format!("Failed to load report schema: {}", e))
    })?;

    let rendered = serde_json::to_string_pretty(&schema)
        .map_err(|e| TablescoreError::serialization_failed("schema rendering", e))?;
    println!("{}", rendered);

    Ok(())
}
