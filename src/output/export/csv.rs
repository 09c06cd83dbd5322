//! CSV export and import of annotated lab tables
//!
//! Tables are written as UTF-8 text: optional `#` comment lines with
//! metadata, one header row, then one line per row. Numbers are written at
//! full precision by default (the shortest representation that parses back
//! to the same `f64`), so a written table can be read back without loss.
//!
//! # Quick Examples
//!
//! ## Export
//!
//! ```rust,ignore
//! use chemlab_rs::output::export::{CsvConfig, CsvExporter, Exporter};
//!
//! let analysis = phenol_water::analyze(&series)?;
//! CsvExporter::default().export(&analysis, Path::new("phenol_water_data.csv"))?;
//! ```
//!
//! **Output** (`phenol_water_data.csv`):
//! ```csv
//! Volume of phenol (ml),Volume of water (ml),Temp of disappearance (°C),Temp of appearance (°C),Volume % of phenol,Mean Temp (°C)
//! 5,3,64,60,62.5,62
//! 5,5,70,68,50,69
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! let config = CsvConfig::default()
//!     .with_metadata(CsvMetadata::for_experiment("Phenol-Water System"));
//! ```
//!
//! **Output**:
//! ```csv
//! # Chemistry Lab Data
//! # Generated: 2026-10-18T09:30:00+00:00
//! # Experiment: Phenol-Water System
//! #
//! Volume of phenol (ml),...
//! ```
//!
//! ## Import
//!
//! ```rust,ignore
//! let table = read_csv_file(Path::new("readings.csv"), &CsvConfig::default())?;
//! let series = table.to_miscibility_series()?;
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::analysis::{
    AnalysisError,
    MiscibilityObservation,
    MiscibilitySeries,
    TitrationPoint,
    TitrationSeries,
};
use crate::output::table::Tabular;
use super::Exporter;

// =============================================================================
// Errors
// =============================================================================

/// Failure while writing or reading a CSV table
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("row {row} has {found} values, expected {expected}")]
    LengthMismatch { row: usize, found: usize, expected: usize },

    #[error("non-finite value in row {row}, column '{column}'")]
    NonFinite { row: usize, column: String },

    #[error("missing header row")]
    MissingHeader,

    #[error("line {line}, column {column}: cannot parse '{value}' as a number")]
    Parse { line: usize, column: usize, value: String },

    #[error("line {line}: missing value in column {column}")]
    MissingValue { line: usize, column: usize },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export and import
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Fixed number of decimal places, `None` for full precision (default)
/// - `include_metadata`: Add header comments with experiment info
/// - `metadata`: Metadata to include
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: Some(4),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Decimal places for floating-point values (default: None, full precision)
    pub precision: Option<usize>,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: None,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon delimiter, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: round to a fixed number of decimals
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only non-None fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Experiment name (e.g., "Phenol-Water System")
    pub experiment: Option<String>,

    /// Additional key/value lines (e.g., CST, endpoints)
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn for_experiment(experiment: &str) -> Self {
        Self {
            experiment: Some(experiment.to_string()),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> Result<(), CsvError> {
    writeln!(writer, "# Chemistry Lab Data")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(experiment) = &metadata.experiment {
        writeln!(writer, "# Experiment: {}", experiment)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = match config.precision {
        Some(prec) => format!("{:.prec$}", value, prec = prec),
        None => format!("{}", value),
    };

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn parse_cell(cell: &str, line: usize, column: usize, config: &CsvConfig) -> Result<Option<f64>, CsvError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }

    let normalized = if config.decimal_separator != '.' {
        cell.replace(config.decimal_separator, ".")
    } else {
        cell.to_string()
    };

    normalized
        .parse::<f64>()
        .map(Some)
        .map_err(|_| CsvError::Parse {
            line,
            column,
            value: cell.to_string(),
        })
}

// =============================================================================
// Writing
// =============================================================================

/// Write a table to any writer
///
/// # Errors
///
/// - [`CsvError::EmptyData`] if the table has no rows
/// - [`CsvError::LengthMismatch`] if a row does not match the header width
/// - [`CsvError::NonFinite`] for NaN or infinite cells
/// - [`CsvError::Io`] on write failure
pub fn write_table<W: Write>(
    writer: &mut W,
    table: &dyn Tabular,
    configuration: &CsvConfig,
) -> Result<(), CsvError> {

    // ============================= Validation =============================

    let headers = table.headers();
    let rows = table.rows();

    if rows.is_empty() {
        return Err(CsvError::EmptyData(format!(
            "{} table has no rows",
            table.experiment()
        )));
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != headers.len() {
            return Err(CsvError::LengthMismatch {
                row: i,
                found: row.len(),
                expected: headers.len(),
            });
        }
        if let Some(column) = row.iter().position(|v| matches!(v, Some(x) if !x.is_finite())) {
            return Err(CsvError::NonFinite {
                row: i,
                column: headers[column].clone(),
            });
        }
    }

    // ============================= Write Metadata =========================

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(writer, metadata)?;
        }
    }

    // ============================= Write Header ===========================

    let delimiter = configuration.delimiter.to_string();
    writeln!(writer, "{}", headers.join(delimiter.as_str()))?;

    // ============================= Write Data =============================

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| cell.map(|v| format_number(v, configuration)).unwrap_or_default())
            .collect();
        writeln!(writer, "{}", cells.join(delimiter.as_str()))?;
    }

    Ok(())
}

/// Export a table to a CSV file
///
/// Uses [`CsvConfig::default`] when `configuration` is `None`.
pub fn export_table_csv(
    table: &dyn Tabular,
    output_path: &Path,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut writer = BufWriter::new(File::create(output_path)?);
    write_table(&mut writer, table, configuration)?;
    writer.flush()?;

    info!("{} table written to {}", table.experiment(), output_path.display());
    Ok(())
}

/// CSV exporter bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export(&self, table: &dyn Tabular, path: &Path) -> Result<(), Self::Error> {
        export_table_csv(table, path, Some(&self.config))
    }
}

// =============================================================================
// Reading
// =============================================================================

/// Table read back from CSV
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,

    /// Parsed cells; empty fields are `None`
    pub rows: Vec<Vec<Option<f64>>>,

    /// 1-based source line of each row
    pub line_numbers: Vec<usize>,
}

impl CsvTable {
    /// Column by header name
    pub fn column(&self, header: &str) -> Option<Vec<Option<f64>>> {
        let index = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().map(|r| r.get(index).copied().flatten()).collect())
    }

    /// First `n` cells of row `row`, all required
    fn required(&self, row: usize, n: usize) -> Result<Vec<f64>, CsvError> {
        let line = self.line_numbers[row];
        let cells = &self.rows[row];
        if cells.len() < n {
            return Err(CsvError::LengthMismatch {
                row,
                found: cells.len(),
                expected: n,
            });
        }
        cells[..n]
            .iter()
            .enumerate()
            .map(|(column, cell)| cell.ok_or(CsvError::MissingValue { line, column }))
            .collect()
    }

    /// Interpret the first four columns as phenol volume, water volume,
    /// disappearance and appearance temperatures
    pub fn to_miscibility_series(&self) -> Result<MiscibilitySeries, CsvError> {
        (0..self.rows.len())
            .map(|row| {
                let v = self.required(row, 4)?;
                Ok(MiscibilityObservation::new(v[0], v[1], v[2], v[3]))
            })
            .collect::<Result<Vec<_>, CsvError>>()
            .map(MiscibilitySeries::new)
    }

    /// Interpret the first two columns as NaOH volume and conductance
    pub fn to_titration_series(&self) -> Result<TitrationSeries, CsvError> {
        (0..self.rows.len())
            .map(|row| {
                let v = self.required(row, 2)?;
                Ok(TitrationPoint::new(v[0], v[1]))
            })
            .collect::<Result<Vec<_>, CsvError>>()
            .map(TitrationSeries::new)
    }
}

/// Read a table: `#` comment lines and blank lines are skipped, the first
/// remaining line is the header
pub fn read_csv<R: BufRead>(reader: R, configuration: &CsvConfig) -> Result<CsvTable, CsvError> {
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut line_numbers = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields = trimmed.split(configuration.delimiter);
        if headers.is_none() {
            headers = Some(fields.map(|f| f.trim().to_string()).collect());
            continue;
        }

        let row = fields
            .enumerate()
            .map(|(column, cell)| parse_cell(cell, line_number, column, configuration))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
        line_numbers.push(line_number);
    }

    let headers = headers.ok_or(CsvError::MissingHeader)?;
    Ok(CsvTable {
        headers,
        rows,
        line_numbers,
    })
}

/// Read a table from a file, see [`read_csv`]
pub fn read_csv_file(path: &Path, configuration: &CsvConfig) -> Result<CsvTable, CsvError> {
    let file = File::open(path)?;
    read_csv(BufReader::new(file), configuration)
}

// =================================================================================================
// Tests
// =================================================================================================
