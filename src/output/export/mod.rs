//! Export module for annotated lab tables.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format is a new file and existing code stays untouched.
//!
//! # Available formats
//!
//! | Format  | Module   |
//! |---------|----------|
//! | CSV     | [`csv`]  |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use chemlab_rs::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//! exporter.export(&analysis, Path::new("conductometric_data.csv"))?;
//! ```

pub mod csv;

pub use csv::{
    export_table_csv,
    read_csv,
    read_csv_file,
    write_table,
    CsvConfig,
    CsvError,
    CsvExporter,
    CsvMetadata,
    CsvTable,
};

use std::path::Path;

use crate::output::table::Tabular;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the caller
/// can react to the precise failure without downcasting.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Writes every column of `table`, header first, rows in table order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `table` contains no rows or non-finite values
    fn export(&self, table: &dyn Tabular, path: &Path) -> Result<(), Self::Error>;
}
