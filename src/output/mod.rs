//! Output module for analysis results
//!
//! Everything downstream of the pure analyzers:
//! - **Tables**: a common tabular view of each result
//! - **Export**: CSV export and import
//! - **Visualization**: PNG/SVG charts using plotters
//! - **Report**: fixed-precision text summaries
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── table.rs            ← Tabular trait + column headers
//! ├── report.rs           ← Text summaries
//! ├── visualization/      ← Chart specs and rendering
//! │   ├── mod.rs
//! │   ├── chart.rs
//! │   ├── config.rs
//! │   └── render.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```

pub mod table;
pub mod report;
pub mod visualization;
pub mod export;

// Re-export commonly used items for convenience
pub use table::Tabular;

pub use visualization::{
    render_chart,
    Annotation,
    ChartSpec,
    Chartable,
    PlotConfig,
};

pub use export::{
    export_table_csv,
    CsvConfig,
    CsvError,
    CsvExporter,
    Exporter,
};

pub use report::ReportConfig;
