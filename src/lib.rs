//! chemlab-rs: Physical & Analytical Chemistry Lab Analysis
//!
//! Data analysis for two undergraduate experiments:
//!
//! - **Phenol-water system**: critical solution temperature (CST) from
//!   miscibility temperatures
//! - **Conductometric titration**: HCl and CH₃COOH contents of an acid
//!   mixture from the conductance curve
//!
//! # Architecture
//!
//! chemlab-rs is built on one principle: **pure analysis, separate
//! presentation**.
//!
//! - Analyzers ([`analysis`]) are stateless functions from an immutable
//!   series to a new result. They do no I/O and fail with a typed
//!   [`AnalysisError`](analysis::AnalysisError), never with a silent default.
//! - Everything a user sees ([`output`]) consumes those results: tables,
//!   CSV export/import, charts and text summaries.
//!
//! # Quick Start
//!
//! ```rust
//! use chemlab_rs::prelude::*;
//!
//! # fn main() -> Result<(), AnalysisError> {
//! // Phenol-water: CST is the highest mean miscibility temperature
//! let series = MiscibilitySeries::new(vec![
//!     MiscibilityObservation::new(5.0, 3.0, 64.0, 60.0),
//!     MiscibilityObservation::new(5.0, 5.0, 70.0, 68.0),
//! ]);
//! let cst = phenol_water::analyze(&series)?.critical_point;
//! assert_eq!(cst.temperature_c, 69.0);
//!
//! // Conductometric titration: endpoints from the conductance slope
//! let naoh_normality = conductometric::standardize_naoh(25.0, 18.5, 0.1)?;
//! let titration = conductometric::analyze(&samples::conductometric(20))?;
//! let result = conductometric::compute_acid_amounts(&titration.endpoints, naoh_normality, 10.0)?;
//! println!("HCl: {:.4} g per 100 ml", result.hcl_mass_g_per_100ml);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`analysis`]: Analyzers (pure computation)
//! - [`output`]: Tables, CSV, charts and reports
//! - [`cli`]: Command-line interface

// Core modules
pub mod analysis;

pub mod output;
pub mod cli;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use chemlab_rs::prelude::*;
    //! ```
    pub use crate::analysis::{conductometric,
                              phenol_water,
                              samples,
                              AnalysisError,
                              CriticalPoint,
                              Endpoints,
                              MiscibilityObservation,
                              MiscibilitySeries,
                              TitrationPoint,
                              TitrationResult,
                              TitrationSeries};
    pub use crate::output::{Chartable,
                            CsvConfig,
                            Exporter,
                            PlotConfig,
                            Tabular};
}
