//! Pure analysis core
//!
//! Two independent, stateless analyzers. Each takes an immutable series built
//! from validated input and returns a new result; nothing is shared between
//! calls and no I/O happens here.
//!
//! | Experiment | Module | Entry points |
//! |------------|--------|--------------|
//! | Phenol-water CST | [`phenol_water`] | `analyze` |
//! | Conductometric titration | [`conductometric`] | `standardize_naoh`, `analyze`, `compute_acid_amounts` |

pub mod error;
pub mod phenol_water;
pub mod conductometric;
pub mod samples;

pub use error::AnalysisError;

pub use phenol_water::{
    AnnotatedObservation,
    CriticalPoint,
    MiscibilityObservation,
    MiscibilitySeries,
    PhenolWaterAnalysis,
};

pub use conductometric::{
    DerivativePoint,
    DerivativeSeries,
    Endpoints,
    Standardization,
    TitrationAnalysis,
    TitrationPoint,
    TitrationResult,
    TitrationSeries,
};
