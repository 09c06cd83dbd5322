//! Visualization of analysis results using the `plotters` library.
//!
//! # Organization
//!
//! - **chart**: `ChartSpec` (series + annotations) and the `Chartable` trait
//! - **config**: Plot styling (`PlotConfig`)
//! - **render**: PNG/SVG rendering of a `ChartSpec`
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chemlab_rs::output::visualization::{render_chart, Chartable, PlotConfig, NO_TITLE};
//!
//! let analysis = conductometric::analyze(&series)?;
//! let config = PlotConfig::titration_curve(NO_TITLE);
//! render_chart(&analysis.chart_spec(), Path::new("curve.png"), Some(&config))?;
//! ```
//!
//! | Chart | Produced by | Annotations |
//! |-------|-------------|-------------|
//! | Phase diagram | `PhenolWaterAnalysis` | CST marker |
//! | Titration curve | `TitrationAnalysis` | Two endpoint lines |

pub mod chart;
pub mod config;
pub mod render;

pub use chart::{Annotation, ChartSpec, Chartable};
pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use render::render_chart;
