//! Chart specifications
//!
//! A [`ChartSpec`] is everything a charting backend needs: one x/y series
//! plus annotations. Analyses produce one through [`Chartable`]; rendering
//! lives in [`render`](super::render).

use serde::Serialize;

use crate::analysis::{PhenolWaterAnalysis, TitrationAnalysis};
use crate::output::table::{
    CONDUCTANCE_HEADER,
    NAOH_VOLUME_HEADER,
    PHENOL_PERCENT_HEADER,
};

/// A marked point of interest on a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Annotation {
    /// Highlighted data point
    Marker { x: f64, y: f64, label: String },

    /// Vertical line across the plot area
    VerticalLine { x: f64, label: String },
}

impl Annotation {
    pub fn x(&self) -> f64 {
        match self {
            Annotation::Marker { x, .. } | Annotation::VerticalLine { x, .. } => *x,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Annotation::Marker { label, .. } | Annotation::VerticalLine { label, .. } => label,
        }
    }
}

/// Line chart with annotations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Points joined in order
    pub series: Vec<(f64, f64)>,

    pub annotations: Vec<Annotation>,
}

/// A result that can be drawn as a [`ChartSpec`]
pub trait Chartable {
    fn chart_spec(&self) -> ChartSpec;
}

impl Chartable for PhenolWaterAnalysis {
    /// Mean temperature vs composition with the CST marked
    fn chart_spec(&self) -> ChartSpec {
        let cp = &self.critical_point;
        ChartSpec {
            title: "Critical Solution Temperature for Phenol-Water System".to_string(),
            x_label: PHENOL_PERCENT_HEADER.to_string(),
            y_label: "Temperature (°C)".to_string(),
            series: self.composition_curve(),
            annotations: vec![Annotation::Marker {
                x: cp.phenol_volume_percent,
                y: cp.temperature_c,
                label: format!(
                    "CST: {:.1}°C at {:.1}% phenol",
                    cp.temperature_c, cp.phenol_volume_percent
                ),
            }],
        }
    }
}

impl Chartable for TitrationAnalysis {
    /// Conductance vs NaOH volume with both endpoints as vertical lines
    fn chart_spec(&self) -> ChartSpec {
        let endpoints = &self.endpoints;
        ChartSpec {
            title: "Conductometric Titration of Acid Mixture".to_string(),
            x_label: NAOH_VOLUME_HEADER.to_string(),
            y_label: CONDUCTANCE_HEADER.to_string(),
            series: self.sorted.curve(),
            annotations: vec![
                Annotation::VerticalLine {
                    x: endpoints.first_endpoint_volume_ml,
                    label: format!("HCl endpoint: {:.2} ml", endpoints.first_endpoint_volume_ml),
                },
                Annotation::VerticalLine {
                    x: endpoints.second_endpoint_volume_ml,
                    label: format!(
                        "CH₃COOH endpoint: {:.2} ml",
                        endpoints.second_endpoint_volume_ml
                    ),
                },
            ],
        }
    }
}
