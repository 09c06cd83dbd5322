//! Tabular view of analysis results
//!
//! Both the CSV exporter and the text report consume results through the
//! [`Tabular`] trait, so field order is defined once per result type.

use crate::analysis::{PhenolWaterAnalysis, TitrationAnalysis};

/// A result that can be laid out as a table of numbers
///
/// A `None` cell is a value that does not exist for that row (written as an
/// empty CSV field).
pub trait Tabular {
    /// Column headers in display order
    fn headers(&self) -> Vec<String>;

    /// One vector per row, same length as [`Tabular::headers`]
    fn rows(&self) -> Vec<Vec<Option<f64>>>;

    /// Name used in CSV metadata and report titles
    fn experiment(&self) -> &str;
}

pub const PHENOL_VOLUME_HEADER: &str = "Volume of phenol (ml)";
pub const WATER_VOLUME_HEADER: &str = "Volume of water (ml)";
pub const DISAPPEARANCE_TEMP_HEADER: &str = "Temp of disappearance (°C)";
pub const APPEARANCE_TEMP_HEADER: &str = "Temp of appearance (°C)";
pub const PHENOL_PERCENT_HEADER: &str = "Volume % of phenol";
pub const MEAN_TEMP_HEADER: &str = "Mean Temp (°C)";

pub const NAOH_VOLUME_HEADER: &str = "Volume of NaOH (ml)";
pub const CONDUCTANCE_HEADER: &str = "Conductance (mS)";
pub const SLOPE_HEADER: &str = "Slope (mS/ml)";

impl Tabular for PhenolWaterAnalysis {
    fn headers(&self) -> Vec<String> {
        [
            PHENOL_VOLUME_HEADER,
            WATER_VOLUME_HEADER,
            DISAPPEARANCE_TEMP_HEADER,
            APPEARANCE_TEMP_HEADER,
            PHENOL_PERCENT_HEADER,
            MEAN_TEMP_HEADER,
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()
    }

    fn rows(&self) -> Vec<Vec<Option<f64>>> {
        self.rows
            .iter()
            .map(|r| {
                vec![
                    Some(r.observation.phenol_volume_ml),
                    Some(r.observation.water_volume_ml),
                    Some(r.observation.disappearance_temp_c),
                    Some(r.observation.appearance_temp_c),
                    Some(r.volume_percent_phenol),
                    Some(r.mean_temp_c),
                ]
            })
            .collect()
    }

    fn experiment(&self) -> &str {
        "Phenol-Water System"
    }
}

impl Tabular for TitrationAnalysis {
    fn headers(&self) -> Vec<String> {
        vec![
            NAOH_VOLUME_HEADER.to_string(),
            CONDUCTANCE_HEADER.to_string(),
            SLOPE_HEADER.to_string(),
        ]
    }

    /// Sorted points; the slope column holds the slope of the interval that
    /// starts at the row, so the last row has none
    fn rows(&self) -> Vec<Vec<Option<f64>>> {
        let slopes = self.derivative.points();
        self.sorted
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                vec![
                    Some(p.volume_naoh_ml),
                    Some(p.conductance_ms),
                    slopes.get(i).map(|d| d.slope),
                ]
            })
            .collect()
    }

    fn experiment(&self) -> &str {
        "Conductometric Titration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{conductometric, phenol_water, samples};

    #[test]
    fn test_phenol_water_table_shape() {
        let analysis = phenol_water::analyze(&samples::phenol_water(5)).unwrap();
        let headers = analysis.headers();
        let rows = analysis.rows();

        assert_eq!(headers.len(), 6);
        assert_eq!(headers[4], PHENOL_PERCENT_HEADER);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.len() == 6 && r.iter().all(Option::is_some)));
    }

    #[test]
    fn test_titration_table_last_slope_empty() {
        let analysis = conductometric::analyze(&samples::conductometric(10)).unwrap();
        let rows = analysis.rows();

        assert_eq!(rows.len(), 10);
        assert!(rows[8][2].is_some());
        assert_eq!(rows[9][2], None);
    }
}
