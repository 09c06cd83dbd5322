//! Text summaries and fixed-precision display tables
//!
//! Display rounding only happens here; exported data keeps full precision.

use crate::analysis::{PhenolWaterAnalysis, TitrationAnalysis, TitrationResult};
use crate::output::table::Tabular;

/// Display options for tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    /// Decimal places in display tables (default: 2)
    pub decimals: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

/// Render a table with right-aligned, fixed-precision columns
///
/// Missing cells are shown as `-`.
pub fn format_table(table: &dyn Tabular, config: &ReportConfig) -> String {
    let headers = table.headers();
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(v) => format!("{:.prec$}", v, prec = config.decimals),
                    None => "-".to_string(),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let align = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c, w = w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    std::iter::once(align(&headers))
        .chain(cells.iter().map(|row| align(row)))
        .map(|line| line + "\n")
        .collect()
}

/// CST and composition
pub fn phenol_water_summary(analysis: &PhenolWaterAnalysis) -> String {
    let cp = &analysis.critical_point;
    format!(
        "Results:\n\
         - Critical Solution Temperature (CST): {:.1} °C\n\
         - Critical Solution Composition: {:.1} % phenol by volume\n",
        cp.temperature_c, cp.phenol_volume_percent
    )
}

pub fn standardization_summary(naoh_normality: f64) -> String {
    format!("Calculated NaOH Normality: {:.4} N\n", naoh_normality)
}

/// Endpoints, plus a note when both coincide
pub fn endpoints_summary(analysis: &TitrationAnalysis) -> String {
    let endpoints = &analysis.endpoints;
    let mut out = format!(
        "Endpoints:\n\
         - HCl endpoint: {:.2} ml\n\
         - CH₃COOH endpoint: {:.2} ml\n",
        endpoints.first_endpoint_volume_ml, endpoints.second_endpoint_volume_ml
    );
    if endpoints.is_degenerate() {
        out.push_str("- Warning: both endpoints coincide; the titration curve shows no slope change\n");
    }
    out
}

pub fn titration_summary(result: &TitrationResult) -> String {
    format!(
        "Results:\n\
         - Volume of NaOH for HCl: {:.2} ml\n\
         - Volume of NaOH for CH₃COOH: {:.2} ml\n\
         - Normality of HCl: {:.4} N\n\
         - Normality of CH₃COOH: {:.4} N\n\
         - Amount of HCl in mixture: {:.4} g\n\
         - Amount of CH₃COOH in mixture: {:.4} g\n",
        result.hcl_volume_ml,
        result.ch3cooh_volume_ml,
        result.hcl_normality,
        result.ch3cooh_normality,
        result.hcl_mass_g_per_100ml,
        result.ch3cooh_mass_g_per_100ml,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::conductometric::{self, compute_acid_amounts, Endpoints};
    use crate::analysis::{phenol_water, MiscibilityObservation, MiscibilitySeries, TitrationPoint, TitrationSeries};

    fn phenol_analysis() -> PhenolWaterAnalysis {
        phenol_water::analyze(&MiscibilitySeries::new(vec![
            MiscibilityObservation::new(5.0, 3.0, 64.0, 60.0),
            MiscibilityObservation::new(5.0, 5.0, 70.0, 68.0),
        ]))
        .unwrap()
    }

    #[test]
    fn test_format_table_two_decimals() {
        let text = format_table(&phenol_analysis(), &ReportConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Mean Temp (°C)"));
        assert!(lines[1].trim_end().ends_with("62.00"));
        assert!(lines[1].contains("62.50"));
    }

    #[test]
    fn test_format_table_lines_share_width() {
        let text = format_table(&phenol_analysis(), &ReportConfig::default());

        assert!(text.ends_with('\n'));
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_format_table_missing_cell() {
        let analysis = conductometric::analyze(&TitrationSeries::new(vec![
            TitrationPoint::new(0.0, 0.8),
            TitrationPoint::new(0.2, 0.76),
        ]))
        .unwrap();

        let text = format_table(&analysis, &ReportConfig { decimals: 3 });
        let last = text.lines().last().unwrap();
        assert!(last.trim_end().ends_with('-'));
        assert!(last.contains("0.760"));
    }

    #[test]
    fn test_phenol_water_summary() {
        let text = phenol_water_summary(&phenol_analysis());
        assert!(text.contains("Critical Solution Temperature (CST): 69.0 °C"));
        assert!(text.contains("50.0 % phenol by volume"));
    }

    #[test]
    fn test_standardization_summary() {
        assert_eq!(
            standardization_summary(25.0 * 0.1 / 18.5),
            "Calculated NaOH Normality: 0.1351 N\n"
        );
    }

    #[test]
    fn test_endpoints_summary_degenerate_warning() {
        let analysis = conductometric::analyze(&TitrationSeries::new(vec![
            TitrationPoint::new(0.0, 0.8),
            TitrationPoint::new(0.2, 0.76),
            TitrationPoint::new(0.4, 0.72),
        ]))
        .unwrap();

        let text = endpoints_summary(&analysis);
        assert!(text.contains("HCl endpoint: 0.00 ml"));
        assert!(text.contains("Warning: both endpoints coincide"));
    }

    #[test]
    fn test_titration_summary() {
        let result = compute_acid_amounts(&Endpoints::new(2.0, 5.0), 0.1, 10.0).unwrap();
        let text = titration_summary(&result);

        assert!(text.contains("Volume of NaOH for CH₃COOH: 3.00 ml"));
        assert!(text.contains("Normality of HCl: 0.0200 N"));
        assert!(text.contains("Amount of CH₃COOH in mixture: 0.1800 g"));
    }
}
