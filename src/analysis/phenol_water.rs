//! Critical solution temperature of the phenol-water system
//!
//! Phenol and water are partially miscible at room temperature. For each
//! mixture the temperature at which turbidity disappears on heating and the
//! temperature at which it reappears on cooling are recorded. Their mean is
//! the miscibility temperature of that composition, and the highest mean
//! temperature over all compositions estimates the critical solution
//! temperature (CST).
//!
//! # Derived columns
//!
//! ```text
//! volume % phenol = V_phenol / (V_phenol + V_water) × 100
//! mean temp       = (T_disappearance + T_appearance) / 2
//! ```
//!
//! # Example
//!
//! ```rust
//! use chemlab_rs::analysis::phenol_water::{analyze, MiscibilityObservation, MiscibilitySeries};
//!
//! let series = MiscibilitySeries::new(vec![
//!     MiscibilityObservation::new(5.0, 3.0, 64.0, 60.0),
//!     MiscibilityObservation::new(5.0, 5.0, 70.0, 68.0),
//! ]);
//!
//! let analysis = analyze(&series)?;
//! assert_eq!(analysis.critical_point.temperature_c, 69.0);
//! assert_eq!(analysis.critical_point.phenol_volume_percent, 50.0);
//! # Ok::<(), chemlab_rs::analysis::AnalysisError>(())
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

// =================================================================================================
// Input
// =================================================================================================

/// One heating/cooling reading of a phenol-water mixture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiscibilityObservation {
    /// Volume of phenol (ml)
    pub phenol_volume_ml: f64,

    /// Volume of water (ml)
    pub water_volume_ml: f64,

    /// Temperature at which turbidity disappears on heating (°C)
    pub disappearance_temp_c: f64,

    /// Temperature at which turbidity reappears on cooling (°C)
    pub appearance_temp_c: f64,
}

impl MiscibilityObservation {
    pub fn new(
        phenol_volume_ml: f64,
        water_volume_ml: f64,
        disappearance_temp_c: f64,
        appearance_temp_c: f64,
    ) -> Self {
        Self {
            phenol_volume_ml,
            water_volume_ml,
            disappearance_temp_c,
            appearance_temp_c,
        }
    }

    /// Total mixture volume (ml)
    pub fn total_volume_ml(&self) -> f64 {
        self.phenol_volume_ml + self.water_volume_ml
    }

    /// Phenol content in volume percent
    ///
    /// Only meaningful for a validated observation (total volume > 0).
    pub fn volume_percent_phenol(&self) -> f64 {
        self.phenol_volume_ml / self.total_volume_ml() * 100.0
    }

    /// Mean of the disappearance and appearance temperatures (°C)
    pub fn mean_temp_c(&self) -> f64 {
        (self.disappearance_temp_c + self.appearance_temp_c) / 2.0
    }

    fn validate(&self, row: usize) -> Result<(), AnalysisError> {
        let fields = [
            ("phenol volume", self.phenol_volume_ml),
            ("water volume", self.water_volume_ml),
            ("disappearance temperature", self.disappearance_temp_c),
            ("appearance temperature", self.appearance_temp_c),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AnalysisError::invalid_observation(
                row,
                format!("{} is not finite ({})", name, value),
            ));
        }

        if self.phenol_volume_ml < 0.0 || self.water_volume_ml < 0.0 {
            return Err(AnalysisError::invalid_observation(
                row,
                format!(
                    "volumes must not be negative (phenol {} ml, water {} ml)",
                    self.phenol_volume_ml, self.water_volume_ml
                ),
            ));
        }

        if self.total_volume_ml() <= 0.0 {
            return Err(AnalysisError::invalid_observation(
                row,
                "total volume of phenol and water must be positive",
            ));
        }

        Ok(())
    }
}

/// Ordered, immutable sequence of observations
///
/// Built once from the collected rows and handed whole to [`analyze`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiscibilitySeries {
    observations: Vec<MiscibilityObservation>,
}

impl MiscibilitySeries {
    pub fn new(observations: Vec<MiscibilityObservation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[MiscibilityObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl FromIterator<MiscibilityObservation> for MiscibilitySeries {
    fn from_iter<I: IntoIterator<Item = MiscibilityObservation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =================================================================================================
// Output
// =================================================================================================

/// Observation with its derived columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnotatedObservation {
    pub observation: MiscibilityObservation,
    pub volume_percent_phenol: f64,
    pub mean_temp_c: f64,
}

/// Highest mean miscibility temperature and the composition it occurs at
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalPoint {
    /// Critical solution temperature (°C)
    pub temperature_c: f64,

    /// Phenol content at the CST (volume %)
    pub phenol_volume_percent: f64,

    /// Row of the input series the point was taken from
    pub row: usize,
}

/// Result of [`analyze`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhenolWaterAnalysis {
    /// Input rows in input order, with derived columns
    pub rows: Vec<AnnotatedObservation>,

    pub critical_point: CriticalPoint,
}

impl PhenolWaterAnalysis {
    /// (volume % phenol, mean temp) pairs in input order
    pub fn composition_curve(&self) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|r| (r.volume_percent_phenol, r.mean_temp_c))
            .collect()
    }
}

// =================================================================================================
// Analysis
// =================================================================================================

/// Annotate every observation and locate the critical point
///
/// The critical point is the row with the maximum mean temperature. When
/// several rows share the maximum, the first one in input order wins.
///
/// A row with 0 ml of phenol is accepted and gives 0 % phenol; only the
/// total volume has to be positive.
///
/// # Errors
///
/// - [`AnalysisError::InsufficientData`] if the series is empty
/// - [`AnalysisError::InvalidObservation`] for a non-finite reading, a
///   negative volume or a total volume that is not positive
pub fn analyze(series: &MiscibilitySeries) -> Result<PhenolWaterAnalysis, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "miscibility series has no observations".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(series.len());
    for (row, observation) in series.observations().iter().enumerate() {
        observation.validate(row)?;
        rows.push(AnnotatedObservation {
            observation: *observation,
            volume_percent_phenol: observation.volume_percent_phenol(),
            mean_temp_c: observation.mean_temp_c(),
        });
    }

    // Strict comparison keeps the first maximum
    let mut best = 0;
    for (i, annotated) in rows.iter().enumerate().skip(1) {
        if annotated.mean_temp_c > rows[best].mean_temp_c {
            best = i;
        }
    }

    let critical_point = CriticalPoint {
        temperature_c: rows[best].mean_temp_c,
        phenol_volume_percent: rows[best].volume_percent_phenol,
        row: best,
    };

    debug!(
        "phenol-water: {} rows, CST {:.2} °C at {:.2} % phenol (row {})",
        rows.len(),
        critical_point.temperature_c,
        critical_point.phenol_volume_percent,
        best
    );

    Ok(PhenolWaterAnalysis {
        rows,
        critical_point,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
