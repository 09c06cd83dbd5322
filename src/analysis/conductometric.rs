//! Conductometric titration of an HCl + CH₃COOH mixture with NaOH
//!
//! While NaOH neutralizes the strong acid, fast H⁺ ions are replaced by slower
//! Na⁺ ions and the conductance falls. Neutralizing the weak acid raises it
//! slowly, and once both acids are consumed excess OH⁻ makes it rise sharply.
//! The two equivalence points are located on the discrete derivative of the
//! conductance curve:
//!
//! - **first endpoint** (HCl): volume at the minimum slope
//! - **second endpoint** (CH₃COOH): volume at the maximum slope
//!
//! Each slope is attributed to the *lower* volume of the pair of points that
//! produced it.
//!
//! # Workflow
//!
//! ```rust
//! use chemlab_rs::analysis::conductometric::{
//!     analyze, compute_acid_amounts, standardize_naoh, TitrationPoint, TitrationSeries,
//! };
//!
//! // 1. Standardize NaOH against oxalic acid
//! let naoh_normality = standardize_naoh(25.0, 18.5, 0.1)?;
//!
//! // 2. Locate endpoints on the conductance curve
//! let series = TitrationSeries::new(vec![
//!     TitrationPoint::new(0.0, 0.80),
//!     TitrationPoint::new(1.0, 0.60),
//!     TitrationPoint::new(2.0, 0.62),
//!     TitrationPoint::new(3.0, 0.90),
//! ]);
//! let analysis = analyze(&series)?;
//!
//! // 3. Convert endpoint volumes into acid contents
//! let result = compute_acid_amounts(&analysis.endpoints, naoh_normality, 10.0)?;
//! assert_eq!(result.hcl_volume_ml, 0.0);
//! assert_eq!(result.ch3cooh_volume_ml, 2.0);
//! # Ok::<(), chemlab_rs::analysis::AnalysisError>(())
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

// =================================================================================================
// Constants
// =================================================================================================

/// Molar mass of hydrochloric acid (g/mol)
pub const HCL_MOLAR_MASS: f64 = 36.5;

/// Molar mass of acetic acid (g/mol)
pub const CH3COOH_MOLAR_MASS: f64 = 60.0;

/// Sample volume the acid masses are reported for (ml)
pub const REPORT_VOLUME_ML: f64 = 100.0;

const ML_PER_LITRE: f64 = 1000.0;

/// Aliquot of the diluted mixture titrated in the classroom procedure (ml)
pub const DEFAULT_SAMPLE_VOLUME_ML: f64 = 10.0;

// =================================================================================================
// Standardization
// =================================================================================================

/// Standardization of NaOH against a primary oxalic acid standard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standardization {
    /// Volume of oxalic acid titrated (ml)
    pub oxalic_acid_volume_ml: f64,

    /// Volume of NaOH consumed (ml)
    pub naoh_volume_ml: f64,

    /// Normality of the oxalic acid standard (N)
    pub oxalic_normality: f64,
}

impl Default for Standardization {
    fn default() -> Self {
        Self {
            oxalic_acid_volume_ml: 25.0,
            naoh_volume_ml: 18.5,
            oxalic_normality: 0.1,
        }
    }
}

impl Standardization {
    /// Normality of the NaOH solution, see [`standardize_naoh`]
    pub fn naoh_normality(&self) -> Result<f64, AnalysisError> {
        standardize_naoh(
            self.oxalic_acid_volume_ml,
            self.naoh_volume_ml,
            self.oxalic_normality,
        )
    }
}

/// NaOH normality from `N₁V₁ = N₂V₂`
///
/// ```text
/// N_NaOH = V_oxalic × N_oxalic / V_NaOH
/// ```
///
/// # Errors
///
/// - [`AnalysisError::InvalidStandardization`] if any input is negative or
///   not finite
/// - [`AnalysisError::DivisionByZero`] if `naoh_volume_ml` is zero. A zero
///   normality is never substituted.
pub fn standardize_naoh(
    oxalic_acid_volume_ml: f64,
    naoh_volume_ml: f64,
    oxalic_normality: f64,
) -> Result<f64, AnalysisError> {
    let inputs = [
        ("volume of oxalic acid", oxalic_acid_volume_ml),
        ("volume of NaOH", naoh_volume_ml),
        ("normality of oxalic acid", oxalic_normality),
    ];
    if let Some((name, value)) = inputs.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
        return Err(AnalysisError::InvalidStandardization(format!(
            "{} must be finite and non-negative ({})",
            name, value
        )));
    }
    if naoh_volume_ml == 0.0 {
        return Err(AnalysisError::DivisionByZero(
            "volume of NaOH consumed in standardization is zero".to_string(),
        ));
    }
    Ok(oxalic_acid_volume_ml * oxalic_normality / naoh_volume_ml)
}

// =================================================================================================
// Titration data
// =================================================================================================

/// One conductance reading after adding NaOH
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitrationPoint {
    /// Cumulative NaOH volume added (ml)
    pub volume_naoh_ml: f64,

    /// Measured conductance (mS)
    pub conductance_ms: f64,
}

impl TitrationPoint {
    pub fn new(volume_naoh_ml: f64, conductance_ms: f64) -> Self {
        Self {
            volume_naoh_ml,
            conductance_ms,
        }
    }
}

/// Ordered, immutable sequence of titration points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitrationSeries {
    points: Vec<TitrationPoint>,
}

impl TitrationSeries {
    pub fn new(points: Vec<TitrationPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TitrationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Copy of the series sorted by volume
    ///
    /// The sort is stable: points with equal volumes keep their input order.
    pub fn sorted(&self) -> TitrationSeries {
        let mut points = self.points.clone();
        points.sort_by(|a, b| a.volume_naoh_ml.total_cmp(&b.volume_naoh_ml));
        TitrationSeries { points }
    }

    /// (volume, conductance) pairs in series order
    pub fn curve(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.volume_naoh_ml, p.conductance_ms))
            .collect()
    }
}

impl FromIterator<TitrationPoint> for TitrationSeries {
    fn from_iter<I: IntoIterator<Item = TitrationPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =================================================================================================
// Derivative
// =================================================================================================

/// Slope of one interval, attributed to its lower volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivativePoint {
    pub volume_ml: f64,

    /// dκ/dV over the interval (mS/ml)
    pub slope: f64,
}

/// First difference of a sorted titration series, `n - 1` points for `n` inputs
///
/// ```text
/// slope[i] = (κ[i+1] − κ[i]) / (V[i+1] − V[i])
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivativeSeries {
    points: Vec<DerivativePoint>,
}

impl DerivativeSeries {
    /// Finite differences of an already sorted series
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InsufficientData`] with fewer than two points
    /// - [`AnalysisError::DegenerateInterval`] if two consecutive points share a volume
    pub fn from_sorted(sorted: &TitrationSeries) -> Result<Self, AnalysisError> {
        if sorted.len() < 2 {
            return Err(AnalysisError::InsufficientData(format!(
                "titration needs at least 2 points, got {}",
                sorted.len()
            )));
        }

        let points = sorted
            .points()
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let dv = pair[1].volume_naoh_ml - pair[0].volume_naoh_ml;
                if dv == 0.0 {
                    return Err(AnalysisError::DegenerateInterval {
                        index,
                        volume_ml: pair[0].volume_naoh_ml,
                    });
                }
                Ok(DerivativePoint {
                    volume_ml: pair[0].volume_naoh_ml,
                    slope: (pair[1].conductance_ms - pair[0].conductance_ms) / dv,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { points })
    }

    pub fn points(&self) -> &[DerivativePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn slopes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.slope).collect()
    }

    /// Index of the smallest slope, first occurrence on ties
    pub fn argmin(&self) -> Option<usize> {
        self.first_extremum(|candidate, best| candidate < best)
    }

    /// Index of the largest slope, first occurrence on ties
    pub fn argmax(&self) -> Option<usize> {
        self.first_extremum(|candidate, best| candidate > best)
    }

    fn first_extremum(&self, better: impl Fn(f64, f64) -> bool) -> Option<usize> {
        let mut iter = self.points.iter().enumerate();
        let (mut best, first) = iter.next()?;
        let mut best_slope = first.slope;
        for (i, point) in iter {
            if better(point.slope, best_slope) {
                best = i;
                best_slope = point.slope;
            }
        }
        Some(best)
    }
}

// =================================================================================================
// Endpoints
// =================================================================================================

/// NaOH volumes at the two equivalence points (ml)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Volume at the minimum slope (HCl neutralized)
    pub first_endpoint_volume_ml: f64,

    /// Volume at the maximum slope (CH₃COOH neutralized)
    pub second_endpoint_volume_ml: f64,
}

impl Endpoints {
    pub fn new(first_endpoint_volume_ml: f64, second_endpoint_volume_ml: f64) -> Self {
        Self {
            first_endpoint_volume_ml,
            second_endpoint_volume_ml,
        }
    }

    /// Both endpoints fall on the same volume
    ///
    /// Happens when the slope is constant over the whole curve; the titration
    /// is reported, not rejected.
    pub fn is_degenerate(&self) -> bool {
        self.first_endpoint_volume_ml == self.second_endpoint_volume_ml
    }
}

/// Result of [`analyze`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitrationAnalysis {
    /// Input points sorted by volume
    pub sorted: TitrationSeries,

    pub derivative: DerivativeSeries,

    pub endpoints: Endpoints,
}

/// Sort the series, differentiate it and pick both endpoints
///
/// # Errors
///
/// - [`AnalysisError::InvalidObservation`] for a non-finite or negative volume
///   or a non-finite conductance
/// - [`AnalysisError::InsufficientData`] with fewer than two points
/// - [`AnalysisError::DegenerateInterval`] if two sorted points share a volume
pub fn analyze(series: &TitrationSeries) -> Result<TitrationAnalysis, AnalysisError> {
    for (row, point) in series.points().iter().enumerate() {
        if !point.volume_naoh_ml.is_finite() || !point.conductance_ms.is_finite() {
            return Err(AnalysisError::invalid_observation(
                row,
                format!(
                    "non-finite reading (volume {}, conductance {})",
                    point.volume_naoh_ml, point.conductance_ms
                ),
            ));
        }
        if point.volume_naoh_ml < 0.0 {
            return Err(AnalysisError::invalid_observation(
                row,
                format!("NaOH volume must not be negative ({} ml)", point.volume_naoh_ml),
            ));
        }
    }

    let sorted = series.sorted();
    let derivative = DerivativeSeries::from_sorted(&sorted)?;

    // from_sorted guarantees at least one slope
    let (min_index, max_index) = match (derivative.argmin(), derivative.argmax()) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(AnalysisError::InsufficientData(
                "no slope could be computed".to_string(),
            ))
        }
    };

    let endpoints = Endpoints::new(
        derivative.points()[min_index].volume_ml,
        derivative.points()[max_index].volume_ml,
    );

    debug!(
        "titration: {} points, min slope at interval {}, max slope at interval {}",
        sorted.len(),
        min_index,
        max_index
    );
    if endpoints.is_degenerate() {
        warn!(
            "degenerate titration: both endpoints at {} ml NaOH",
            endpoints.first_endpoint_volume_ml
        );
    }

    Ok(TitrationAnalysis {
        sorted,
        derivative,
        endpoints,
    })
}

// =================================================================================================
// Acid amounts
// =================================================================================================

/// Acid contents derived from the endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TitrationResult {
    /// Normality of the titrant (N)
    pub naoh_normality: f64,

    /// NaOH volume neutralizing HCl (ml)
    pub hcl_volume_ml: f64,

    /// NaOH volume neutralizing CH₃COOH (ml)
    pub ch3cooh_volume_ml: f64,

    pub hcl_normality: f64,
    pub ch3cooh_normality: f64,

    /// Grams of HCl per 100 ml of mixture
    pub hcl_mass_g_per_100ml: f64,

    /// Grams of CH₃COOH per 100 ml of mixture
    pub ch3cooh_mass_g_per_100ml: f64,
}

/// Mass of acid in [`REPORT_VOLUME_ML`] of solution of the given normality
fn mass_per_report_volume(normality: f64, molar_mass: f64) -> f64 {
    normality * molar_mass * REPORT_VOLUME_ML / ML_PER_LITRE
}

/// Convert endpoint volumes into normalities and masses of both acids
///
/// ```text
/// V_HCl     = V₁
/// V_CH3COOH = V₂ − V₁
/// N_acid    = V_acid × N_NaOH / V_sample
/// m_acid    = N_acid × M_acid × 100 / 1000      (g per 100 ml)
/// ```
///
/// # Errors
///
/// [`AnalysisError::InvalidEndpoints`] unless `V₂ ≥ V₁ ≥ 0`, `V_sample > 0`
/// and `N_NaOH` is finite and non-negative.
pub fn compute_acid_amounts(
    endpoints: &Endpoints,
    naoh_normality: f64,
    sample_volume_ml: f64,
) -> Result<TitrationResult, AnalysisError> {
    let first = endpoints.first_endpoint_volume_ml;
    let second = endpoints.second_endpoint_volume_ml;

    if !first.is_finite() || !second.is_finite() {
        return Err(AnalysisError::InvalidEndpoints(format!(
            "endpoint volumes must be finite ({}, {})",
            first, second
        )));
    }
    if first < 0.0 {
        return Err(AnalysisError::InvalidEndpoints(format!(
            "first endpoint is negative ({} ml)",
            first
        )));
    }
    if second < first {
        return Err(AnalysisError::InvalidEndpoints(format!(
            "second endpoint ({} ml) precedes first endpoint ({} ml)",
            second, first
        )));
    }
    if !(sample_volume_ml > 0.0 && sample_volume_ml.is_finite()) {
        return Err(AnalysisError::InvalidEndpoints(format!(
            "sample volume must be positive ({} ml)",
            sample_volume_ml
        )));
    }

    if !(naoh_normality >= 0.0 && naoh_normality.is_finite()) {
        return Err(AnalysisError::InvalidEndpoints(format!(
            "NaOH normality must be finite and non-negative ({} N)",
            naoh_normality
        )));
    }

    if first == 0.0 {
        warn!("first endpoint at 0 ml: no HCl detected");
    }

    let hcl_volume_ml = first;
    let ch3cooh_volume_ml = second - first;
    let hcl_normality = hcl_volume_ml * naoh_normality / sample_volume_ml;
    let ch3cooh_normality = ch3cooh_volume_ml * naoh_normality / sample_volume_ml;

    Ok(TitrationResult {
        naoh_normality,
        hcl_volume_ml,
        ch3cooh_volume_ml,
        hcl_normality,
        ch3cooh_normality,
        hcl_mass_g_per_100ml: mass_per_report_volume(hcl_normality, HCL_MOLAR_MASS),
        ch3cooh_mass_g_per_100ml: mass_per_report_volume(ch3cooh_normality, CH3COOH_MOLAR_MASS),
    })
}

// =================================================================================================
// Tests
// =================================================================================================
