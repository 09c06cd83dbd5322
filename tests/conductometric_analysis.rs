//! Integration tests: standardization → endpoints → acid amounts

use approx::assert_relative_eq;

use chemlab_rs::analysis::conductometric::{
    analyze,
    compute_acid_amounts,
    standardize_naoh,
    Endpoints,
    CH3COOH_MOLAR_MASS,
    HCL_MOLAR_MASS,
};
use chemlab_rs::analysis::{samples, AnalysisError, Standardization, TitrationPoint, TitrationSeries};

mod common;
use common::two_acid_titration_series;

// =================================================================================================
// Endpoint detection
// =================================================================================================

#[test]
fn test_two_acid_curve_endpoints() {
    let analysis = analyze(&two_acid_titration_series()).unwrap();

    assert_eq!(analysis.derivative.len(), 7);
    assert_eq!(analysis.endpoints, Endpoints::new(1.0, 5.0));
    assert!(!analysis.endpoints.is_degenerate());
}

#[test]
fn test_derivative_matches_finite_differences() {
    let analysis = analyze(&two_acid_titration_series()).unwrap();
    let points = analysis.sorted.points();

    assert_eq!(analysis.derivative.len(), points.len() - 1);
    for (i, d) in analysis.derivative.points().iter().enumerate() {
        let expected = (points[i + 1].conductance_ms - points[i].conductance_ms)
            / (points[i + 1].volume_naoh_ml - points[i].volume_naoh_ml);
        assert_eq!(d.slope, expected);
        assert_eq!(d.volume_ml, points[i].volume_naoh_ml);
    }
}

#[test]
fn test_sorted_series_is_ascending() {
    let analysis = analyze(&two_acid_titration_series()).unwrap();
    let volumes: Vec<f64> = analysis.sorted.points().iter().map(|p| p.volume_naoh_ml).collect();

    assert!(volumes.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_default_dataset_endpoints() {
    let analysis = analyze(&samples::conductometric(20)).unwrap();

    // On paper every falling slope is -0.1 and every rising slope 0.15; the
    // f64 differences break those ties, so this pins the computed endpoints
    assert_relative_eq!(analysis.endpoints.first_endpoint_volume_ml, 1.8, epsilon = 1e-9);
    assert_relative_eq!(analysis.endpoints.second_endpoint_volume_ml, 2.4, epsilon = 1e-9);
}

#[test]
fn test_three_point_constant_slope_is_degenerate() {
    let series = TitrationSeries::new(vec![
        TitrationPoint::new(0.0, 0.8),
        TitrationPoint::new(0.2, 0.76),
        TitrationPoint::new(0.4, 0.72),
    ]);
    let analysis = analyze(&series).unwrap();

    assert_eq!(analysis.endpoints.first_endpoint_volume_ml, 0.0);
    assert_eq!(analysis.endpoints.second_endpoint_volume_ml, 0.0);
    assert!(analysis.endpoints.is_degenerate());
}

#[test]
fn test_two_points_give_single_interval() {
    let series = TitrationSeries::new(vec![
        TitrationPoint::new(1.5, 0.9),
        TitrationPoint::new(0.5, 1.1),
    ]);
    let analysis = analyze(&series).unwrap();

    assert_eq!(analysis.derivative.len(), 1);
    assert_eq!(analysis.endpoints, Endpoints::new(0.5, 0.5));
}

#[test]
fn test_unsorted_duplicates_rejected() {
    let series = TitrationSeries::new(vec![
        TitrationPoint::new(1.0, 0.5),
        TitrationPoint::new(0.0, 0.8),
        TitrationPoint::new(1.0, 0.6),
    ]);

    assert!(matches!(
        analyze(&series),
        Err(AnalysisError::DegenerateInterval { index: 1, .. })
    ));
}

// =================================================================================================
// Full workflow
// =================================================================================================

#[test]
fn test_full_workflow() {
    let naoh_normality = Standardization::default().naoh_normality().unwrap();
    assert_relative_eq!(naoh_normality, 0.1351, epsilon = 1e-4);

    let analysis = analyze(&two_acid_titration_series()).unwrap();
    let result = compute_acid_amounts(&analysis.endpoints, naoh_normality, 10.0).unwrap();

    assert_eq!(result.hcl_volume_ml, 1.0);
    assert_eq!(result.ch3cooh_volume_ml, 4.0);
    assert_relative_eq!(result.hcl_normality, naoh_normality / 10.0, epsilon = 1e-12);
    assert_relative_eq!(result.ch3cooh_normality, 4.0 * naoh_normality / 10.0, epsilon = 1e-12);
    assert_relative_eq!(
        result.hcl_mass_g_per_100ml,
        result.hcl_normality * HCL_MOLAR_MASS / 10.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        result.ch3cooh_mass_g_per_100ml,
        result.ch3cooh_normality * CH3COOH_MOLAR_MASS / 10.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_normalities_decrease_with_sample_volume() {
    let endpoints = Endpoints::new(1.0, 5.0);
    let naoh_normality = standardize_naoh(25.0, 18.5, 0.1).unwrap();

    let mut previous = compute_acid_amounts(&endpoints, naoh_normality, 1.0).unwrap();
    for sample in [2.0, 5.0, 10.0, 25.0, 100.0] {
        let current = compute_acid_amounts(&endpoints, naoh_normality, sample).unwrap();
        assert!(current.hcl_normality < previous.hcl_normality);
        assert!(current.ch3cooh_normality < previous.ch3cooh_normality);
        previous = current;
    }
}

#[test]
fn test_negative_naoh_volume_is_reported() {
    let standardization = Standardization {
        naoh_volume_ml: -18.5,
        ..Standardization::default()
    };
    assert!(matches!(
        standardization.naoh_normality(),
        Err(AnalysisError::InvalidStandardization(_))
    ));
}

#[test]
fn test_nan_normality_never_reaches_acid_amounts() {
    let endpoints = Endpoints::new(1.0, 2.0);
    assert!(matches!(
        compute_acid_amounts(&endpoints, f64::NAN, 10.0),
        Err(AnalysisError::InvalidEndpoints(_))
    ));
}

#[test]
fn test_zero_naoh_volume_is_reported() {
    let standardization = Standardization {
        naoh_volume_ml: 0.0,
        ..Standardization::default()
    };
    assert!(matches!(
        standardization.naoh_normality(),
        Err(AnalysisError::DivisionByZero(_))
    ));
}
