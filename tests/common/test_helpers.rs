//! Helper functions for integration tests

#![allow(dead_code)]

use chemlab_rs::analysis::{
    MiscibilityObservation,
    MiscibilitySeries,
    TitrationPoint,
    TitrationSeries,
};

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Assert that two numeric columns match element-wise within `tolerance`
pub fn assert_columns_close(
    actual: &[Option<f64>],
    expected: &[Option<f64>],
    tolerance: f64,
    message: &str,
) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", message);

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        match (a, e) {
            (Some(a), Some(e)) => assert!(
                relative_error(*a, *e) < tolerance,
                "{}: element {} is {} (expected {})",
                message, i, a, e
            ),
            (None, None) => {}
            _ => panic!("{}: element {} is {:?} (expected {:?})", message, i, a, e),
        }
    }
}

/// Handbook-like readings: mean temperatures rise to 66.8 °C near 36 %
/// phenol, then fall
pub fn textbook_miscibility_series() -> MiscibilitySeries {
    let readings = [
        (5.0, 3.0, 48.0, 46.0),
        (5.0, 5.0, 58.5, 57.5),
        (5.0, 7.0, 64.0, 63.0),
        (5.0, 9.0, 67.2, 66.4),
        (5.0, 11.0, 66.6, 65.8),
        (5.0, 13.0, 65.0, 64.2),
        (5.0, 17.0, 61.4, 60.6),
        (5.0, 25.0, 52.0, 51.0),
    ];

    readings
        .iter()
        .map(|&(p, w, d, a)| MiscibilityObservation::new(p, w, d, a))
        .collect()
}

/// Conductance curve with a clear HCl branch, a gentle acetate branch and a
/// steep excess-base branch, supplied out of order
pub fn two_acid_titration_series() -> TitrationSeries {
    let points = [
        (3.0, 1.10),
        (0.0, 2.60),
        (1.0, 2.20),
        (2.0, 1.20), // steepest drop, HCl consumed
        (4.0, 1.20),
        (5.0, 1.30),
        (6.0, 2.30), // steepest rise, CH3COOH consumed
        (7.0, 2.90),
    ];

    points
        .iter()
        .map(|&(v, k)| TitrationPoint::new(v, k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
