//! Classroom default datasets
//!
//! Pre-filled readings used by the lab handout before students enter their
//! own numbers. Handy for demos and benchmarks.

use super::conductometric::{TitrationPoint, TitrationSeries};
use super::phenol_water::{MiscibilityObservation, MiscibilitySeries};

/// Allowed number of phenol-water observations
pub const PHENOL_WATER_ROWS: std::ops::RangeInclusive<usize> = 5..=16;

/// Allowed number of titration points
pub const CONDUCTOMETRIC_POINTS: std::ops::RangeInclusive<usize> = 10..=40;

/// Phenol-water readings: 5 ml phenol, water in 2 ml steps from 3 ml
///
/// Both temperatures of row `i` are `60 + 2i` °C.
///
/// # Panics
///
/// Panics if `n` is outside [`PHENOL_WATER_ROWS`].
pub fn phenol_water(n: usize) -> MiscibilitySeries {
    assert!(
        PHENOL_WATER_ROWS.contains(&n),
        "Phenol-water sample size must be in [5, 16], got {}",
        n
    );

    (0..n)
        .map(|i| {
            let i = i as f64;
            let temp = 60.0 + 2.0 * i;
            MiscibilityObservation::new(5.0, 3.0 + 2.0 * i, temp, temp)
        })
        .collect()
}

/// Titration readings in 0.2 ml NaOH steps
///
/// Conductance falls by 0.02 mS per step over the first ten points, then
/// rises by 0.03 mS per step.
///
/// # Panics
///
/// Panics if `n` is outside [`CONDUCTOMETRIC_POINTS`].
pub fn conductometric(n: usize) -> TitrationSeries {
    assert!(
        CONDUCTOMETRIC_POINTS.contains(&n),
        "Titration sample size must be in [10, 40], got {}",
        n
    );

    (0..n)
        .map(|i| {
            let conductance = if i < 10 {
                0.8 - 0.02 * i as f64
            } else {
                0.6 + 0.03 * (i - 10) as f64
            };
            TitrationPoint::new(0.2 * i as f64, conductance)
        })
        .collect()
}
