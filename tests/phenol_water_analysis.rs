//! Integration tests: phenol-water analysis through tables and charts

use chemlab_rs::analysis::{phenol_water, samples, AnalysisError, MiscibilityObservation, MiscibilitySeries};
use chemlab_rs::output::{Chartable, Tabular, Annotation};

mod common;
use common::{relative_error, textbook_miscibility_series};

// =================================================================================================
// Derived columns
// =================================================================================================

#[test]
fn test_every_row_has_valid_derived_columns() {
    let series = textbook_miscibility_series();
    let analysis = phenol_water::analyze(&series).unwrap();

    assert_eq!(analysis.rows.len(), series.len());
    for (row, observation) in analysis.rows.iter().zip(series.observations()) {
        assert!((0.0..=100.0).contains(&row.volume_percent_phenol));

        let mean = (observation.disappearance_temp_c + observation.appearance_temp_c) / 2.0;
        assert_eq!(row.mean_temp_c, mean);
    }
}

#[test]
fn test_critical_point_is_highest_mean() {
    let analysis = phenol_water::analyze(&textbook_miscibility_series()).unwrap();
    let cp = analysis.critical_point;

    let max_mean = analysis
        .rows
        .iter()
        .map(|r| r.mean_temp_c)
        .fold(f64::NEG_INFINITY, f64::max);

    assert_eq!(cp.temperature_c, max_mean);
    assert_eq!(cp.row, 3);
    assert!(relative_error(cp.temperature_c, 66.8) < 1e-12);
    assert!(relative_error(cp.phenol_volume_percent, 500.0 / 14.0) < 1e-12);
}

#[test]
fn test_default_dataset_peaks_at_last_row() {
    // Classroom defaults rise monotonically, so the last row is the maximum
    let analysis = phenol_water::analyze(&samples::phenol_water(16)).unwrap();
    let cp = analysis.critical_point;

    assert_eq!(cp.row, 15);
    assert_eq!(cp.temperature_c, 90.0);
    assert!(relative_error(cp.phenol_volume_percent, 5.0 / 38.0 * 100.0) < 1e-12);
}

#[test]
fn test_all_equal_temperatures_pick_first_row() {
    let series: MiscibilitySeries = (0..6)
        .map(|i| MiscibilityObservation::new(5.0, 3.0 + i as f64, 65.0, 65.0))
        .collect();

    let cp = phenol_water::analyze(&series).unwrap().critical_point;
    assert_eq!(cp.row, 0);
    assert_eq!(cp.phenol_volume_percent, 62.5);
}

#[test]
fn test_invalid_row_rejects_whole_series() {
    let mut observations: Vec<_> = textbook_miscibility_series().observations().to_vec();
    observations[5] = MiscibilityObservation::new(0.0, 0.0, 60.0, 60.0);

    let err = phenol_water::analyze(&MiscibilitySeries::new(observations)).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidObservation { row: 5, .. }));
}

// =================================================================================================
// Presentation
// =================================================================================================

#[test]
fn test_table_matches_rows() {
    let analysis = phenol_water::analyze(&textbook_miscibility_series()).unwrap();
    let rows = analysis.rows();

    for (cells, annotated) in rows.iter().zip(&analysis.rows) {
        assert_eq!(cells[4], Some(annotated.volume_percent_phenol));
        assert_eq!(cells[5], Some(annotated.mean_temp_c));
    }
}

#[test]
fn test_chart_marks_critical_point() {
    let analysis = phenol_water::analyze(&textbook_miscibility_series()).unwrap();
    let spec = analysis.chart_spec();

    assert_eq!(spec.series.len(), 8);
    match &spec.annotations[..] {
        [Annotation::Marker { x, y, label }] => {
            assert_eq!(*x, analysis.critical_point.phenol_volume_percent);
            assert!(relative_error(*y, 66.8) < 1e-12);
            assert_eq!(label, "CST: 66.8°C at 35.7% phenol");
        }
        other => panic!("unexpected annotations {:?}", other),
    }
}
