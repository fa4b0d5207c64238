//! Tests for the experimental aggregation compositions.

use std::collections::HashMap;

use h3o::{LatLng, Resolution};
use hexframe_core::{CellFrame, HexError, HexFrame, KRingWeighting, geometry};
use polars::df;

fn origin_token() -> String {
    LatLng::new(50.088, 14.421)
        .unwrap()
        .to_cell(Resolution::Nine)
        .to_string()
}

fn single_cell_frame(value: f64) -> CellFrame {
    let df = df!("cell" => [origin_token()], "value" => [value]).unwrap();
    CellFrame::from_dataframe(df, "cell").unwrap()
}

fn value_map(frame: &CellFrame) -> HashMap<String, f64> {
    let tokens = frame
        .dataframe()
        .column(frame.cell_column())
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|t| t.unwrap().to_string());
    let values = frame
        .dataframe()
        .column("value")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap());
    tokens.zip(values).collect()
}

#[test]
fn disk_smoothing_spreads_a_single_value_uniformly() {
    let out = single_cell_frame(7.0)
        .k_ring_smoothing(&KRingWeighting::Disk(1), false)
        .unwrap();

    assert_eq!(out.cell_column(), "h3_k_ring");
    let values = value_map(&out);
    assert_eq!(values.len(), 7);
    for value in values.values() {
        assert!((value - 1.0).abs() < 1e-12);
    }
}

#[test]
fn disk_smoothing_equals_uniform_ring_weights() {
    // A k=3 disk and per-ring weights [1, 1, 1, 1] describe the same
    // neighborhood average.
    let disk = single_cell_frame(37.0)
        .k_ring_smoothing(&KRingWeighting::Disk(3), false)
        .unwrap();
    let rings = single_cell_frame(37.0)
        .k_ring_smoothing(&KRingWeighting::Rings(vec![1.0, 1.0, 1.0, 1.0]), false)
        .unwrap();

    let disk_values = value_map(&disk);
    let ring_values = value_map(&rings);
    assert_eq!(disk_values.len(), ring_values.len());
    for (token, value) in &disk_values {
        let other = ring_values.get(token).unwrap();
        assert!((value - other).abs() < 1e-9);
    }
}

#[test]
fn ring_smoothing_rejects_empty_weights() {
    assert!(matches!(
        single_cell_frame(1.0)
            .k_ring_smoothing(&KRingWeighting::Rings(vec![]), false)
            .unwrap_err(),
        HexError::EmptyWeights
    ));
}

#[test]
fn smoothing_with_geometry_attaches_boundaries() {
    let out = single_cell_frame(7.0)
        .k_ring_smoothing(&KRingWeighting::Disk(1), true)
        .unwrap();
    assert!(out.dataframe().column("geometry").is_ok());
    assert_eq!(out.crs(), Some(hexframe_core::Crs::Wgs84));
}

#[test]
fn polyfill_resample_rekeys_by_covering_cell() {
    let coarse = LatLng::new(50.088, 14.421)
        .unwrap()
        .to_cell(Resolution::Five);
    let wkt = geometry::polygon_to_wkt(&geometry::cell_boundary(coarse));
    let frame = HexFrame::new(df!("value" => [1i64], "geometry" => [wkt]).unwrap());

    let out = frame.polyfill_resample(Resolution::Six, false).unwrap();
    assert_eq!(out.cell_column(), "h3_polyfill");
    assert!(out.dataframe().height() > 1);

    // Each row keeps the original value; no reduction is applied.
    let values: Vec<i64> = out
        .dataframe()
        .column("value")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect();
    assert!(values.iter().all(|v| *v == 1));
}
