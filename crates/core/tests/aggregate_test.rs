//! Port of the h3pandas aggregation test cases.
//!
//! Tests for the aggregation compositions.

use h3o::{LatLng, Resolution};
use hexframe_core::{
    AggOp, CellFrame, GeoToH3Options, HexFrame, Operation, geometry,
};
use indexmap::IndexMap;
use polars::df;
use polars::lazy::dsl::col;
use polars::prelude::{IntoLazy, SortMultipleOptions};

fn token(lat: f64, lng: f64, resolution: Resolution) -> String {
    LatLng::new(lat, lng).unwrap().to_cell(resolution).to_string()
}

/// Two rows in one resolution-8 cell, one row in another.
fn sample_frame() -> HexFrame {
    HexFrame::new(
        df!(
            "lat" => [50.088, 50.088, 51.507],
            "lng" => [14.421, 14.421, -0.128],
            "value" => [1i64, 2, 5],
        )
        .unwrap(),
    )
}

fn value_by_token(frame: &CellFrame) -> Vec<(String, i64)> {
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
        .i64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap());
    tokens.zip(values).collect()
}

#[test]
fn sum_collapses_rows_sharing_a_cell() {
    let out = sample_frame()
        .geo_to_h3_aggregate(
            Resolution::Eight,
            &Operation::default(),
            &GeoToH3Options::default(),
            false,
        )
        .unwrap();

    let cell_a = token(50.088, 14.421, Resolution::Eight);
    let cell_b = token(51.507, -0.128, Resolution::Eight);

    let mut expected = vec![(cell_a, 3i64), (cell_b, 5)];
    expected.sort();
    assert_eq!(value_by_token(&out), expected);

    // Coordinate columns are gone.
    assert!(out.dataframe().column("lat").is_err());
    assert!(out.dataframe().column("lng").is_err());
}

#[test]
fn aggregate_with_geometry_attaches_the_cell_boundary() {
    let out = sample_frame()
        .geo_to_h3_aggregate(
            Resolution::Eight,
            &Operation::default(),
            &GeoToH3Options::default(),
            true,
        )
        .unwrap();

    let tokens: Vec<String> = out
        .dataframe()
        .column("h3_08")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|t| t.unwrap().to_string())
        .collect();
    let wkts: Vec<String> = out
        .dataframe()
        .column("geometry")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|t| t.unwrap().to_string())
        .collect();

    for (token, wkt) in tokens.iter().zip(&wkts) {
        let polygon = geometry::polygon_from_wkt(wkt).unwrap();
        let cell: h3o::CellIndex = token.parse().unwrap();
        let expected = geometry::cell_boundary(cell);
        assert_eq!(polygon, expected);
    }
}

#[test]
fn aggregate_matches_manual_grouping() {
    let aggregated = sample_frame()
        .geo_to_h3_aggregate(
            Resolution::Eight,
            &Operation::Agg(AggOp::Sum),
            &GeoToH3Options::default(),
            false,
        )
        .unwrap()
        .into_dataframe();

    let manual = sample_frame()
        .geo_to_h3(Resolution::Eight, &GeoToH3Options::default())
        .unwrap()
        .into_dataframe()
        .drop_many(["lat", "lng"])
        .lazy()
        .group_by([col("h3_08")])
        .agg([col("value").sum()])
        .sort(["h3_08"], SortMultipleOptions::default())
        .collect()
        .unwrap();

    assert!(aggregated.equals(&manual));
}

#[test]
fn mean_reduction() {
    let out = sample_frame()
        .geo_to_h3_aggregate(
            Resolution::Eight,
            &Operation::Agg(AggOp::Mean),
            &GeoToH3Options::default(),
            false,
        )
        .unwrap();

    let means: Vec<f64> = out
        .dataframe()
        .column("value")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect();
    let mut sorted = means.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(sorted, [1.5, 5.0]);
}

#[test]
fn per_column_reduction_keeps_only_named_columns() {
    let frame = HexFrame::new(
        df!(
            "lat" => [50.088, 50.088],
            "lng" => [14.421, 14.421],
            "a" => [1i64, 3],
            "b" => [10.0f64, 20.0],
        )
        .unwrap(),
    );

    let mut per_column = IndexMap::new();
    per_column.insert("a".to_string(), AggOp::Sum);
    per_column.insert("b".to_string(), AggOp::Mean);

    let out = frame
        .geo_to_h3_aggregate(
            Resolution::Eight,
            &Operation::PerColumn(per_column),
            &GeoToH3Options::default(),
            false,
        )
        .unwrap();

    assert_eq!(out.dataframe().height(), 1);
    let a = out
        .dataframe()
        .column("a")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .get(0)
        .unwrap();
    let b = out
        .dataframe()
        .column("b")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .get(0)
        .unwrap();
    assert_eq!(a, 4);
    assert!((b - 15.0).abs() < 1e-12);
}

#[test]
fn parent_aggregate_groups_by_ancestor() {
    // Two different resolution-9 cells under the same resolution-5 parent.
    let near_a = token(50.088, 14.421, Resolution::Nine);
    let near_b = token(50.089, 14.422, Resolution::Nine);
    let far = token(51.507, -0.128, Resolution::Nine);
    let df = df!(
        "cell" => [near_a.clone(), near_b, far],
        "value" => [1i64, 2, 5],
    )
    .unwrap();
    let frame = CellFrame::from_dataframe(df, "cell").unwrap();

    let out = frame
        .h3_to_parent_aggregate(Resolution::Five, &Operation::default(), false)
        .unwrap();

    assert_eq!(out.cell_column(), "h3_05");
    let near_parent: h3o::CellIndex = near_a.parse::<h3o::CellIndex>().unwrap()
        .parent(Resolution::Five)
        .unwrap();

    let rows = value_by_token(&out);
    assert_eq!(rows.len(), 2);
    let near_row = rows
        .iter()
        .find(|(t, _)| *t == near_parent.to_string())
        .unwrap();
    assert_eq!(near_row.1, 3);

    // The original cell column does not survive the reduction.
    assert!(out.dataframe().column("cell").is_err());
}

#[test]
fn parent_aggregate_with_geometry() {
    let df = df!(
        "cell" => [token(50.088, 14.421, Resolution::Nine)],
        "value" => [1i64],
    )
    .unwrap();
    let frame = CellFrame::from_dataframe(df, "cell").unwrap();

    let out = frame
        .h3_to_parent_aggregate(Resolution::Five, &Operation::default(), true)
        .unwrap();
    assert!(out.dataframe().column("geometry").is_ok());
    assert_eq!(out.crs(), Some(hexframe_core::Crs::Wgs84));
}
