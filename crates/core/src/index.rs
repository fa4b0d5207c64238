//! Index assignment: deriving a cell column from coordinates or geometry.

use h3o::{LatLng, Resolution};
use itertools::izip;
use polars::prelude::{Column, DataFrame, DataType};

use crate::column::{COLUMN_GEOMETRY, format_resolution};
use crate::error::{HexError, Result};
use crate::frame::{CellFrame, CoordSource, HexFrame};
use crate::geometry;

/// Options for [`HexFrame::geo_to_h3`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoToH3Options {
    /// Name of the latitude column when no geometry column is present.
    pub lat_col: String,
    /// Name of the longitude column when no geometry column is present.
    pub lng_col: String,
}

impl Default for GeoToH3Options {
    fn default() -> Self {
        Self {
            lat_col: "lat".to_string(),
            lng_col: "lng".to_string(),
        }
    }
}

/// Reads a column as f64 values, casting numeric dtypes as needed.
/// Nulls come out as NaN and fail coordinate validation downstream.
pub(crate) fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .map_err(|_| HexError::MissingColumn(name.to_string()))?
        .as_materialized_series();
    let casted = series
        .cast(&DataType::Float64)
        .map_err(|_| HexError::ColumnType {
            column: name.to_string(),
            expected: "numeric",
            got: series.dtype().to_string(),
        })?;
    Ok(casted
        .f64()?
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

impl HexFrame {
    /// Derives the H3 cell containing each row's point at `resolution` and
    /// promotes the result to the frame's cell column (named `h3_<rr>`).
    ///
    /// Rows with point geometry use the `geometry` column; otherwise the
    /// latitude/longitude columns named in `options` are read directly.
    /// The unpromoted table is recovered with [`CellFrame::into_dataframe`].
    pub fn geo_to_h3(&self, resolution: Resolution, options: &GeoToH3Options) -> Result<CellFrame> {
        let coords = self.coord_pairs(options)?;
        let mut tokens: Vec<String> = Vec::with_capacity(coords.len());
        for (lat, lng) in coords {
            let center = LatLng::new(lat, lng).map_err(|_| HexError::InvalidLatLng { lat, lng })?;
            tokens.push(center.to_cell(resolution).to_string());
        }
        let column_name = format_resolution(resolution);
        let mut df = self.dataframe().clone();
        df.with_column(Column::new::<Vec<String>, [String]>(
            column_name.as_str().into(),
            tokens,
        ))?;
        CellFrame::from_dataframe(df, column_name)
    }

    /// One (lat, lng) pair per row from the resolved coordinate source.
    fn coord_pairs(&self, options: &GeoToH3Options) -> Result<Vec<(f64, f64)>> {
        match self.coord_source(&options.lat_col, &options.lng_col) {
            CoordSource::PointGeometry => {
                let series = self
                    .dataframe()
                    .column(COLUMN_GEOMETRY)?
                    .as_materialized_series();
                let geoms = series.str().map_err(|_| HexError::ColumnType {
                    column: COLUMN_GEOMETRY.to_string(),
                    expected: "str",
                    got: series.dtype().to_string(),
                })?;
                let mut coords = Vec::with_capacity(geoms.len());
                for wkt in geoms {
                    let wkt =
                        wkt.ok_or_else(|| HexError::InvalidGeometry("null geometry".to_string()))?;
                    let point = geometry::point_from_wkt(wkt)?;
                    coords.push((point.y(), point.x()));
                }
                Ok(coords)
            }
            CoordSource::Columns { lat, lng } => {
                let lats = numeric_column(self.dataframe(), &lat)?;
                let lngs = numeric_column(self.dataframe(), &lng)?;
                Ok(izip!(lats, lngs).collect())
            }
        }
    }
}
