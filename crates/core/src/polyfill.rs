//! Polygon fill: covering each row's polygon with cells.

use h3o::Resolution;

use crate::apply;
use crate::column::{COLUMN_GEOMETRY, COLUMN_H3_POLYFILL};
use crate::error::{HexError, Result};
use crate::frame::HexFrame;
use crate::geometry;

impl HexFrame {
    /// Assigns the cells at `resolution` whose centroid falls inside each
    /// row's polygon to the `h3_polyfill` column.
    ///
    /// Requires WKT polygon geometry in the `geometry` column. With
    /// `explode` the lists are flattened vertically; a polygon too small to
    /// cover any cell centroid then contributes zero rows.
    pub fn polyfill(&self, resolution: Resolution, explode: bool) -> Result<HexFrame> {
        let series = self
            .dataframe()
            .column(COLUMN_GEOMETRY)
            .map_err(|_| HexError::MissingColumn(COLUMN_GEOMETRY.to_string()))?
            .as_materialized_series();
        let geoms = series.str().map_err(|_| HexError::ColumnType {
            column: COLUMN_GEOMETRY.to_string(),
            expected: "str",
            got: series.dtype().to_string(),
        })?;

        let mut lists: Vec<Vec<String>> = Vec::with_capacity(geoms.len());
        for wkt in geoms {
            let wkt = wkt.ok_or_else(|| HexError::InvalidGeometry("null geometry".to_string()))?;
            let polygon = geometry::polygon_from_wkt(wkt)?;
            lists.push(
                geometry::tile_polygon(&polygon, resolution)?
                    .into_iter()
                    .map(|c| c.to_string())
                    .collect(),
            );
        }

        let df = if explode {
            apply::explode_frame(self.dataframe(), lists, COLUMN_H3_POLYFILL)?
        } else {
            let mut df = self.dataframe().clone();
            df.with_column(apply::list_column(COLUMN_H3_POLYFILL, lists))?;
            df
        };
        Ok(HexFrame::new(df))
    }
}
