//! Index inversion: deriving geometry from the cell column.

use crate::column::COLUMN_GEOMETRY;
use crate::error::Result;
use crate::frame::{CellFrame, Crs};
use crate::geometry;

impl CellFrame {
    /// Assigns the centroid of each cell to the `geometry` column as a WKT
    /// point and tags the frame with WGS 84.
    ///
    /// Fails on the first malformed cell address.
    pub fn h3_to_geo(&self) -> Result<CellFrame> {
        let out = self.apply_cell_assign(
            |cell| Ok(geometry::point_to_wkt(&geometry::cell_centroid(cell))),
            COLUMN_GEOMETRY,
        )?;
        Ok(out.with_crs(Crs::Wgs84))
    }

    /// Assigns the hexagonal boundary of each cell to the `geometry` column
    /// as a WKT polygon and tags the frame with WGS 84.
    ///
    /// Fails on the first malformed cell address.
    pub fn h3_to_geo_boundary(&self) -> Result<CellFrame> {
        let out = self.apply_cell_assign(
            |cell| Ok(geometry::polygon_to_wkt(&geometry::cell_boundary(cell))),
            COLUMN_GEOMETRY,
        )?;
        Ok(out.with_crs(Crs::Wgs84))
    }
}
