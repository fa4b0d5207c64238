//! Geometry construction and the WKT codec for the `geometry` column.
//!
//! Polars has no geometry dtype, so geometries travel through the table as
//! WKT strings in WGS 84 coordinates, (x, y) = (lng, lat).

use geo_types::{Coord, LineString, Point, Polygon};
use h3o::geom::{ContainmentMode, PolyfillConfig, ToCells};
use h3o::{CellIndex, LatLng, Resolution};
use wkt::{ToWkt, TryFromWkt};

use crate::error::{HexError, Result};

/// Centroid of a cell as an (x=lng, y=lat) point.
pub fn cell_centroid(cell: CellIndex) -> Point<f64> {
    let center = LatLng::from(cell);
    Point::new(center.lng(), center.lat())
}

/// Boundary of a cell as a polygon with a closed (lng, lat) exterior ring.
pub fn cell_boundary(cell: CellIndex) -> Polygon<f64> {
    let ring: Vec<Coord<f64>> = cell
        .boundary()
        .iter()
        .map(|vertex| Coord {
            x: vertex.lng(),
            y: vertex.lat(),
        })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}

/// Cells at `resolution` whose centroid falls inside the polygon.
pub fn tile_polygon(polygon: &Polygon<f64>, resolution: Resolution) -> Result<Vec<CellIndex>> {
    let polygon = h3o::geom::Polygon::from_degrees(polygon.clone())
        .map_err(|e| HexError::InvalidGeometry(e.to_string()))?;
    let config = PolyfillConfig::new(resolution).containment_mode(ContainmentMode::ContainsCentroid);
    Ok(polygon.to_cells(config).collect())
}

/// Parses a WKT point, rejecting every other geometry type.
pub fn point_from_wkt(wkt: &str) -> Result<Point<f64>> {
    Point::try_from_wkt_str(wkt).map_err(|e| HexError::InvalidGeometry(e.to_string()))
}

/// Parses a WKT polygon, rejecting every other geometry type.
pub fn polygon_from_wkt(wkt: &str) -> Result<Polygon<f64>> {
    Polygon::try_from_wkt_str(wkt).map_err(|e| HexError::InvalidGeometry(e.to_string()))
}

/// WKT rendition of a point.
pub fn point_to_wkt(point: &Point<f64>) -> String {
    point.wkt_string()
}

/// WKT rendition of a polygon.
pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    polygon.wkt_string()
}
