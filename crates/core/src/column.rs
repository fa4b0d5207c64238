//! Names of the columns derived by the accessor methods.

use h3o::Resolution;

/// Geometry column, WKT encoded.
pub const COLUMN_GEOMETRY: &str = "geometry";

/// Cells covering a polygon.
pub const COLUMN_H3_POLYFILL: &str = "h3_polyfill";

/// Cells within grid distance k, origin included.
pub const COLUMN_H3_K_RING: &str = "h3_k_ring";

/// Cells at exactly grid distance k.
pub const COLUMN_H3_HEX_RING: &str = "h3_hex_ring";

/// Direct parent cell.
pub const COLUMN_H3_PARENT: &str = "h3_parent";

/// Center child cell.
pub const COLUMN_H3_CENTER_CHILD: &str = "h3_center_child";

/// Resolution of each cell.
pub const COLUMN_H3_RESOLUTION: &str = "h3_resolution";

/// Base cell (resolution 0 ancestor number) of each cell.
pub const COLUMN_H3_BASE_CELL: &str = "h3_base_cell";

/// Whether each token is a valid cell address.
pub const COLUMN_H3_IS_VALID: &str = "h3_is_valid";

/// Cell area.
pub const COLUMN_H3_CELL_AREA: &str = "h3_cell_area";

/// Name of a cell column at the given resolution, e.g. `h3_09`.
pub fn format_resolution(resolution: Resolution) -> String {
    format!("h3_{:02}", u8::from(resolution))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_resolution_zero_pads() {
        assert_eq!(format_resolution(Resolution::Five), "h3_05");
        assert_eq!(format_resolution(Resolution::Twelve), "h3_12");
        assert_eq!(format_resolution(Resolution::Zero), "h3_00");
    }
}
