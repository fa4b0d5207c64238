//! Neighborhood expansion: grid disks, hollow rings, parents and children.

use h3o::{CellIndex, Resolution};

use crate::column::{COLUMN_H3_CENTER_CHILD, COLUMN_H3_HEX_RING, COLUMN_H3_K_RING, format_resolution};
use crate::error::{HexError, Result};
use crate::frame::CellFrame;

fn grid_disk(cell: CellIndex, k: u32) -> Vec<String> {
    cell.grid_disk::<Vec<_>>(k)
        .into_iter()
        .map(|c| c.to_string())
        .collect()
}

/// Cells at exactly grid distance `k`. Derived from the distance-annotated
/// disk, which stays correct across pentagon distortions.
fn hollow_ring(cell: CellIndex, k: u32) -> Vec<String> {
    cell.grid_disk_distances::<Vec<_>>(k)
        .into_iter()
        .filter(|(_, distance)| *distance == k)
        .map(|(c, _)| c.to_string())
        .collect()
}

impl CellFrame {
    /// Assigns the cells within grid distance `k` of each row's cell
    /// (origin included) to the `h3_k_ring` column.
    ///
    /// With `explode` the list is flattened vertically, one row per
    /// neighboring cell, sibling columns replicated.
    pub fn k_ring(&self, k: u32, explode: bool) -> Result<CellFrame> {
        let func = |cell: CellIndex| Ok(grid_disk(cell, k));
        if explode {
            self.apply_cell_explode(func, COLUMN_H3_K_RING)
        } else {
            self.apply_cell_list_assign(func, COLUMN_H3_K_RING)
        }
    }

    /// Assigns the hollow ring at exactly grid distance `k` to the
    /// `h3_hex_ring` column, optionally exploded vertically.
    pub fn hex_ring(&self, k: u32, explode: bool) -> Result<CellFrame> {
        let func = |cell: CellIndex| Ok(hollow_ring(cell, k));
        if explode {
            self.apply_cell_explode(func, COLUMN_H3_HEX_RING)
        } else {
            self.apply_cell_list_assign(func, COLUMN_H3_HEX_RING)
        }
    }

    /// Assigns the ancestor of each cell at `resolution`, or the immediate
    /// parent when `None`. The column is named `h3_<rr>` for an explicit
    /// resolution and `h3_parent` otherwise.
    ///
    /// `Some(Resolution::Zero)` requests the coarsest ancestor; it is not
    /// the same as `None`. Requesting a resolution finer than a cell's own
    /// fails with [`HexError::InvalidResolution`].
    pub fn h3_to_parent(&self, resolution: Option<Resolution>) -> Result<CellFrame> {
        let column = match resolution {
            Some(r) => format_resolution(r),
            None => crate::column::COLUMN_H3_PARENT.to_string(),
        };
        self.apply_cell_assign(
            |cell| {
                let target = match resolution {
                    Some(r) => r,
                    None => cell.resolution().pred().ok_or_else(|| {
                        HexError::InvalidResolution(format!(
                            "cell {cell} is at resolution 0 and has no parent"
                        ))
                    })?,
                };
                cell.parent(target).map(|c| c.to_string()).ok_or_else(|| {
                    HexError::InvalidResolution(format!(
                        "no resolution {target} parent for cell {cell} at resolution {}",
                        cell.resolution()
                    ))
                })
            },
            &column,
        )
    }

    /// Assigns the center descendant of each cell at `resolution`, or the
    /// direct center child one level finer when `None`, to the
    /// `h3_center_child` column.
    pub fn h3_to_center_child(&self, resolution: Option<Resolution>) -> Result<CellFrame> {
        self.apply_cell_assign(
            |cell| {
                let target = match resolution {
                    Some(r) => r,
                    None => cell.resolution().succ().ok_or_else(|| {
                        HexError::InvalidResolution(format!(
                            "cell {cell} is at resolution 15 and has no children"
                        ))
                    })?,
                };
                cell.center_child(target)
                    .map(|c| c.to_string())
                    .ok_or_else(|| {
                        HexError::InvalidResolution(format!(
                            "no resolution {target} center child for cell {cell} at resolution {}",
                            cell.resolution()
                        ))
                    })
            },
            COLUMN_H3_CENTER_CHILD,
        )
    }
}
