//! Scalar per-cell introspection columns.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use polars::prelude::Column;

use crate::apply::cell_from_token;
use crate::column::{
    COLUMN_H3_BASE_CELL, COLUMN_H3_CELL_AREA, COLUMN_H3_IS_VALID, COLUMN_H3_RESOLUTION,
};
use crate::error::{HexError, Result};
use crate::frame::CellFrame;

/// Unit for [`CellFrame::cell_area`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaUnit {
    /// Square kilometers.
    #[default]
    Km2,
    /// Square meters.
    M2,
    /// Square radians.
    Rads2,
}

impl AreaUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            AreaUnit::Km2 => "km^2",
            AreaUnit::M2 => "m^2",
            AreaUnit::Rads2 => "rads^2",
        }
    }
}

impl Display for AreaUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaUnit {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "km^2" => Ok(AreaUnit::Km2),
            "m^2" => Ok(AreaUnit::M2),
            "rads^2" => Ok(AreaUnit::Rads2),
            other => Err(HexError::InvalidArgument(format!(
                "unknown area unit: {other} (expected km^2, m^2 or rads^2)"
            ))),
        }
    }
}

impl CellFrame {
    /// Assigns each cell's resolution to the `h3_resolution` column.
    pub fn h3_get_resolution(&self) -> Result<CellFrame> {
        self.apply_cell_assign(
            |cell| Ok(u8::from(cell.resolution())),
            COLUMN_H3_RESOLUTION,
        )
    }

    /// Assigns each cell's base cell number to the `h3_base_cell` column.
    pub fn h3_get_base_cell(&self) -> Result<CellFrame> {
        self.apply_cell_assign(|cell| Ok(u8::from(cell.base_cell())), COLUMN_H3_BASE_CELL)
    }

    /// Assigns a boolean validity column `h3_is_valid`.
    ///
    /// Unlike every other address-consuming method this one never fails: a
    /// malformed or null token simply yields `false`.
    pub fn h3_is_valid(&self) -> Result<CellFrame> {
        let values: Vec<bool> = self
            .cell_tokens()?
            .into_iter()
            .map(|token| cell_from_token(token).is_ok())
            .collect();
        let mut df = self.dataframe().clone();
        df.with_column(Column::new::<Vec<bool>, [bool]>(
            COLUMN_H3_IS_VALID.into(),
            values,
        ))?;
        Ok(self.with_frame(df))
    }

    /// Assigns each cell's area in `unit` to the `h3_cell_area` column.
    pub fn cell_area(&self, unit: AreaUnit) -> Result<CellFrame> {
        self.apply_cell_assign(
            |cell| {
                Ok(match unit {
                    AreaUnit::Km2 => cell.area_km2(),
                    AreaUnit::M2 => cell.area_m2(),
                    AreaUnit::Rads2 => cell.area_rads2(),
                })
            },
            COLUMN_H3_CELL_AREA,
        )
    }
}
