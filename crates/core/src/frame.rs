//! DataFrame wrappers distinguishing key-indexed tables from cell-indexed
//! tables.
//!
//! [`HexFrame`] wraps a table whose rows are identified by an arbitrary key;
//! [`CellFrame`] wraps a table with a designated H3 cell column that acts as
//! the row identity. Operations that consume cell addresses are only
//! available on [`CellFrame`], so calling them on a table that has no cell
//! column is a compile-time impossibility rather than a runtime surprise.

use std::fmt::{self, Debug, Display, Formatter};

use polars::prelude::{DataFrame, DataType, StringChunked};
use tracing::debug;

use crate::column::COLUMN_GEOMETRY;
use crate::error::{HexError, Result};

/// Coordinate reference system tag attached to frames carrying geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crs {
    /// WGS 84 geographic coordinates (EPSG:4326).
    Wgs84,
}

impl Crs {
    pub fn as_str(self) -> &'static str {
        match self {
            Crs::Wgs84 => "EPSG:4326",
        }
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How index assignment obtains a coordinate pair for each row.
///
/// Resolved once per operation, never re-detected per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordSource {
    /// Bare latitude/longitude columns.
    Columns { lat: String, lng: String },
    /// WKT point geometry in the `geometry` column.
    PointGeometry,
}

/// A table whose rows are identified by an arbitrary key.
#[derive(Clone)]
pub struct HexFrame {
    df: DataFrame,
}

impl HexFrame {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }

    /// Picks the coordinate source: point geometry wins when present.
    pub(crate) fn coord_source(&self, lat_col: &str, lng_col: &str) -> CoordSource {
        if self.df.get_column_names_str().contains(&COLUMN_GEOMETRY) {
            CoordSource::PointGeometry
        } else {
            CoordSource::Columns {
                lat: lat_col.to_string(),
                lng: lng_col.to_string(),
            }
        }
    }
}

impl From<DataFrame> for HexFrame {
    fn from(df: DataFrame) -> Self {
        Self::new(df)
    }
}

impl Debug for HexFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.df, f)
    }
}

impl Display for HexFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.df, f)
    }
}

/// A table whose row identity is a designated H3 cell column.
///
/// The designated column holds cell addresses as lowercase hex string
/// tokens. Tokens are parsed on use; a malformed token aborts the operation
/// that reads it (see [`crate::error::HexError::InvalidCellAddress`]).
#[derive(Clone)]
pub struct CellFrame {
    df: DataFrame,
    cell_column: String,
    crs: Option<Crs>,
}

impl CellFrame {
    /// Wraps a dataframe, designating `cell_column` as the cell address
    /// column. The column must exist and hold strings.
    pub fn from_dataframe<S>(df: DataFrame, cell_column: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let cell_column = cell_column.into();
        let dtype = df
            .column(&cell_column)
            .map_err(|_| HexError::MissingColumn(cell_column.clone()))?
            .dtype()
            .clone();
        if dtype != DataType::String {
            return Err(HexError::ColumnType {
                column: cell_column,
                expected: "str",
                got: dtype.to_string(),
            });
        }
        debug!(
            rows = df.height(),
            cell_column = cell_column.as_str(),
            "cell-indexed frame"
        );
        Ok(Self {
            df,
            cell_column,
            crs: None,
        })
    }

    /// Internal constructor for frames whose cell column was just derived.
    pub(crate) fn from_parts(df: DataFrame, cell_column: String, crs: Option<Crs>) -> Self {
        Self {
            df,
            cell_column,
            crs,
        }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Hands back the table with the cell column as an ordinary column.
    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }

    /// Name of the designated cell column.
    pub fn cell_column(&self) -> &str {
        &self.cell_column
    }

    /// Coordinate reference system of the `geometry` column, if any.
    pub fn crs(&self) -> Option<Crs> {
        self.crs
    }

    /// The cell address tokens, one per row.
    pub(crate) fn cell_tokens(&self) -> Result<&StringChunked> {
        Ok(self
            .df
            .column(&self.cell_column)?
            .as_materialized_series()
            .str()?)
    }

    /// Same designation and CRS, different data.
    pub(crate) fn with_frame(&self, df: DataFrame) -> Self {
        Self {
            df,
            cell_column: self.cell_column.clone(),
            crs: self.crs,
        }
    }

    pub(crate) fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }
}

impl Debug for CellFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.df, f)
    }
}

impl Display for CellFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.df, f)
    }
}
