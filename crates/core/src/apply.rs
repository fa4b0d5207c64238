//! Row-wise combinators lifting per-cell functions over a frame.
//!
//! Every public accessor method funnels through one of two shapes:
//! `apply_cell_assign` (one value per row, appended as a column) or
//! `apply_cell_explode` (a list per row, flattened vertically with the
//! sibling columns replicated). The cell token of each row passes through
//! [`cell_from_token`], the single adapter that turns a malformed address
//! into [`HexError::InvalidCellAddress`] and aborts the whole operation.

use std::str::FromStr;

use h3o::CellIndex;
use polars::prelude::{Column, DataFrame, IdxCa, IdxSize, ListType, NamedFrom, PlSmallStr, Series};
use tracing::debug;

use crate::error::{HexError, Result};
use crate::frame::CellFrame;

/// Parses one cell token. A null entry counts as malformed.
pub(crate) fn cell_from_token(token: Option<&str>) -> Result<CellIndex> {
    let token = token.ok_or_else(|| HexError::InvalidCellAddress("<null>".to_string()))?;
    CellIndex::from_str(token).map_err(|_| HexError::InvalidCellAddress(token.to_string()))
}

/// Builds a `List(String)` column from per-row string lists. An empty list
/// stays an empty list, it does not become a null.
pub(crate) fn list_column(name: &str, rows: Vec<Vec<String>>) -> Column {
    let items: Vec<Series> = rows
        .into_iter()
        .map(|row| Series::new(PlSmallStr::EMPTY, row))
        .collect();
    Column::new::<Vec<Series>, ListType>(name.into(), items)
}

/// Replaces each row of `df` by one row per element of its list, replicating
/// the existing columns, and appends the flattened values as `name`.
///
/// Row order inside one original row's group follows the list order. An
/// empty list contributes zero rows.
pub(crate) fn explode_frame(df: &DataFrame, rows: Vec<Vec<String>>, name: &str) -> Result<DataFrame> {
    let mut indices: Vec<IdxSize> = Vec::new();
    let mut flattened: Vec<String> = Vec::new();
    for (row, values) in rows.into_iter().enumerate() {
        for value in values {
            indices.push(row as IdxSize);
            flattened.push(value);
        }
    }
    debug!(
        rows_in = df.height(),
        rows_out = indices.len(),
        column = name,
        "explode"
    );
    let mut exploded = df.take(&IdxCa::from_vec(PlSmallStr::EMPTY, indices))?;
    exploded.with_column(Column::new::<Vec<String>, [String]>(
        name.into(),
        flattened,
    ))?;
    Ok(exploded)
}

impl CellFrame {
    /// Applies `func` to every row's cell and assigns the results to
    /// `column_name`. An existing column of the same name is replaced.
    pub(crate) fn apply_cell_assign<T, F>(&self, mut func: F, column_name: &str) -> Result<CellFrame>
    where
        F: FnMut(CellIndex) -> Result<T>,
        Series: NamedFrom<Vec<T>, [T]>,
    {
        let tokens = self.cell_tokens()?;
        let mut values: Vec<T> = Vec::with_capacity(tokens.len());
        for token in tokens {
            values.push(func(cell_from_token(token)?)?);
        }
        let mut df = self.dataframe().clone();
        df.with_column(Column::new::<Vec<T>, [T]>(column_name.into(), values))?;
        Ok(self.with_frame(df))
    }

    /// As [`Self::apply_cell_assign`] for list-valued functions; the result
    /// is a `List(String)` column.
    pub(crate) fn apply_cell_list_assign<F>(&self, mut func: F, column_name: &str) -> Result<CellFrame>
    where
        F: FnMut(CellIndex) -> Result<Vec<String>>,
    {
        let tokens = self.cell_tokens()?;
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(tokens.len());
        for token in tokens {
            rows.push(func(cell_from_token(token)?)?);
        }
        let mut df = self.dataframe().clone();
        df.with_column(list_column(column_name, rows))?;
        Ok(self.with_frame(df))
    }

    /// Applies a list-valued `func` to every row's cell and explodes the
    /// result vertically.
    pub(crate) fn apply_cell_explode<F>(&self, mut func: F, column_name: &str) -> Result<CellFrame>
    where
        F: FnMut(CellIndex) -> Result<Vec<String>>,
    {
        let tokens = self.cell_tokens()?;
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(tokens.len());
        for token in tokens {
            rows.push(func(cell_from_token(token)?)?);
        }
        let df = explode_frame(self.dataframe(), rows, column_name)?;
        Ok(self.with_frame(df))
    }
}
