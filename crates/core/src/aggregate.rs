//! Aggregation compositions: assign a spatial key, group by it, reduce.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use h3o::Resolution;
use indexmap::IndexMap;
use polars::lazy::dsl::{Expr, col};
#[cfg(feature = "experimental")]
use polars::lazy::dsl::lit;
use polars::prelude::{DataFrame, IntoLazy, SortMultipleOptions};
#[cfg(feature = "experimental")]
use polars::prelude::DataType;
use tracing::debug;

use crate::column::{COLUMN_GEOMETRY, format_resolution};
use crate::error::Result;
use crate::frame::{CellFrame, HexFrame};
use crate::index::GeoToH3Options;

#[cfg(feature = "experimental")]
use crate::column::{COLUMN_H3_HEX_RING, COLUMN_H3_K_RING, COLUMN_H3_POLYFILL};
#[cfg(feature = "experimental")]
use crate::error::HexError;

/// A named reduction applied to every value column of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggOp {
    #[default]
    Sum,
    Mean,
    Min,
    Max,
    Median,
    Count,
}

impl AggOp {
    fn apply(self, expr: Expr) -> Expr {
        match self {
            AggOp::Sum => expr.sum(),
            AggOp::Mean => expr.mean(),
            AggOp::Min => expr.min(),
            AggOp::Max => expr.max(),
            AggOp::Median => expr.median(),
            AggOp::Count => expr.count(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AggOp::Sum => "sum",
            AggOp::Mean => "mean",
            AggOp::Min => "min",
            AggOp::Max => "max",
            AggOp::Median => "median",
            AggOp::Count => "count",
        }
    }
}

impl Display for AggOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggOp {
    type Err = crate::error::HexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(AggOp::Sum),
            "mean" => Ok(AggOp::Mean),
            "min" => Ok(AggOp::Min),
            "max" => Ok(AggOp::Max),
            "median" => Ok(AggOp::Median),
            "count" => Ok(AggOp::Count),
            other => Err(crate::error::HexError::InvalidArgument(format!(
                "unknown aggregation: {other}"
            ))),
        }
    }
}

/// How grouped rows are reduced.
#[derive(Debug, Clone)]
pub enum Operation {
    /// One reduction for every value column.
    Agg(AggOp),
    /// A reduction per named column; unnamed columns are dropped.
    PerColumn(IndexMap<String, AggOp>),
    /// Arbitrary aggregation expressions.
    Exprs(Vec<Expr>),
}

impl Default for Operation {
    fn default() -> Self {
        Operation::Agg(AggOp::Sum)
    }
}

impl Operation {
    fn exprs(&self, value_columns: &[String]) -> Vec<Expr> {
        match self {
            Operation::Agg(op) => value_columns
                .iter()
                .map(|name| op.apply(col(name.as_str())))
                .collect(),
            Operation::PerColumn(map) => map
                .iter()
                .map(|(name, op)| op.apply(col(name.as_str())))
                .collect(),
            Operation::Exprs(exprs) => exprs.clone(),
        }
    }
}

#[cfg(feature = "experimental")]
fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Drops `drop`, groups by `key` and reduces the remaining columns.
/// Output rows are sorted by the group key.
fn group_reduce(
    df: DataFrame,
    key: &str,
    operation: &Operation,
    drop: &[&str],
) -> Result<DataFrame> {
    let df = df.drop_many(drop.iter().copied());
    let value_columns: Vec<String> = df
        .get_column_names_str()
        .into_iter()
        .filter(|name| *name != key)
        .map(str::to_string)
        .collect();
    let exprs = operation.exprs(&value_columns);
    let grouped = df
        .lazy()
        .group_by([col(key)])
        .agg(exprs)
        .sort([key], SortMultipleOptions::default())
        .collect()?;
    Ok(grouped)
}

/// Multiplies every numeric column except `skip` by `factor`.
#[cfg(feature = "experimental")]
fn scale_numeric(df: DataFrame, skip: &str, factor: f64) -> Result<DataFrame> {
    let exprs: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|c| c.name().as_str() != skip && is_numeric(c.dtype()))
        .map(|c| col(c.name().as_str()) * lit(factor))
        .collect();
    if exprs.is_empty() {
        return Ok(df);
    }
    Ok(df.lazy().with_columns(exprs).collect()?)
}

impl HexFrame {
    /// Assigns the H3 cell at `resolution` to every row, groups rows
    /// sharing a cell and reduces them with `operation`.
    ///
    /// Coordinate columns and geometry are dropped before grouping; with
    /// `return_geometry` the cell boundary is recomputed from the group key
    /// afterwards.
    pub fn geo_to_h3_aggregate(
        &self,
        resolution: Resolution,
        operation: &Operation,
        options: &GeoToH3Options,
        return_geometry: bool,
    ) -> Result<CellFrame> {
        debug!(resolution = u8::from(resolution), "geo_to_h3 aggregate");
        let indexed = self.geo_to_h3(resolution, options)?;
        let key = indexed.cell_column().to_string();
        let df = group_reduce(
            indexed.into_dataframe(),
            &key,
            operation,
            &[
                options.lat_col.as_str(),
                options.lng_col.as_str(),
                COLUMN_GEOMETRY,
            ],
        )?;
        let out = CellFrame::from_parts(df, key, None);
        if return_geometry {
            out.h3_to_geo_boundary()
        } else {
            Ok(out)
        }
    }
}

impl CellFrame {
    /// Assigns the ancestor at `resolution` to every row, groups rows
    /// sharing an ancestor and reduces them with `operation`.
    ///
    /// Fails on the first malformed cell address or when `resolution` is
    /// finer than a cell's own.
    pub fn h3_to_parent_aggregate(
        &self,
        resolution: Resolution,
        operation: &Operation,
        return_geometry: bool,
    ) -> Result<CellFrame> {
        debug!(resolution = u8::from(resolution), "parent aggregate");
        let key = format_resolution(resolution);
        let parented = self.h3_to_parent(Some(resolution))?;
        let mut drop: Vec<&str> = vec![COLUMN_GEOMETRY];
        if self.cell_column() != key {
            drop.push(self.cell_column());
        }
        let df = group_reduce(parented.into_dataframe(), &key, operation, &drop)?;
        let out = CellFrame::from_parts(df, key, None);
        if return_geometry {
            out.h3_to_geo_boundary()
        } else {
            Ok(out)
        }
    }
}

/// Weighting scheme for [`CellFrame::k_ring_smoothing`].
#[cfg(feature = "experimental")]
#[derive(Debug, Clone, PartialEq)]
pub enum KRingWeighting {
    /// Uniform average over the disk of grid distance `k`.
    Disk(u32),
    /// One weight per grid distance, index 0 weighting the origin cell.
    /// Weights are normalized by the ring sizes `1, 6, 12, ...`.
    Rings(Vec<f64>),
}

#[cfg(feature = "experimental")]
impl CellFrame {
    /// Experimental. Spreads each row's numeric values over the cell's
    /// neighborhood and sums the contributions per neighboring cell.
    ///
    /// Non-numeric value columns are dropped. The result is keyed by the
    /// neighborhood column (`h3_k_ring` for [`KRingWeighting::Disk`],
    /// `h3_hex_ring` for [`KRingWeighting::Rings`]).
    pub fn k_ring_smoothing(
        &self,
        weighting: &KRingWeighting,
        return_geometry: bool,
    ) -> Result<CellFrame> {
        let out = match weighting {
            KRingWeighting::Disk(k) => self.smooth_disk(*k)?,
            KRingWeighting::Rings(weights) => self.smooth_rings(weights)?,
        };
        if return_geometry {
            out.h3_to_geo_boundary()
        } else {
            Ok(out)
        }
    }

    fn smooth_disk(&self, k: u32) -> Result<CellFrame> {
        debug!(k, "k-ring smoothing");
        let exploded = self.k_ring(k, true)?;
        let df = self.numeric_with_key(exploded.into_dataframe(), COLUMN_H3_K_RING)?;
        let summed = group_reduce(df, COLUMN_H3_K_RING, &Operation::Agg(AggOp::Sum), &[])?;
        let disk_size = (1 + 3 * k * (k + 1)) as f64;
        let scaled = scale_numeric(summed, COLUMN_H3_K_RING, 1.0 / disk_size)?;
        Ok(CellFrame::from_parts(
            scaled,
            COLUMN_H3_K_RING.to_string(),
            None,
        ))
    }

    fn smooth_rings(&self, weights: &[f64]) -> Result<CellFrame> {
        if weights.is_empty() {
            return Err(HexError::EmptyWeights);
        }
        debug!(rings = weights.len(), "weighted ring smoothing");
        // Ring at distance d holds 6d cells (one at the origin).
        let multipliers: Vec<f64> = (0..weights.len())
            .map(|d| if d == 0 { 1.0 } else { (6 * d) as f64 })
            .collect();
        let norm: f64 = weights.iter().zip(&multipliers).map(|(w, m)| w * m).sum();
        if norm == 0.0 {
            return Err(HexError::InvalidArgument(
                "ring weights sum to zero".to_string(),
            ));
        }

        let mut frames: Vec<DataFrame> = Vec::with_capacity(weights.len());
        for (distance, weight) in weights.iter().enumerate() {
            let ring = self.hex_ring(distance as u32, true)?;
            let df = self.numeric_with_key(ring.into_dataframe(), COLUMN_H3_HEX_RING)?;
            frames.push(scale_numeric(df, COLUMN_H3_HEX_RING, weight / norm)?);
        }
        let mut combined = frames.remove(0);
        for frame in &frames {
            combined.vstack_mut(frame)?;
        }

        let summed = group_reduce(combined, COLUMN_H3_HEX_RING, &Operation::Agg(AggOp::Sum), &[])?;
        Ok(CellFrame::from_parts(
            summed,
            COLUMN_H3_HEX_RING.to_string(),
            None,
        ))
    }

    /// Keeps `key` plus the numeric value columns, dropping the original
    /// cell column and everything non-numeric.
    fn numeric_with_key(&self, df: DataFrame, key: &str) -> Result<DataFrame> {
        let mut keep: Vec<String> = vec![key.to_string()];
        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == key || name == self.cell_column() {
                continue;
            }
            if is_numeric(column.dtype()) {
                keep.push(name.to_string());
            }
        }
        Ok(df.select(keep)?)
    }
}

#[cfg(feature = "experimental")]
impl HexFrame {
    /// Experimental. Replaces each row's polygon by the cells covering it
    /// at `resolution`, re-keying the table by the covering cell.
    ///
    /// No reduction is applied; overlapping polygons produce duplicate
    /// cell rows.
    pub fn polyfill_resample(
        &self,
        resolution: Resolution,
        return_geometry: bool,
    ) -> Result<CellFrame> {
        debug!(resolution = u8::from(resolution), "polyfill resample");
        let filled = self.polyfill(resolution, true)?;
        let out = CellFrame::from_dataframe(filled.into_dataframe(), COLUMN_H3_POLYFILL)?;
        if return_geometry {
            out.h3_to_geo_boundary()
        } else {
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agg_op_round_trips_through_str() {
        for op in [
            AggOp::Sum,
            AggOp::Mean,
            AggOp::Min,
            AggOp::Max,
            AggOp::Median,
            AggOp::Count,
        ] {
            assert_eq!(op.as_str().parse::<AggOp>().unwrap(), op);
        }
        assert!("mode".parse::<AggOp>().is_err());
    }
}
