//! hexframe - H3 hexagonal-grid indexing for polars DataFrames.
//!
//! A Rust port of the h3pandas dataframe accessor. Each method mirrors one
//! per-cell function of the H3 library and lifts it over every row of a
//! table: assigning a cell address from coordinates or geometry, converting
//! addresses back to centroid or boundary geometry, walking parent/child
//! relationships, expanding neighborhoods, and aggregating rows by cell.
//!
//! Tables come in two flavors. A [`HexFrame`] wraps a plain `DataFrame`;
//! [`HexFrame::geo_to_h3`] derives a cell column and promotes it, yielding
//! a [`CellFrame`] whose designated column is the row identity every other
//! method reads.
//!
//! # Example
//!
//! ```no_run
//! use hexframe_core::{GeoToH3Options, HexFrame};
//! use h3o::Resolution;
//! use polars::df;
//!
//! let df = df!("lat" => [50.0, 51.0], "lng" => [14.0, 15.0], "value" => [1, 2])?;
//! let indexed = HexFrame::new(df).geo_to_h3(Resolution::Nine, &GeoToH3Options::default())?;
//! let with_area = indexed.cell_area(Default::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
mod apply;
pub mod column;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod index;
pub mod inspect;
pub mod invert;
pub mod polyfill;
pub mod rings;

#[cfg(feature = "experimental")]
pub use aggregate::KRingWeighting;
pub use aggregate::{AggOp, Operation};
pub use error::{HexError, Result};
pub use frame::{CellFrame, CoordSource, Crs, HexFrame};
pub use index::GeoToH3Options;
pub use inspect::AreaUnit;
