//! Error types for the hexframe library.

use thiserror::Error;

/// Primary error type for H3 dataframe operations.
#[derive(Error, Debug)]
pub enum HexError {
    #[error("invalid H3 address: {0}")]
    InvalidCellAddress(String),

    #[error("invalid coordinate: lat={lat}, lng={lng}")]
    InvalidLatLng { lat: f64, lng: f64 },

    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("column {column}: expected {expected}, got {got}")]
    ColumnType {
        column: String,
        expected: &'static str,
        got: String,
    },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("weights must not be empty")]
    EmptyWeights,

    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Convenience Result type alias for HexError.
pub type Result<T> = std::result::Result<T, HexError>;
