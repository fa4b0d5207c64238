//! h3csv - attach H3 cell indexes to CSV tables.
//!
//! Reads a CSV with coordinate columns, derives the containing H3 cell per
//! row and writes the result back as CSV, either row by row (`index`) or
//! collapsed per cell (`aggregate`).

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use h3o::Resolution;
use hexframe_core::{AggOp, GeoToH3Options, HexFrame, Operation};
use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};

/// Attach H3 cell indexes to CSV tables.
#[derive(Parser, Debug)]
#[command(name = "h3csv")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a cell column, one cell per row.
    Index(IndexArgs),
    /// Group rows by cell and reduce their values.
    Aggregate(AggregateArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input CSV file.
    input: PathBuf,

    /// H3 resolution (0-15).
    #[arg(short, long, value_parser = parse_resolution)]
    resolution: Resolution,

    /// Name of the latitude column.
    #[arg(long, default_value = "lat")]
    lat_col: String,

    /// Name of the longitude column.
    #[arg(long, default_value = "lng")]
    lng_col: String,

    /// Output CSV file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct IndexArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct AggregateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Reduction applied to every value column.
    #[arg(long, default_value = "sum")]
    operation: AggOp,

    /// Attach the WKT boundary polygon of each cell.
    #[arg(long)]
    boundary: bool,
}

fn parse_resolution(s: &str) -> Result<Resolution, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| "resolution must be an integer".to_string())?;
    Resolution::try_from(value).map_err(|_| "resolution must be between 0 and 15".to_string())
}

fn read_csv(path: &PathBuf) -> anyhow::Result<DataFrame> {
    let df = CsvReadOptions::default()
        .try_into_reader_with_file_path(Some(path.clone()))
        .with_context(|| format!("cannot open {}", path.display()))?
        .finish()
        .with_context(|| format!("cannot parse {}", path.display()))?;
    tracing::debug!(rows = df.height(), "loaded csv");
    Ok(df)
}

fn write_csv(mut df: DataFrame, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            CsvWriter::new(file).finish(&mut df)?;
        }
        None => {
            CsvWriter::new(io::stdout()).finish(&mut df)?;
        }
    }
    Ok(())
}

fn options(common: &CommonArgs) -> GeoToH3Options {
    GeoToH3Options {
        lat_col: common.lat_col.clone(),
        lng_col: common.lng_col.clone(),
    }
}

fn run_index(args: IndexArgs) -> anyhow::Result<()> {
    let df = read_csv(&args.common.input)?;
    let indexed = HexFrame::new(df)
        .geo_to_h3(args.common.resolution, &options(&args.common))
        .context("indexing failed")?;
    write_csv(indexed.into_dataframe(), args.common.output.as_ref())
}

fn run_aggregate(args: AggregateArgs) -> anyhow::Result<()> {
    let df = read_csv(&args.common.input)?;
    let aggregated = HexFrame::new(df)
        .geo_to_h3_aggregate(
            args.common.resolution,
            &Operation::Agg(args.operation),
            &options(&args.common),
            args.boundary,
        )
        .context("aggregation failed")?;
    write_csv(aggregated.into_dataframe(), args.common.output.as_ref())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match cli.command {
        Command::Index(args) => run_index(args),
        Command::Aggregate(args) => run_aggregate(args),
    }
}
