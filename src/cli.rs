use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Polygon buffer/merge CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "polymerge", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Buffer every feature outward without merging
    Buffer(BufferArgs),

    /// Buffer features, then merge every overlapping cluster into one polygon
    Reduce(ReduceArgs),
}

#[derive(Args, Debug)]
pub struct BufferArgs {
    /// Input GeoJSON feature collection
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output GeoJSON file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Buffer radius in meters (0 disables buffering)
    #[arg(short, long, default_value_t = 0.0)]
    pub radius: f64,

    /// Treat the radius as raw coordinate units instead of meters
    #[arg(long)]
    pub planar: bool,

    /// Property key carrying each feature's name
    #[arg(long, default_value = "name")]
    pub name_key: String,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ReduceArgs {
    /// Input GeoJSON feature collection
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output GeoJSON file (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Buffer radius in meters applied before merging (0 skips buffering)
    #[arg(short, long, default_value_t = 0.0)]
    pub radius: f64,

    /// Treat the radius as raw coordinate units instead of meters
    #[arg(long)]
    pub planar: bool,

    /// Property key carrying each feature's name
    #[arg(long, default_value = "name")]
    pub name_key: String,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}
