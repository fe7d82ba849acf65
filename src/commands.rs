pub mod buffer;
pub mod reduce;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::Cli;
use crate::io::read_from_geojson_bytes;
use crate::poly::{PolyRecord, flatten};

/// Meters per degree of latitude, WGS84 mean.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Reject stdout and refuse to clobber an existing file without --force.
pub(crate) fn check_output(output: &Path, force: bool) -> Result<()> {
    if output == Path::new("-") {
        bail!("stdout is not supported.");
    }
    if output.exists() && !force {
        bail!(
            "Output file exists: {} (pass --force to overwrite)",
            output.display()
        );
    }
    Ok(())
}

/// Read and flatten the input collection into polygon records.
pub(crate) fn load_records(cli: &Cli, input: &Path, name_key: &str) -> Result<Vec<PolyRecord>> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let features = read_from_geojson_bytes(&bytes, name_key)?;
    let records = flatten(&features);

    if cli.verbose > 0 {
        eprintln!(
            "[load] {} features -> {} polygon records",
            features.len(),
            records.len()
        );
    }
    Ok(records)
}

/// Resolve the buffer radius to coordinate units.
///
/// With --planar the radius passes through untouched; otherwise it is meters,
/// converted with an equirectangular approximation at the dataset's mean
/// latitude. Good enough for pre-render buffering at city scale; a
/// meters-true buffer would need a projection.
pub(crate) fn resolve_distance(radius: f64, planar: bool, records: &[PolyRecord]) -> Result<f64> {
    if radius < 0.0 {
        bail!("Radius must be non-negative");
    }
    if planar || radius == 0.0 || records.is_empty() {
        return Ok(radius);
    }

    let mean_lat = records
        .iter()
        .map(|record| (record.bbox().min().y + record.bbox().max().y) / 2.0)
        .sum::<f64>()
        / records.len() as f64;
    Ok(radius / (METERS_PER_DEGREE * mean_lat.to_radians().cos().max(0.01)))
}
