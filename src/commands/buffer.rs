use std::fs;

use anyhow::{Context, Result};

use crate::cli::{BufferArgs, Cli};
use crate::io::write_to_geojson_bytes;
use crate::poly::buffer;

use super::{check_output, load_records, resolve_distance};

pub fn run(cli: &Cli, args: &BufferArgs) -> Result<()> {
    check_output(&args.output, args.force)?;

    let records = load_records(cli, &args.input, &args.name_key)?;
    let distance = resolve_distance(args.radius, args.planar, &records)?;

    let buffered = buffer(records, distance);
    if cli.verbose > 0 {
        eprintln!("[buffer] {} polygons buffered by {distance}", buffered.len());
    }

    let bytes = write_to_geojson_bytes(&buffered)?;
    fs::write(&args.output, bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Wrote {} polygons -> {}",
        buffered.len(),
        args.output.display()
    );
    Ok(())
}
