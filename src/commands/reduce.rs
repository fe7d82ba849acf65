use std::fs;

use anyhow::{Context, Result};

use crate::cli::{Cli, ReduceArgs};
use crate::io::write_to_geojson_bytes;
use crate::poly::{buffer, reduce};

use super::{check_output, load_records, resolve_distance};

pub fn run(cli: &Cli, args: &ReduceArgs) -> Result<()> {
    check_output(&args.output, args.force)?;

    let records = load_records(cli, &args.input, &args.name_key)?;
    let distance = resolve_distance(args.radius, args.planar, &records)?;
    if cli.verbose > 0 && distance > 0.0 {
        eprintln!("[reduce] buffer distance {distance} (coordinate units)");
    }

    let buffered = buffer(records, distance);
    let (reduced, stats) = reduce(buffered);

    let bytes = write_to_geojson_bytes(&reduced)?;
    fs::write(&args.output, bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if cli.verbose > 0 {
        eprintln!(
            "[reduce] {} -> {} polygons",
            stats.input_polygons, stats.output_polygons
        );
        eprintln!(
            "[reduce] intersect scan {:?} across {} exact tests",
            stats.intersect_elapsed, stats.intersection_tests
        );
        eprintln!(
            "[reduce] union fold {:?} across {} unions",
            stats.union_elapsed, stats.unions
        );
    }
    if cli.verbose > 1 {
        eprintln!("{}", serde_json::to_string_pretty(&stats)?);
    }

    println!(
        "Wrote {} polygons -> {}",
        reduced.len(),
        args.output.display()
    );
    Ok(())
}
