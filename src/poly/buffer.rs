use geo_clipper::{Clipper, EndType, JoinType};

use super::record::{PolyRecord, normalize_rings};
use crate::error::MergeError;

/// Scale factor used when interfacing with Clipper.
const CLIPPER_SCALE: f64 = 10_000_000.0;

/// Expand every record outward by `distance`, in coordinate units.
///
/// A distance of exactly zero is a recognized short-circuit: the input
/// sequence is passed through untouched. Records whose offset fails are
/// logged and dropped, never aborting the batch. Names survive buffering;
/// ids are re-derived from the expanded ring structure.
pub fn buffer(records: Vec<PolyRecord>, distance: f64) -> Vec<PolyRecord> {
    if distance == 0.0 {
        return records;
    }

    let mut buffered = Vec::with_capacity(records.len());
    for record in records {
        match buffer_record(&record, distance) {
            Ok(expanded) => buffered.push(expanded),
            Err(err) => eprintln!("[buffer] dropping {}: {err}", record.label()),
        }
    }
    buffered
}

fn buffer_record(record: &PolyRecord, distance: f64) -> Result<PolyRecord, MergeError> {
    let expanded = record.geometry().offset(
        distance,
        JoinType::Round(0.25),
        EndType::ClosedPolygon,
        CLIPPER_SCALE,
    );

    // An outward offset of a simple polygon has a single exterior; anything
    // else means the source rings were degenerate.
    let mut parts = expanded.0;
    if parts.len() != 1 {
        return Err(MergeError::GeometryOperationFailed {
            op: "offset",
            detail: format!("expected 1 polygon, got {}", parts.len()),
        });
    }

    PolyRecord::with_count(
        normalize_rings(parts.remove(0)),
        record.name().cloned(),
        record.merge_count(),
    )
}
