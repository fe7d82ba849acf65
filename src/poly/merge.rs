use std::sync::Arc;
use std::time::{Duration, Instant};

use geo::{BooleanOps, Intersects};
use serde::Serialize;

use super::bbox::boxes_overlap;
use super::record::PolyRecord;
use super::registry::Registry;
use crate::error::MergeError;

/// Counters and timers for one reduction pass, threaded through the driver
/// instead of living in ambient state.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ReduceStats {
    pub input_polygons: usize,
    pub output_polygons: usize,
    /// Exact predicate invocations; box-rejected pairs never count.
    pub intersection_tests: usize,
    /// Union calls performed across all cluster folds.
    pub unions: usize,
    /// Cumulative time spent scanning the registry for intersections.
    pub intersect_elapsed: Duration,
    /// Cumulative time spent inside union calls.
    pub union_elapsed: Duration,
}

/// Merge one arriving record into the registry.
///
/// Scans every live member with the bounding-box pre-filter, running the
/// exact intersection predicate only on box hits. If nothing intersects the
/// arrival is inserted unchanged; otherwise the arrival and every
/// intersecting member are folded into a single union which atomically
/// replaces them.
///
/// A failed union aborts the whole cluster step: the registry keeps all of
/// its members untouched and the arrival is inserted as its own entry, so no
/// polygon is ever silently lost.
pub fn absorb(registry: &mut Registry, arriving: PolyRecord, stats: &mut ReduceStats) {
    if registry.is_empty() {
        registry.insert(arriving);
        return;
    }

    let scan_started = Instant::now();
    let mut intersecting: Vec<String> = Vec::new();
    for member in registry.records() {
        if !boxes_overlap(arriving.bbox(), member.bbox()) {
            continue;
        }
        stats.intersection_tests += 1;
        if arriving.geometry().intersects(member.geometry()) {
            intersecting.push(member.id().to_string());
        }
    }
    stats.intersect_elapsed += scan_started.elapsed();

    if intersecting.is_empty() {
        registry.insert(arriving);
        return;
    }

    match fold_cluster(registry, &arriving, &intersecting, stats) {
        Ok(merged) => registry.replace(&intersecting, merged),
        Err(err) => {
            eprintln!("[merge] {err}; keeping {} unmerged", arriving.label());
            registry.insert(arriving);
        }
    }
}

/// Union the arriving record with every queued member, one at a time.
///
/// The per-cluster fold is a loop over a shrinking queue; the accumulator's
/// name, id and merge count are re-derived after every union. The name picks
/// up each member's label joined by `" | "`; the merge count accumulates the
/// members' counts on top of the arrival's own.
fn fold_cluster(
    registry: &Registry,
    arriving: &PolyRecord,
    queue: &[String],
    stats: &mut ReduceStats,
) -> Result<PolyRecord, MergeError> {
    let mut accumulator = arriving.clone();
    for id in queue {
        let member = registry
            .get(id)
            .ok_or_else(|| MergeError::GeometryOperationFailed {
                op: "union",
                detail: format!("registry member {id} vanished mid-fold"),
            })?;

        let union_started = Instant::now();
        let unioned = accumulator.geometry().union(member.geometry());
        stats.union_elapsed += union_started.elapsed();
        stats.unions += 1;

        // Two intersecting polygons always union into one connected piece;
        // a multi-part result means the operation degenerated.
        let mut parts = unioned.0;
        if parts.len() != 1 {
            return Err(MergeError::UnexpectedUnionShape { parts: parts.len() });
        }

        accumulator = PolyRecord::with_count(
            parts.remove(0),
            join_names(accumulator.name(), member.name()),
            accumulator.merge_count() + member.merge_count(),
        )?;
    }
    Ok(accumulator)
}

/// Concatenate provenance labels with `" | "`, skipping absent ones.
fn join_names(a: Option<&Arc<str>>, b: Option<&Arc<str>>) -> Option<Arc<str>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(format!("{a} | {b}").into()),
        (Some(a), None) => Some(a.clone()),
        (None, Some(b)) => Some(b.clone()),
        (None, None) => None,
    }
}

/// Reduce a flat polygon sequence by merging every cluster of transitively
/// overlapping polygons into a single polygon.
///
/// Single pass, in input order; the resulting partition is order-sensitive
/// by design (already-finalized members are only revisited when a new
/// arrival overlaps them). The output is sorted by id so repeated runs
/// produce byte-identical results.
pub fn reduce(records: Vec<PolyRecord>) -> (Vec<PolyRecord>, ReduceStats) {
    let mut stats = ReduceStats {
        input_polygons: records.len(),
        ..Default::default()
    };

    let mut registry = Registry::new();
    for record in records {
        absorb(&mut registry, record, &mut stats);
    }

    let mut reduced = registry.into_records();
    reduced.sort_by(|a, b| a.id().cmp(b.id()));
    stats.output_polygons = reduced.len();
    (reduced, stats)
}
