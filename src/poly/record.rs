use std::sync::Arc;

use geo::{Coord, LineString, Polygon, Rect};
use sha2::{Digest, Sha256};

use super::bbox::exterior_bbox;
use crate::error::MergeError;

/// A single polygon tracked through the merge pipeline.
///
/// The registry key is `id`, a content hash of the ring structure; it is
/// recomputed whenever the geometry changes, so byte-identical ring
/// structures always collide (intentional de-duplication, not a defect).
#[derive(Debug, Clone)]
pub struct PolyRecord {
    geometry: Polygon<f64>,
    bbox: Rect<f64>, // cached over the exterior ring only
    id: String,
    name: Option<Arc<str>>,
    merge_count: u32,
}

impl PolyRecord {
    /// Construct an unmerged record (`merge_count` of 1).
    pub fn new(geometry: Polygon<f64>, name: Option<Arc<str>>) -> Result<Self, MergeError> {
        Self::with_count(geometry, name, 1)
    }

    /// Construct a record with an explicit source-polygon count.
    pub(crate) fn with_count(
        geometry: Polygon<f64>,
        name: Option<Arc<str>>,
        merge_count: u32,
    ) -> Result<Self, MergeError> {
        let bbox = exterior_bbox(&geometry)
            .ok_or_else(|| MergeError::InvalidGeometry("empty exterior ring".into()))?;
        Ok(Self {
            id: content_id(&geometry),
            geometry,
            bbox,
            name,
            merge_count,
        })
    }

    /// Get the content id (registry key).
    #[inline] pub fn id(&self) -> &str { &self.id }

    /// Get the provenance label, if any.
    #[inline] pub fn name(&self) -> Option<&Arc<str>> { self.name.as_ref() }

    /// Get the number of source polygons folded into this record.
    #[inline] pub fn merge_count(&self) -> u32 { self.merge_count }

    /// Get a reference to the ring structure.
    #[inline] pub fn geometry(&self) -> &Polygon<f64> { &self.geometry }

    /// Get the cached exterior-ring bounding box.
    #[inline] pub(crate) fn bbox(&self) -> &Rect<f64> { &self.bbox }

    /// Label for log messages: the name if present, else a truncated id.
    pub(crate) fn label(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => self.id[..12].to_string(),
        }
    }
}

/// Deterministic content hash of a ring structure: SHA-256 over every ring's
/// coordinate bytes, with a separator byte so ring boundaries change the id.
fn content_id(geometry: &Polygon<f64>) -> String {
    let mut hasher = Sha256::new();
    for ring in std::iter::once(geometry.exterior()).chain(geometry.interiors().iter()) {
        for coord in ring.coords() {
            hasher.update(coord.x.to_le_bytes());
            hasher.update(coord.y.to_le_bytes());
        }
        hasher.update([0xff]);
    }
    hex::encode(hasher.finalize())
}

/// Fix winding (CCW exterior, CW holes), drop consecutive duplicate
/// vertices, and close every ring.
pub(crate) fn normalize_rings(polygon: Polygon<f64>) -> Polygon<f64> {
    /// Get the signed area of a coordinate list (positive for CCW)
    fn signed_area(pts: &[Coord<f64>]) -> f64 {
        let mut a = 0.0;
        for w in pts.windows(2) {
            a += w[0].x * w[1].y - w[1].x * w[0].y;
        }
        a / 2.0
    }

    fn clean(ring: &LineString<f64>, want_ccw: bool) -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
        for &coord in &ring.0 {
            if coords.last() != Some(&coord) {
                coords.push(coord);
            }
        }
        if !coords.is_empty() && coords[0] != coords[coords.len() - 1] {
            coords.push(coords[0]);
        }
        if (signed_area(&coords) > 0.0) != want_ccw {
            coords.reverse();
        }
        LineString(coords)
    }

    let exterior = clean(polygon.exterior(), true);
    let interiors = polygon
        .interiors()
        .iter()
        .map(|ring| clean(ring, false))
        .collect();
    Polygon::new(exterior, interiors)
}
