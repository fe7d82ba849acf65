use geo::{BoundingRect, Polygon, Rect};

/// Axis-aligned bounding box of a polygon's exterior ring.
///
/// Holes are ignored: they lie inside the exterior, so the box stays a true
/// over-approximation, and it is only ever used as a pre-filter. `None` means
/// the exterior ring is empty.
pub(crate) fn exterior_bbox(polygon: &Polygon<f64>) -> Option<Rect<f64>> {
    polygon.exterior().bounding_rect()
}

/// Separating-axis overlap test between two boxes.
///
/// A `false` result guarantees the polygons cannot intersect; `true` only
/// means the exact predicate has to run.
pub(crate) fn boxes_overlap(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    if a.max().x < b.min().x { return false; } // a is left of b
    if a.min().x > b.max().x { return false; } // a is right of b
    if a.max().y < b.min().y { return false; } // a is below b
    if a.min().y > b.max().y { return false; } // a is above b
    true
}
