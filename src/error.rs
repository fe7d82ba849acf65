//! Error types for the merge pipeline.

use thiserror::Error;

/// Errors raised while normalizing, buffering, or merging polygons.
///
/// Every variant is recoverable per item: callers log the error, exclude the
/// offending feature or pair, and keep going. A single malformed polygon
/// never aborts a reduction pass.
#[derive(Error, Debug)]
pub enum MergeError {
    /// Feature geometry was something other than Polygon or MultiPolygon.
    #[error("unsupported geometry kind: {0}")]
    UnsupportedGeometryKind(String),

    /// A planar geometry call failed for one polygon or pair.
    #[error("{op} failed: {detail}")]
    GeometryOperationFailed { op: &'static str, detail: String },

    /// A union produced something other than a single polygon.
    #[error("union produced {parts} parts, expected a single polygon")]
    UnexpectedUnionShape { parts: usize },

    /// Degenerate ring structure (e.g. an empty exterior ring).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
