mod geojson;

pub use geojson::{read_from_geojson_bytes, write_to_geojson_bytes};

use std::sync::Arc;

use geo::{MultiPolygon, Polygon};

/// One feature of the external collection, reduced to the fields the
/// pipeline cares about: a geometry and a provenance name.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: FeatureGeometry,
    pub name: Option<Arc<str>>,
}

/// Feature geometry as the boundary sees it.
///
/// Kinds the pipeline cannot merge are carried by their GeoJSON type tag so
/// the normalizer can report them instead of the parser aborting the batch.
#[derive(Debug, Clone)]
pub enum FeatureGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
    Other(String),
}
