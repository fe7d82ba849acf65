use std::sync::Arc;

use anyhow::{Context, Result, bail};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Value, json};

use super::{Feature, FeatureGeometry};
use crate::poly::PolyRecord;

/// Read a GeoJSON FeatureCollection from bytes.
///
/// `name_key` selects the property carrying each feature's name. Geometry
/// kinds other than Polygon/MultiPolygon are carried as `Other` so the
/// normalizer can report and skip them. Features with malformed coordinates
/// are logged and skipped; only a top-level value that is not a
/// FeatureCollection is a hard error.
pub fn read_from_geojson_bytes(bytes: &[u8], name_key: &str) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;

    if value["type"].as_str() != Some("FeatureCollection") {
        bail!(
            "Expected a FeatureCollection, got {}",
            value["type"].as_str().unwrap_or("no type at all")
        );
    }
    let Some(features) = value["features"].as_array() else {
        bail!("FeatureCollection has no features array");
    };

    let mut parsed = Vec::with_capacity(features.len());
    for feature in features {
        let name: Option<Arc<str>> = feature["properties"][name_key].as_str().map(Arc::from);
        let geometry = &feature["geometry"];
        let geometry = match geometry["type"].as_str() {
            Some("Polygon") => match parse_polygon_coords(&geometry["coordinates"]) {
                Ok(polygon) => FeatureGeometry::Polygon(polygon),
                Err(err) => {
                    eprintln!("[geojson] skipping malformed Polygon feature: {err}");
                    continue;
                }
            },
            Some("MultiPolygon") => match parse_multipolygon_coords(&geometry["coordinates"]) {
                Ok(parts) => FeatureGeometry::MultiPolygon(parts),
                Err(err) => {
                    eprintln!("[geojson] skipping malformed MultiPolygon feature: {err}");
                    continue;
                }
            },
            Some(other) => FeatureGeometry::Other(other.to_string()),
            None => FeatureGeometry::Other("<missing geometry>".to_string()),
        };
        parsed.push(Feature { geometry, name });
    }
    Ok(parsed)
}

/// Parse GeoJSON Polygon coordinates: `[exterior, hole, hole, ...]`.
fn parse_polygon_coords(coords: &Value) -> Result<Polygon<f64>> {
    let rings = coords
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("Polygon coordinates are not an array"))?;
    if rings.is_empty() {
        bail!("Polygon has no rings");
    }
    let exterior = parse_ring_coords(&rings[0])?;
    let interiors = rings[1..]
        .iter()
        .map(parse_ring_coords)
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse GeoJSON MultiPolygon coordinates: one Polygon entry per part.
fn parse_multipolygon_coords(coords: &Value) -> Result<MultiPolygon<f64>> {
    let parts = coords
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("MultiPolygon coordinates are not an array"))?;
    let polygons = parts
        .iter()
        .map(parse_polygon_coords)
        .collect::<Result<Vec<_>>>()?;
    Ok(MultiPolygon(polygons))
}

/// Parse one ring: `[[x, y], [x, y], ...]`, closed if it isn't already.
fn parse_ring_coords(ring: &Value) -> Result<LineString<f64>> {
    let pairs = ring
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("ring is not an array"))?;

    let mut points = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let pair = pair
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("coordinate is not an array"))?;
        if pair.len() < 2 {
            bail!("coordinate has fewer than two components");
        }
        let x = pair[0]
            .as_f64()
            .ok_or_else(|| anyhow::anyhow!("coordinate x is not a number"))?;
        let y = pair[1]
            .as_f64()
            .ok_or_else(|| anyhow::anyhow!("coordinate y is not a number"))?;
        points.push(Coord { x, y });
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

/// Write reduced records as a GeoJSON FeatureCollection.
///
/// Polygon features only, each carrying `id`, `name` and `mergeCount`
/// properties for the downstream renderer.
pub fn write_to_geojson_bytes(records: &[PolyRecord]) -> Result<Vec<u8>> {
    let features: Vec<Value> = records
        .iter()
        .map(|record| {
            let mut rings: Vec<Vec<Vec<f64>>> =
                Vec::with_capacity(1 + record.geometry().interiors().len());
            rings.push(ring_coords(record.geometry().exterior()));
            for hole in record.geometry().interiors() {
                rings.push(ring_coords(hole));
            }

            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": rings,
                },
                "properties": {
                    "id": record.id(),
                    "name": record.name().map(|name| name.as_ref()),
                    "mergeCount": record.merge_count(),
                },
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    serde_json::to_vec(&collection).context("Failed to serialize GeoJSON to bytes")
}

fn ring_coords(ring: &LineString<f64>) -> Vec<Vec<f64>> {
    ring.coords().map(|coord| vec![coord.x, coord.y]).collect()
}
