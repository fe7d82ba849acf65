//! End-to-end pipeline tests: GeoJSON bytes in, reduced GeoJSON bytes out.

use polymerge::{FeatureGeometry, buffer, flatten, read_from_geojson_bytes, reduce, write_to_geojson_bytes};
use serde_json::{Value, json};

fn square_coords(x: f64, y: f64, side: f64) -> Value {
    json!([[
        [x, y],
        [x + side, y],
        [x + side, y + side],
        [x, y + side],
        [x, y]
    ]])
}

fn feature(name: &str, coords: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Polygon", "coordinates": coords },
        "properties": { "map_park_n": name }
    })
}

#[test]
fn overlapping_parks_collapse_to_one_feature() {
    let collection = json!({
        "type": "FeatureCollection",
        "features": [
            feature("Panhandle", square_coords(0.0, 0.0, 1.0)),
            feature("Midblock", square_coords(0.5, 0.0, 1.0)),
            feature("Eastside", square_coords(0.9, 0.0, 1.0)),
        ]
    });

    let features = read_from_geojson_bytes(collection.to_string().as_bytes(), "map_park_n").unwrap();
    let records = flatten(&features);
    assert_eq!(records.len(), 3);

    // Zero radius short-circuits the buffer stage
    let buffered = buffer(records, 0.0);
    assert_eq!(buffered.len(), 3);

    let (reduced, stats) = reduce(buffered);
    assert_eq!(reduced.len(), 1);
    assert_eq!(reduced[0].merge_count(), 3);
    assert_eq!(stats.input_polygons, 3);
    assert_eq!(stats.output_polygons, 1);

    let bytes = write_to_geojson_bytes(&reduced).unwrap();
    let out: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(out["type"], "FeatureCollection");

    let out_features = out["features"].as_array().unwrap();
    assert_eq!(out_features.len(), 1);
    let properties = &out_features[0]["properties"];
    assert_eq!(properties["mergeCount"], 3);
    assert_eq!(properties["id"], reduced[0].id());
    assert_eq!(
        properties["name"].as_str().unwrap(),
        "Eastside | Midblock | Panhandle"
    );
}

#[test]
fn mixed_collection_flattens_skips_and_reduces() {
    let collection = json!({
        "type": "FeatureCollection",
        "features": [
            feature("Presidio", square_coords(0.0, 0.0, 1.0)),
            {
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        square_coords(20.0, 0.0, 1.0),
                        square_coords(40.0, 0.0, 1.0),
                    ]
                },
                "properties": { "map_park_n": "Twin Lakes" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                "properties": { "map_park_n": "Drinking Fountain" }
            }
        ]
    });

    let features = read_from_geojson_bytes(collection.to_string().as_bytes(), "map_park_n").unwrap();
    assert_eq!(features.len(), 3);
    assert!(matches!(features[2].geometry, FeatureGeometry::Other(_)));

    // Point is skipped; the two MultiPolygon parts are anonymous
    let records = flatten(&features);
    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().filter(|r| r.name().is_none()).count(), 2);

    // Everything is disjoint: the reduction is the identity modulo order
    let (reduced, stats) = reduce(records);
    assert_eq!(reduced.len(), 3);
    assert_eq!(stats.intersection_tests, 0);

    let total: u32 = reduced.iter().map(|r| r.merge_count()).sum();
    assert_eq!(total, 3);
}

#[test]
fn buffering_connects_nearby_parks() {
    // Two squares separated by a 0.1 gap; a 0.1 buffer closes it
    let collection = json!({
        "type": "FeatureCollection",
        "features": [
            feature("West", square_coords(0.0, 0.0, 1.0)),
            feature("East", square_coords(1.1, 0.0, 1.0)),
        ]
    });

    let features = read_from_geojson_bytes(collection.to_string().as_bytes(), "map_park_n").unwrap();
    let records = flatten(&features);

    let (untouched, _) = reduce(buffer(records.clone(), 0.0));
    assert_eq!(untouched.len(), 2);

    let (merged, _) = reduce(buffer(records, 0.1));
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].merge_count(), 2);
}
