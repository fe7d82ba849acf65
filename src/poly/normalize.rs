use std::sync::Arc;

use geo::Polygon;

use super::record::PolyRecord;
use crate::error::MergeError;
use crate::io::{Feature, FeatureGeometry};

/// Flatten a feature collection into a flat ordered sequence of polygon
/// records.
///
/// Polygon features carry their name; sub-parts of a MultiPolygon are
/// anonymous. Features of any other geometry kind are logged and skipped,
/// never aborting the batch. Pure transform otherwise.
pub fn flatten(features: &[Feature]) -> Vec<PolyRecord> {
    let mut records = Vec::with_capacity(features.len());
    for feature in features {
        match &feature.geometry {
            FeatureGeometry::Polygon(polygon) => {
                push_record(&mut records, polygon.clone(), feature.name.clone());
            }
            FeatureGeometry::MultiPolygon(parts) => {
                for polygon in parts.0.iter() {
                    push_record(&mut records, polygon.clone(), None);
                }
            }
            FeatureGeometry::Other(kind) => {
                let err = MergeError::UnsupportedGeometryKind(kind.clone());
                eprintln!("[flatten] skipping feature: {err}");
            }
        }
    }
    records
}

fn push_record(records: &mut Vec<PolyRecord>, polygon: Polygon<f64>, name: Option<Arc<str>>) {
    match PolyRecord::new(polygon, name) {
        Ok(record) => records.push(record),
        Err(err) => eprintln!("[flatten] skipping feature: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, MultiPolygon};

    fn triangle(x: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x, 0.0), (x + 1.0, 0.0), (x + 0.5, 1.0), (x, 0.0)]),
            vec![],
        )
    }

    #[test]
    fn polygon_features_keep_their_name() {
        let features = vec![Feature {
            geometry: FeatureGeometry::Polygon(triangle(0.0)),
            name: Some(Arc::from("Buena Vista")),
        }];

        let records = flatten(&features);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name().map(|n| n.as_ref()), Some("Buena Vista"));
        assert_eq!(records[0].merge_count(), 1);
    }

    #[test]
    fn multipolygon_parts_become_anonymous_records() {
        let features = vec![Feature {
            geometry: FeatureGeometry::MultiPolygon(MultiPolygon(vec![
                triangle(0.0),
                triangle(10.0),
                triangle(20.0),
            ])),
            name: Some(Arc::from("Golden Gate Park")),
        }];

        let records = flatten(&features);
        assert_eq!(records.len(), 3);

        // Distinct ids, no name carry-over to the parts
        for record in &records {
            assert!(record.name().is_none());
        }
        assert_ne!(records[0].id(), records[1].id());
        assert_ne!(records[1].id(), records[2].id());
        assert_ne!(records[0].id(), records[2].id());
    }

    #[test]
    fn unsupported_kinds_are_skipped_without_aborting() {
        let features = vec![
            Feature {
                geometry: FeatureGeometry::Other("Point".to_string()),
                name: None,
            },
            Feature {
                geometry: FeatureGeometry::Polygon(triangle(0.0)),
                name: None,
            },
        ];

        let records = flatten(&features);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn input_order_is_preserved() {
        let features: Vec<Feature> = (0..4)
            .map(|i| Feature {
                geometry: FeatureGeometry::Polygon(triangle(i as f64 * 10.0)),
                name: Some(Arc::from(format!("park {i}").as_str())),
            })
            .collect();

        let records = flatten(&features);
        let names: Vec<_> = records
            .iter()
            .map(|record| record.name().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["park 0", "park 1", "park 2", "park 3"]);
    }
}
