//! Minimal GeoJSON types for country boundaries.
//!
//! Only the envelope is typed. Coordinates stay raw JSON since they nest
//! differently per geometry type (Point, Polygon, MultiPolygon, ...).

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// Lat/lng bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl Bounds {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    fn extend(&mut self, lat: f64, lng: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lng = self.min_lng.min(lng);
        self.max_lng = self.max_lng.max(lng);
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }

    /// A single point feature standing in for missing border data.
    pub fn approximate_point(name: &str, lat: f64, lng: f64) -> Self {
        let mut properties = Map::new();
        properties.insert("name".to_string(), Value::String(name.to_string()));
        Self::new(vec![Feature {
            kind: "Feature".to_string(),
            id: None,
            properties,
            geometry: Some(Geometry {
                kind: "Point".to_string(),
                // GeoJSON order is [lng, lat]
                coordinates: json!([lng, lat]),
            }),
        }])
    }

    /// Bounding box over every position in every feature, None if there are
    /// no positions at all.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for geometry in self.features.iter().filter_map(|f| f.geometry.as_ref()) {
            visit_positions(&geometry.coordinates, &mut |lng, lat| match bounds.as_mut() {
                Some(b) => b.extend(lat, lng),
                None => {
                    bounds = Some(Bounds {
                        min_lat: lat,
                        min_lng: lng,
                        max_lat: lat,
                        max_lng: lng,
                    })
                }
            });
        }
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Feature {
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().and_then(Value::as_str)
    }
}

/// Walk nested coordinate arrays, calling `f(lng, lat)` for every position.
fn visit_positions(value: &Value, f: &mut dyn FnMut(f64, f64)) {
    let Value::Array(items) = value else {
        return;
    };
    match items.as_slice() {
        [Value::Number(lng), Value::Number(lat), ..] => {
            if let (Some(lng), Some(lat)) = (lng.as_f64(), lat.as_f64()) {
                f(lng, lat);
            }
        }
        _ => {
            for item in items {
                visit_positions(item, f);
            }
        }
    }
}
