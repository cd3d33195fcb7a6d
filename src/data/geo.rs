//! GeoJSON boundary geometry, keyed by feature id (ISO3 for countries, FIPS for counties).

use serde::Deserialize;

use super::FetchError;

type Ring = Vec<Vec<f64>>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Only areal geometry can be shaded; everything else decodes as `Unsupported`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Unsupported,
}

impl FeatureCollection {
    /// Decode an already-fetched JSON value.
    pub fn from_value(source: &str, value: serde_json::Value) -> Result<Self, FetchError> {
        serde_json::from_value(value).map_err(|e| FetchError::Format {
            url: source.to_string(),
            message: e.to_string(),
        })
    }

    pub fn find(&self, key: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.key().as_deref() == Some(key))
    }
}

impl Feature {
    /// Feature id as a string; numeric ids are rendered without quotes.
    pub fn key(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Outer rings as (lon, lat) paths. Holes are ignored.
    pub fn outlines(&self) -> Vec<Vec<(f64, f64)>> {
        let rings: Vec<&Ring> = match &self.geometry {
            Some(Geometry::Polygon { coordinates }) => coordinates.first().into_iter().collect(),
            Some(Geometry::MultiPolygon { coordinates }) => {
                coordinates.iter().filter_map(|poly| poly.first()).collect()
            }
            _ => Vec::new(),
        };

        rings
            .into_iter()
            .map(|ring| {
                ring.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| (p[0], p[1]))
                    .collect::<Vec<_>>()
            })
            .filter(|ring| ring.len() >= 3)
            .collect()
    }
}
