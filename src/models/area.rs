//! Area tree returned by the dataset source and rendered by the API.

use geo::Point;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A node in the region hierarchy (world → country → state → county).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Region name, e.g. "United States" or "California"
    pub name: String,

    /// Latitude of the region's reference point (absent on aggregates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude of the region's reference point (absent on aggregates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Child regions, in source order unless distance-sorted
    #[serde(default, deserialize_with = "null_as_empty")]
    pub areas: Vec<Area>,

    /// Statistical payload (case counts, rates, ...). Passed through untouched.
    #[serde(flatten)]
    pub stats: Map<String, Value>,
}

/// Leaves may carry `"areas": null`; treat that like a missing list
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Area>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Area>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Area {
    /// Create an area with no coordinate, children or stats
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: None,
            longitude: None,
            areas: Vec::new(),
            stats: Map::new(),
        }
    }

    /// Set the reference coordinate
    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.latitude = Some(lat);
        self.longitude = Some(lon);
        self
    }

    /// Append a child region
    pub fn with_child(mut self, child: Area) -> Self {
        self.areas.push(child);
        self
    }

    /// Set a statistical field
    pub fn with_stat(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.stats.insert(key.to_string(), value.into());
        self
    }

    /// Reference point as a geo point (x = lon, y = lat), if both halves are present
    pub fn location(&self) -> Option<Point<f64>> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }

    /// Names of the immediate children, in order
    pub fn child_names(&self) -> Vec<&str> {
        self.areas.iter().map(|a| a.name.as_str()).collect()
    }
}
