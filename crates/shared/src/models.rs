use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw feature collection as bundled with the app.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
}

/// Point geometry, `[longitude, latitude]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    pub date: Option<String>,
    pub place_name: Option<String>,
    pub banner_image: Option<String>,
}

/// A dated, named, located point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub longitude: f64,
    pub latitude: f64,
    pub place_name: Option<String>,
    pub date: NaiveDate,
    pub banner_image: Option<String>,
    /// Position of the feature in the source collection.
    pub source_index: usize,
}

impl Waypoint {
    /// `(longitude, latitude)`, in the same order as the source geometry.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.longitude, self.latitude)
    }

    /// CSS-safe token derived from the place name.
    pub fn slug(&self) -> Option<String> {
        self.place_name
            .as_deref()
            .map(slugify)
            .filter(|s| !s.is_empty())
    }

    /// Format the date with a strftime pattern. The pattern must already have
    /// been validated (see `MapConfig::from_json`).
    pub fn formatted_date(&self, pattern: &str) -> String {
        self.date.format(pattern).to_string()
    }
}

/// Camera parameters describing what part of the map is visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            latitude: 53.0,
            longitude: -2.0,
            zoom: 5.5,
            bearing: 0.0,
            pitch: 0.0,
            width: 500.0,
            height: 500.0,
        }
    }
}

/// Turn free text into a lowercase, hyphen-separated token.
///
/// Whitespace runs become a single hyphen, anything that is not an ASCII word
/// character or hyphen is dropped, and leading/trailing hyphens are trimmed.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
