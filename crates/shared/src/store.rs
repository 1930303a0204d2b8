use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::DatasetError;
use crate::models::{Feature, FeatureCollection, Waypoint};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"];

/// Parse a raw dataset date into a calendar date.
///
/// Accepts ISO dates, RFC 3339 and naive ISO date-times (time discarded),
/// slash-separated dates, and English long forms such as "June 1, 2019" or
/// "1 June 2019". Returns `None` for anything else.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        })
}

/// Chronologically ordered, immutable waypoint sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
}

impl WaypointStore {
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let collection: FeatureCollection = serde_json::from_str(json)?;
        Ok(Self::from_collection(collection))
    }

    /// Drop features without a usable date or point, then sort ascending by
    /// date. Equal dates keep their order in the source collection.
    pub fn from_collection(collection: FeatureCollection) -> Self {
        let total = collection.features.len();
        let mut waypoints: Vec<Waypoint> = collection
            .features
            .into_iter()
            .enumerate()
            .filter_map(|(index, feature)| waypoint_from_feature(index, feature))
            .collect();
        waypoints.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.source_index.cmp(&b.source_index))
        });

        tracing::info!(
            kept = waypoints.len(),
            dropped = total - waypoints.len(),
            "Derived waypoint sequence"
        );

        WaypointStore { waypoints }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn first(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.waypoints
    }
}

impl<'a> IntoIterator for &'a WaypointStore {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

fn waypoint_from_feature(index: usize, feature: Feature) -> Option<Waypoint> {
    let Feature {
        geometry,
        properties,
    } = feature;

    let (longitude, latitude) = match geometry.coordinates.as_slice() {
        [lon, lat, ..] => (*lon, *lat),
        _ => {
            tracing::debug!(index, "Dropping feature without point coordinates");
            return None;
        }
    };

    let raw_date = properties.date.as_deref().unwrap_or_default();
    let Some(date) = parse_date(raw_date) else {
        tracing::debug!(index, raw = raw_date, "Dropping feature with unparseable date");
        return None;
    };

    Some(Waypoint {
        longitude,
        latitude,
        place_name: properties.place_name,
        date,
        banner_image: properties.banner_image,
        source_index: index,
    })
}
