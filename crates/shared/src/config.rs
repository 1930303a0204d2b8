use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::Viewport;
use crate::spring::SpringConfig;

pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_DATE_FORMAT: &str = "%-d %B %Y";

/// Latitude shift applied when centring on a waypoint, so the overlay sits
/// above the marker.
pub const DEFAULT_LATITUDE_OFFSET: f64 = 0.1;

pub const PIN_SIZE: f64 = 20.0;
pub const SELECTED_PIN_SIZE: f64 = 32.0;

/// Everything tunable about the map view. Missing keys fall back to defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub initial_viewport: Viewport,
    pub latitude_offset: f64,
    pub tile_url: String,
    pub attribution: String,
    pub date_format: String,
    pub pin_size: f64,
    pub selected_pin_size: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub spring: SpringConfig,
    pub swipe: SwipeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwipeConfig {
    /// Minimum horizontal travel in CSS pixels.
    pub min_distance: f64,
    /// Longest touch that still counts as a swipe, in milliseconds.
    pub max_duration_ms: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        SwipeConfig {
            min_distance: 50.0,
            max_duration_ms: 800.0,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            initial_viewport: Viewport::default(),
            latitude_offset: DEFAULT_LATITUDE_OFFSET,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            pin_size: PIN_SIZE,
            selected_pin_size: SELECTED_PIN_SIZE,
            min_zoom: 1.0,
            max_zoom: 18.0,
            spring: SpringConfig::default(),
            swipe: SwipeConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the tile server, e.g. from a build-time environment variable.
    pub fn with_tile_url(mut self, tile_url: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(url) = tile_url {
            self.tile_url = url.to_string();
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        if !["{z}", "{x}", "{y}"]
            .iter()
            .all(|placeholder| self.tile_url.contains(placeholder))
        {
            return Err(ConfigError::InvalidTileUrl(self.tile_url.clone()));
        }
        if self.min_zoom.is_nan() || self.max_zoom.is_nan() || self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        positive("pinSize", self.pin_size)?;
        positive("selectedPinSize", self.selected_pin_size)?;
        positive("spring.tension", self.spring.tension)?;
        non_negative("spring.friction", self.spring.friction)?;
        positive("spring.mass", self.spring.mass)?;
        positive("spring.precision", self.spring.precision)?;
        positive("swipe.minDistance", self.swipe.min_distance)?;
        positive("swipe.maxDurationMs", self.swipe.max_duration_ms)?;
        Ok(())
    }

    /// Fill a `{z}/{x}/{y}` tile URL template.
    pub fn tile_src(&self, z: u32, x: u32, y: u32) -> String {
        self.tile_url
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringState;

    #[test]
    fn test_default_is_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = MapConfig::from_json("{}").unwrap();
        assert_eq!(config, MapConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = MapConfig::from_json(
            r#"{ "initialViewport": { "zoom": 3.0 }, "latitudeOffset": 0.25, "swipe": { "minDistance": 80 } }"#,
        )
        .unwrap();
        assert_eq!(config.initial_viewport.zoom, 3.0);
        assert_eq!(config.initial_viewport.latitude, 53.0);
        assert_eq!(config.latitude_offset, 0.25);
        assert_eq!(config.swipe.min_distance, 80.0);
        assert_eq!(config.swipe.max_duration_ms, 800.0);
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let err = MapConfig::from_json(r#"{ "dateFormat": "%Q %Y" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDateFormat(_)));
    }

    #[test]
    fn test_tile_url_needs_placeholders() {
        let err = MapConfig::from_json(r#"{ "tileUrl": "https://tiles.example.com/{z}.png" }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTileUrl(_)));
    }

    #[test]
    fn test_non_positive_pin_size_rejected() {
        let err = MapConfig::from_json(r#"{ "pinSize": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "pinSize",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            MapConfig::from_json("[1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_with_tile_url_override() {
        let config = MapConfig::default()
            .with_tile_url(Some("https://a.example/{z}/{x}/{y}.webp"))
            .unwrap();
        assert_eq!(config.tile_src(4, 7, 5), "https://a.example/4/7/5.webp");

        let unchanged = MapConfig::default().with_tile_url(None).unwrap();
        assert_eq!(unchanged.tile_url, DEFAULT_TILE_URL);

        assert!(MapConfig::default().with_tile_url(Some("nope")).is_err());
    }

    #[test]
    fn test_tile_src_default() {
        assert_eq!(
            MapConfig::default().tile_src(5, 15, 10),
            "https://tile.openstreetmap.org/5/15/10.png"
        );
    }

    #[test]
    fn test_clamp_zoom() {
        let config = MapConfig::default();
        assert_eq!(config.clamp_zoom(0.2), 1.0);
        assert_eq!(config.clamp_zoom(25.0), 18.0);
        assert_eq!(config.clamp_zoom(6.5), 6.5);
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        let err = MapConfig::from_json(r#"{ "minZoom": 10, "maxZoom": 2 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidZoomRange { min, max } if min == 10.0 && max == 2.0
        ));

        let fixed = MapConfig::from_json(r#"{ "minZoom": 4, "maxZoom": 4 }"#).unwrap();
        assert_eq!(fixed.clamp_zoom(9.0), 4.0);
    }

    #[test]
    fn test_spring_tension_must_be_positive() {
        let err = MapConfig::from_json(r#"{ "spring": { "tension": -170 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "spring.tension",
                ..
            }
        ));
    }

    #[test]
    fn test_spring_friction_must_not_be_negative() {
        let err = MapConfig::from_json(r#"{ "spring": { "friction": -40 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Negative {
                field: "spring.friction",
                ..
            }
        ));

        // Undamped is odd but stays bounded.
        let undamped = MapConfig::from_json(r#"{ "spring": { "friction": 0 } }"#).unwrap();
        assert_eq!(undamped.spring.friction, 0.0);
    }

    #[test]
    fn test_spring_precision_must_be_positive() {
        let err = MapConfig::from_json(r#"{ "spring": { "precision": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "spring.precision",
                ..
            }
        ));
    }

    #[test]
    fn test_accepted_spring_settles() {
        let config = MapConfig::from_json(
            r#"{ "spring": { "tension": 300, "friction": 10, "mass": 2, "precision": 0.05 } }"#,
        )
        .unwrap();
        let mut state = SpringState::at(20.0);
        for _ in 0..600 {
            state = config.spring.step(state, 32.0, 1.0 / 60.0);
        }
        assert_eq!(state, SpringState::at(32.0));
    }
}
