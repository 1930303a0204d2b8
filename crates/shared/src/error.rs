/// Failure to read the bundled feature collection.
///
/// Individual features with bad dates or coordinates are filtered out while
/// deriving the waypoint sequence and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to parse feature collection: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invalid map configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse map config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid date format pattern: {0:?}")]
    InvalidDateFormat(String),

    #[error("Tile URL template {0:?} must contain {{z}}, {{x}} and {{y}}")]
    InvalidTileUrl(String),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("minZoom {min} must not exceed maxZoom {max}")]
    InvalidZoomRange { min: f64, max: f64 },
}
