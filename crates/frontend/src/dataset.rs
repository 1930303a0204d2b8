use waypoint_shared::config::MapConfig;
use waypoint_shared::store::WaypointStore;

const LOCATIONS_JSON: &str = include_str!("../assets/locations.json");
const MAP_CONFIG_JSON: &str = include_str!("../assets/map_config.json");

/// Tile server override baked in at build time.
const TILE_URL_OVERRIDE: Option<&str> = option_env!("WAYPOINT_TILE_URL");

/// The bundled waypoints. An unreadable bundle yields an empty map rather
/// than a broken page.
pub fn load_store() -> WaypointStore {
    match WaypointStore::from_json(LOCATIONS_JSON) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(%err, "Bundled waypoint dataset is unreadable");
            WaypointStore::default()
        }
    }
}

pub fn load_config() -> MapConfig {
    let config = MapConfig::from_json(MAP_CONFIG_JSON)
        .and_then(|config| config.with_tile_url(TILE_URL_OVERRIDE));
    match config {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "Invalid map config, falling back to defaults");
            MapConfig::default()
        }
    }
}
