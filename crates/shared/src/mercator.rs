//! Web Mercator projection helpers.
//!
//! World pixel space at zoom `z` is `TILE_SIZE * 2^z` pixels square, origin at
//! the top-left (180°W, ~85°N). Screen space is relative to the viewport's
//! top-left corner with the viewport centre at `(width/2, height/2)`.

use crate::models::Viewport;

pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    /// Screen position of the tile's top-left corner, before fractional zoom
    /// scaling around the viewport centre.
    pub left: f64,
    pub top: f64,
}

/// Size of the world in pixels at `zoom`.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2_f64.powf(zoom)
}

/// Project latitude/longitude to world pixels at `zoom`.
pub fn project(latitude: f64, longitude: f64, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (longitude + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse of `project`.
pub fn unproject(x: f64, y: f64, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);
    let longitude = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
    let latitude = n.sinh().atan().to_degrees();
    (latitude, longitude)
}

/// Screen position of a point for the given viewport (bearing and pitch are
/// applied afterwards as a CSS transform around the centre).
pub fn screen_position(viewport: &Viewport, latitude: f64, longitude: f64) -> (f64, f64) {
    let (cx, cy) = project(viewport.latitude, viewport.longitude, viewport.zoom);
    let (px, py) = project(latitude, longitude, viewport.zoom);
    (
        px - cx + viewport.width / 2.0,
        py - cy + viewport.height / 2.0,
    )
}

/// Viewport moved so content follows a drag of `(dx, dy)` screen pixels.
pub fn pan_by(viewport: &Viewport, dx: f64, dy: f64) -> Viewport {
    let (cx, cy) = project(viewport.latitude, viewport.longitude, viewport.zoom);
    let (latitude, longitude) = unproject(cx - dx, cy - dy, viewport.zoom);
    Viewport {
        latitude,
        longitude,
        ..*viewport
    }
}

/// Viewport zoomed to `new_zoom` keeping the content under `cursor` fixed.
pub fn zoom_around(viewport: &Viewport, new_zoom: f64, cursor: (f64, f64)) -> Viewport {
    let (cx, cy) = project(viewport.latitude, viewport.longitude, viewport.zoom);
    let offset_x = cursor.0 - viewport.width / 2.0;
    let offset_y = cursor.1 - viewport.height / 2.0;
    let (anchor_lat, anchor_lon) = unproject(cx + offset_x, cy + offset_y, viewport.zoom);

    let (ax, ay) = project(anchor_lat, anchor_lon, new_zoom);
    let (latitude, longitude) = unproject(ax - offset_x, ay - offset_y, new_zoom);
    Viewport {
        latitude,
        longitude,
        zoom: new_zoom,
        ..*viewport
    }
}

/// Tiles at `floor(zoom)` covering the viewport.
///
/// Positions are in the integer-zoom pixel grid; the caller scales the whole
/// layer by `2^(zoom - floor(zoom))` around the viewport centre.
pub fn visible_tiles(viewport: &Viewport) -> Vec<TileCoord> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec::new();
    }
    let z = viewport.zoom.floor().max(0.0);
    let scale = 2_f64.powf(viewport.zoom - z);
    let tiles_per_side = 2_f64.powf(z);
    let (cx, cy) = project(viewport.latitude, viewport.longitude, z);

    // Half extents in integer-zoom pixels; a tilted or rotated map shows more
    // than the raw rectangle, so cover the diagonal.
    let half_diagonal = (viewport.width.hypot(viewport.height) / 2.0) / scale;
    let min_x = ((cx - half_diagonal) / TILE_SIZE).floor() as i64;
    let max_x = ((cx + half_diagonal) / TILE_SIZE).floor() as i64;
    let min_y = (((cy - half_diagonal) / TILE_SIZE).floor() as i64).max(0);
    let max_y = (((cy + half_diagonal) / TILE_SIZE).floor() as i64).min(tiles_per_side as i64 - 1);

    let mut tiles = Vec::new();
    for ty in min_y..=max_y {
        for tx in min_x..=max_x {
            let wrapped_x = tx.rem_euclid(tiles_per_side as i64);
            tiles.push(TileCoord {
                x: wrapped_x as u32,
                y: ty as u32,
                z: z as u32,
                left: tx as f64 * TILE_SIZE - cx + viewport.width / 2.0,
                top: ty as f64 * TILE_SIZE - cy + viewport.height / 2.0,
            });
        }
    }
    tiles
}
