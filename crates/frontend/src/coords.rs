use dioxus::html::geometry::WheelDelta;
use waypoint_shared::config::MapConfig;
use waypoint_shared::mercator;
use waypoint_shared::models::Viewport;

pub const MAP_CONTAINER_ID: &str = "waypoint-map-container";

/// Wheel travel (in pixels) that zooms by one level.
const WHEEL_PX_PER_ZOOM: f64 = 500.0;

/// Convert client (viewport) coordinates to container-relative pixel coordinates.
pub fn client_to_container(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

/// Container-relative coordinates using the live map container rect.
pub fn client_to_map_container(client_x: f64, client_y: f64) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    let rect = element.get_bounding_client_rect();
    Some(client_to_container(client_x, client_y, rect.left(), rect.top()))
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
pub fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Rotate a screen-space delta into the map's own (north-up) frame.
///
/// The map is drawn rotated by `-bearing`, so a screen delta maps back by
/// rotating it by `+bearing`.
pub fn unrotate(dx: f64, dy: f64, bearing_deg: f64) -> (f64, f64) {
    let (sin, cos) = bearing_deg.to_radians().sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Screen position of an unrotated map point once the map is drawn rotated
/// about the viewport centre. Pitch is not applied.
pub fn rotated_screen_point(viewport: &Viewport, point: (f64, f64)) -> (f64, f64) {
    let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
    let (dx, dy) = unrotate(point.0 - cx, point.1 - cy, -viewport.bearing);
    (cx + dx, cy + dy)
}

/// Viewport after dragging `(dx, dy)` screen pixels from `start`.
pub fn drag_viewport(start: &Viewport, dx: f64, dy: f64) -> Viewport {
    let (mx, my) = unrotate(dx, dy, start.bearing);
    mercator::pan_by(start, mx, my)
}

/// Viewport after a wheel step. Zooms about the cursor when the map is
/// flat and north-up, about the centre otherwise.
pub fn wheel_viewport(
    viewport: &Viewport,
    delta_y: f64,
    cursor: Option<(f64, f64)>,
    config: &MapConfig,
) -> Viewport {
    let step = (-delta_y / WHEEL_PX_PER_ZOOM).clamp(-1.0, 1.0);
    let new_zoom = config.clamp_zoom(viewport.zoom + step);
    let centre = (viewport.width / 2.0, viewport.height / 2.0);
    let anchor = match cursor {
        Some(c) if viewport.bearing == 0.0 && viewport.pitch == 0.0 => c,
        _ => centre,
    };
    mercator::zoom_around(viewport, new_zoom, anchor)
}

/// Viewport during a two-finger pinch that started at `start`.
pub fn pinch_viewport(
    start: &Viewport,
    start_distance: f64,
    distance: f64,
    config: &MapConfig,
) -> Option<Viewport> {
    if start_distance < 1.0 || distance <= 0.0 {
        return None;
    }
    let new_zoom = config.clamp_zoom(start.zoom + (distance / start_distance).log2());
    Some(Viewport {
        zoom: new_zoom,
        ..*start
    })
}

/// Distance between two client-coordinate points.
pub fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            latitude: 53.0,
            longitude: -2.0,
            zoom: 6.0,
            width: 800.0,
            height: 600.0,
            ..Viewport::default()
        }
    }

    #[test]
    fn test_client_to_container_origin() {
        let (x, y) = client_to_container(100.0, 200.0, 100.0, 200.0);
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_container_offset() {
        let (x, y) = client_to_container(450.0, 350.0, 320.0, 50.0);
        assert!((x - 130.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrotate_identity_at_north_up() {
        let (x, y) = unrotate(10.0, -4.0, 0.0);
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unrotate_quarter_turn() {
        // East-up map: dragging right moves along the map's south axis.
        let (x, y) = unrotate(1.0, 0.0, 90.0);
        assert!(x.abs() < 1e-9);
        assert!((y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotated_screen_point() {
        let mut v = viewport();
        assert_eq!(rotated_screen_point(&v, (500.0, 300.0)), (500.0, 300.0));
        v.bearing = 90.0;
        // East-up: a point east of centre is drawn above it.
        let (x, y) = rotated_screen_point(&v, (500.0, 300.0));
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_viewport_keeps_zoom_and_size() {
        let start = viewport();
        let dragged = drag_viewport(&start, -50.0, 25.0);
        assert!(dragged.longitude > start.longitude);
        assert!(dragged.latitude > start.latitude);
        assert_eq!(dragged.zoom, start.zoom);
        assert_eq!((dragged.width, dragged.height), (800.0, 600.0));
    }

    #[test]
    fn test_wheel_up_zooms_in() {
        let config = MapConfig::default();
        let v = wheel_viewport(&viewport(), -100.0, None, &config);
        assert!((v.zoom - 6.2).abs() < 1e-9);
        assert!((v.latitude - 53.0).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_step_is_bounded_and_clamped() {
        let config = MapConfig::default();
        let v = wheel_viewport(&viewport(), 10_000.0, None, &config);
        assert!((v.zoom - 5.0).abs() < 1e-9);

        let mut low = viewport();
        low.zoom = 1.2;
        let v = wheel_viewport(&low, 400.0, None, &config);
        assert_eq!(v.zoom, config.min_zoom);
    }

    #[test]
    fn test_wheel_ignores_cursor_when_rotated() {
        let config = MapConfig::default();
        let mut rotated = viewport();
        rotated.bearing = 45.0;
        let v = wheel_viewport(&rotated, -250.0, Some((0.0, 0.0)), &config);
        assert!((v.latitude - 53.0).abs() < 1e-9);
        assert!((v.longitude + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_about_cursor_moves_centre() {
        let config = MapConfig::default();
        let v = wheel_viewport(&viewport(), -250.0, Some((700.0, 300.0)), &config);
        // Zooming in towards a point east of centre pulls the centre east.
        assert!(v.longitude > -2.0);
    }

    #[test]
    fn test_pinch_doubling_distance_adds_one_level() {
        let config = MapConfig::default();
        let v = pinch_viewport(&viewport(), 100.0, 200.0, &config).unwrap();
        assert!((v.zoom - 7.0).abs() < 1e-9);
        let v = pinch_viewport(&viewport(), 100.0, 50.0, &config).unwrap();
        assert!((v.zoom - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_pinch_degenerate_start() {
        let config = MapConfig::default();
        assert!(pinch_viewport(&viewport(), 0.5, 100.0, &config).is_none());
    }

    #[test]
    fn test_point_distance() {
        assert!((point_distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-9);
    }
}
