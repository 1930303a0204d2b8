use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use waypoint_shared::config::MapConfig;
use waypoint_shared::gesture::SwipeTracker;
use waypoint_shared::mercator::{self, TILE_SIZE};
use waypoint_shared::models::Viewport;
use waypoint_shared::spring::{self, CameraSpring, SpringConfig, SpringState};
use waypoint_shared::state::{MapEvent, MapState};
use waypoint_shared::store::WaypointStore;

use crate::components::pin;
use crate::coords::{self, MAP_CONTAINER_ID};

/// Drag threshold in pixels — movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold — larger than mouse because touch is less precise.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

/// How close (in pixels) a tap must land to a pin to select it.
const TAP_THRESHOLD: f64 = 24.0;

const FRAME_MS: u32 = 16;

/// Rest threshold for the camera springs, in degrees.
const CAMERA_PRECISION: f64 = 1e-5;

const PERSPECTIVE_PX: f64 = 1000.0;

struct TileView {
    key: String,
    src: String,
    style: String,
}

struct MarkerView {
    index: usize,
    class: &'static str,
    style: String,
    svg: String,
    title: String,
}

/// CSS transform tilting and rotating the whole map around its centre.
fn canvas_transform(viewport: &Viewport) -> String {
    format!(
        "transform: perspective({PERSPECTIVE_PX}px) rotateX({}deg) rotate({}deg);",
        viewport.pitch, -viewport.bearing
    )
}

/// Scale applied to the integer-zoom tile grid to reach the fractional zoom.
fn tile_layer_style(viewport: &Viewport) -> String {
    let scale = 2_f64.powf(viewport.zoom - viewport.zoom.floor().max(0.0));
    format!(
        "transform: scale({scale}); transform-origin: {}px {}px;",
        viewport.width / 2.0,
        viewport.height / 2.0
    )
}

fn tile_views(viewport: &Viewport, config: &MapConfig) -> Vec<TileView> {
    mercator::visible_tiles(viewport)
        .into_iter()
        .map(|tile| TileView {
            // Wrapped copies of the same tile share x, so key on position too.
            key: format!("{}/{}/{}@{}", tile.z, tile.x, tile.y, tile.left),
            src: config.tile_src(tile.z, tile.x, tile.y),
            style: format!(
                "left: {}px; top: {}px; width: {TILE_SIZE}px; height: {TILE_SIZE}px;",
                tile.left, tile.top
            ),
        })
        .collect()
}

/// Unrotated screen positions of every waypoint.
fn marker_positions(viewport: &Viewport, store: &WaypointStore) -> Vec<(f64, f64)> {
    store
        .iter()
        .map(|w| mercator::screen_position(viewport, w.latitude, w.longitude))
        .collect()
}

fn marker_views(
    viewport: &Viewport,
    store: &WaypointStore,
    state: &MapState,
    pin_sizes: &[SpringState],
    config: &MapConfig,
) -> Vec<MarkerView> {
    marker_positions(viewport, store)
        .into_iter()
        .zip(store.iter())
        .enumerate()
        .map(|(index, ((x, y), waypoint))| {
            let selected = state.is_selected(index);
            let size = pin_sizes
                .get(index)
                .map(|s| s.value)
                .unwrap_or(config.pin_size);
            MarkerView {
                index,
                class: if selected { "marker selected" } else { "marker" },
                // Pins stay upright on a rotated map; the tip marks the spot.
                style: format!(
                    "left: {x}px; top: {y}px; transform: translate(-50%, -100%) rotate({}deg);",
                    viewport.bearing
                ),
                svg: pin::pin_svg(size, selected),
                title: waypoint
                    .place_name
                    .clone()
                    .unwrap_or_else(|| waypoint.formatted_date(&config.date_format)),
            }
        })
        .collect()
}

#[component]
pub fn MapView(
    store: Signal<WaypointStore>,
    config: Signal<MapConfig>,
    state: Signal<MapState>,
    camera: Signal<CameraSpring>,
    on_event: EventHandler<MapEvent>,
) -> Element {
    let mut camera = camera;

    let mut pin_sizes = use_signal(|| {
        let config = config.peek();
        pin::pin_targets(
            state.peek().selection,
            store.peek().len(),
            config.pin_size,
            config.selected_pin_size,
        )
        .into_iter()
        .map(SpringState::at)
        .collect::<Vec<_>>()
    });

    // Spring animation: camera position and pin sizes chase the current state.
    use_future(move || async move {
        let mut last = js_sys::Date::now();
        loop {
            TimeoutFuture::new(FRAME_MS).await;
            let now = js_sys::Date::now();
            let dt = (now - last) / 1000.0;
            last = now;

            let (spring_config, pin_size, selected_pin_size) = {
                let config = config.peek();
                (config.spring, config.pin_size, config.selected_pin_size)
            };
            let current = *state.peek();

            let camera_config = SpringConfig {
                precision: CAMERA_PRECISION,
                ..spring_config
            };
            let target = (current.viewport.latitude, current.viewport.longitude);
            let cam = *camera.peek();
            if !cam.is_settled(&camera_config, target) {
                camera.set(cam.step(&camera_config, target, dt));
            }

            let targets = pin::pin_targets(
                current.selection,
                store.peek().len(),
                pin_size,
                selected_pin_size,
            );
            let stepped = spring::step_all(&spring_config, &pin_sizes.peek(), &targets, dt);
            if let Some(stepped) = stepped {
                pin_sizes.set(stepped);
            }
        }
    });

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_viewport = use_signal(Viewport::default);

    // Touch state
    let mut touch_start = use_signal(|| None::<(f64, f64)>);
    let mut touch_last = use_signal(|| (0.0_f64, 0.0_f64));
    let mut touch_did_pan = use_signal(|| false);
    let mut touch_start_viewport = use_signal(Viewport::default);
    let mut swipe = use_signal(SwipeTracker::default);
    let mut is_pinching = use_signal(|| false);
    let mut pinch_start_distance = use_signal(|| 0.0_f64);
    let mut pinch_start_viewport = use_signal(Viewport::default);

    let current = *state.read();
    let (latitude, longitude) = camera.read().position();
    let rendered = Viewport {
        latitude,
        longitude,
        ..current.viewport
    };

    let cfg = config.read();
    let tiles = tile_views(&rendered, &cfg);
    let markers = marker_views(&rendered, &store.read(), &current, &pin_sizes.read(), &cfg);
    let attribution = cfg.attribution.clone();
    drop(cfg);

    let canvas_style = canvas_transform(&rendered);
    let tile_style = tile_layer_style(&rendered);
    let container_style = format!(
        "width: {}px; height: {}px;",
        rendered.width, rendered.height
    );
    let container_class = if *is_dragging.read() {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",
            style: "{container_style}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let delta_y = coords::wheel_delta_y(evt.data().delta());
                let client = evt.data().client_coordinates();
                let cursor = coords::client_to_map_container(client.x, client.y);
                let viewport = state.peek().viewport;
                let next = coords::wheel_viewport(&viewport, delta_y, cursor, &config.peek());
                if next != viewport {
                    on_event.call(MapEvent::ViewportChanged(next));
                }
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start.set((client.x, client.y));
                drag_start_viewport.set(state.peek().viewport);
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let (sx, sy) = *drag_start.read();
                let dx = client.x - sx;
                let dy = client.y - sy;

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let next = coords::drag_viewport(&drag_start_viewport.read(), dx, dy);
                    on_event.call(MapEvent::ViewportChanged(next));
                }
            },

            onmouseup: move |_| is_dragging.set(false),

            onmouseleave: move |_| is_dragging.set(false),

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                let home = state.peek().home_viewport(&store.peek(), &config.peek());
                on_event.call(MapEvent::ViewportChanged(home));
            },

            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() == 1 {
                    let point = touches[0].client_coordinates();
                    let point = (point.x, point.y);
                    touch_start.set(Some(point));
                    touch_last.set(point);
                    touch_did_pan.set(false);
                    touch_start_viewport.set(state.peek().viewport);
                    swipe.write().start(point.0, point.1, js_sys::Date::now());
                } else if touches.len() >= 2 {
                    swipe.write().cancel();
                    let p0 = touches[0].client_coordinates();
                    let p1 = touches[1].client_coordinates();
                    is_pinching.set(true);
                    pinch_start_distance.set(coords::point_distance((p0.x, p0.y), (p1.x, p1.y)));
                    pinch_start_viewport.set(state.peek().viewport);
                }
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();

                if *is_pinching.read() && touches.len() >= 2 {
                    let p0 = touches[0].client_coordinates();
                    let p1 = touches[1].client_coordinates();
                    let distance = coords::point_distance((p0.x, p0.y), (p1.x, p1.y));
                    let next = coords::pinch_viewport(
                        &pinch_start_viewport.read(),
                        *pinch_start_distance.read(),
                        distance,
                        &config.peek(),
                    );
                    if let Some(next) = next {
                        on_event.call(MapEvent::ViewportChanged(next));
                    }
                } else if touches.len() == 1 {
                    let Some(start) = *touch_start.read() else { return };
                    let point = touches[0].client_coordinates();
                    let point = (point.x, point.y);
                    touch_last.set(point);
                    let dx = point.0 - start.0;
                    let dy = point.1 - start.1;

                    if !*touch_did_pan.read()
                        && (dx.abs() > TOUCH_DRAG_THRESHOLD || dy.abs() > TOUCH_DRAG_THRESHOLD)
                    {
                        touch_did_pan.set(true);
                    }
                    if *touch_did_pan.read() {
                        let next = coords::drag_viewport(&touch_start_viewport.read(), dx, dy);
                        on_event.call(MapEvent::ViewportChanged(next));
                    }
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let remaining = evt.data().touches().len();

                if *is_pinching.read() {
                    // Wait for all fingers to lift before resetting pinch state
                    if remaining == 0 {
                        is_pinching.set(false);
                        touch_start.set(None);
                    }
                    return;
                }
                if remaining > 0 {
                    return;
                }

                let last = *touch_last.read();
                let swipe_config = config.peek().swipe;
                let swiped = swipe.write().finish(last.0, last.1, js_sys::Date::now(), &swipe_config);
                if let Some(direction) = swiped {
                    on_event.call(MapEvent::Swiped(direction));
                } else if !*touch_did_pan.read() {
                    // Tap: touchstart's preventDefault suppresses the pin's click.
                    let Some(start) = *touch_start.read() else { return };
                    if let Some(local) = coords::client_to_map_container(start.0, start.1) {
                        let viewport = state.peek().viewport;
                        let positions: Vec<(f64, f64)> = marker_positions(&viewport, &store.peek())
                            .into_iter()
                            .map(|p| coords::rotated_screen_point(&viewport, p))
                            .collect();
                        if let Some(index) = pin::nearest_marker(&positions, local, TAP_THRESHOLD) {
                            on_event.call(MapEvent::Select(index));
                        }
                    }
                }
                touch_start.set(None);
            },

            ontouchcancel: move |_evt: Event<TouchData>| {
                touch_start.set(None);
                touch_did_pan.set(false);
                is_pinching.set(false);
                swipe.write().cancel();
            },

            // Rotated and tilted with the camera; tiles and pins move together.
            div {
                class: "map-canvas",
                style: "{canvas_style}",

                div {
                    class: "tile-layer",
                    style: "{tile_style}",
                    for tile in tiles {
                        img {
                            key: "{tile.key}",
                            class: "tile",
                            src: "{tile.src}",
                            style: "{tile.style}",
                            alt: "",
                            draggable: "false",
                        }
                    }
                }

                div { class: "marker-layer",
                    for marker in markers {
                        div {
                            key: "{marker.index}",
                            class: "{marker.class}",
                            style: "{marker.style}",
                            title: "{marker.title}",
                            dangerous_inner_html: "{marker.svg}",
                            onclick: move |evt: Event<MouseData>| {
                                evt.stop_propagation();
                                // The mouseup that ends a drag also clicks.
                                if !*did_drag.peek() {
                                    on_event.call(MapEvent::Select(marker.index));
                                }
                            },
                        }
                    }
                }
            }

            div { class: "attribution", "{attribution}" }
        }
    }
}
