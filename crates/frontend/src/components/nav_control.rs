use dioxus::prelude::*;
use waypoint_shared::config::MapConfig;
use waypoint_shared::models::Viewport;
use waypoint_shared::state::MapEvent;

const ZOOM_BUTTON_STEP: f64 = 1.0;

fn zoomed(viewport: Viewport, delta: f64, config: &MapConfig) -> Viewport {
    Viewport {
        zoom: config.clamp_zoom(viewport.zoom + delta),
        ..viewport
    }
}

fn north_up(viewport: Viewport) -> Viewport {
    Viewport {
        bearing: 0.0,
        pitch: 0.0,
        ..viewport
    }
}

/// Text for the position counter, e.g. "3 / 9".
fn position_label(selection: Option<usize>, count: usize) -> String {
    match selection {
        Some(i) => format!("{} / {}", i + 1, count),
        None => format!("– / {count}"),
    }
}

#[component]
pub fn NavControl(
    viewport: Viewport,
    selection: Option<usize>,
    count: usize,
    config: MapConfig,
    on_event: EventHandler<MapEvent>,
    on_help: EventHandler<()>,
) -> Element {
    let zoom_in = zoomed(viewport, ZOOM_BUTTON_STEP, &config);
    let zoom_out = zoomed(viewport, -ZOOM_BUTTON_STEP, &config);
    let can_zoom_in = zoom_in.zoom > viewport.zoom;
    let can_zoom_out = zoom_out.zoom < viewport.zoom;
    let rotated = viewport.bearing != 0.0 || viewport.pitch != 0.0;
    let at_start = selection.is_none_or(|i| i == 0);
    let at_end = selection.is_none_or(|i| i + 1 >= count);
    let label = position_label(selection, count);
    let compass_style = format!("transform: rotate({}deg);", -viewport.bearing);

    rsx! {
        div { class: "nav-control",
            div { class: "nav-group",
                button {
                    class: "nav-button",
                    title: "Zoom in",
                    disabled: !can_zoom_in,
                    onclick: move |_| on_event.call(MapEvent::ViewportChanged(zoom_in)),
                    "+"
                }
                button {
                    class: "nav-button",
                    title: "Zoom out",
                    disabled: !can_zoom_out,
                    onclick: move |_| on_event.call(MapEvent::ViewportChanged(zoom_out)),
                    "\u{2212}"
                }
                button {
                    class: "nav-button compass",
                    title: "Reset bearing to north",
                    disabled: !rotated,
                    onclick: move |_| on_event.call(MapEvent::ViewportChanged(north_up(viewport))),
                    span { class: "compass-needle", style: "{compass_style}", "\u{25B2}" }
                }
            }
            div { class: "nav-group",
                button {
                    class: "nav-button",
                    title: "Previous waypoint",
                    disabled: at_start,
                    onclick: move |_| on_event.call(MapEvent::Retreat),
                    "\u{2039}"
                }
                span { class: "nav-position", "{label}" }
                button {
                    class: "nav-button",
                    title: "Next waypoint",
                    disabled: at_end,
                    onclick: move |_| on_event.call(MapEvent::Advance),
                    "\u{203A}"
                }
            }
            div { class: "nav-group",
                button {
                    class: "nav-button",
                    title: "Help",
                    onclick: move |_| on_help.call(()),
                    "?"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoomed_clamps() {
        let config = MapConfig::default();
        let v = Viewport {
            zoom: 17.5,
            ..Viewport::default()
        };
        assert_eq!(zoomed(v, 1.0, &config).zoom, 18.0);
        assert_eq!(zoomed(v, -1.0, &config).zoom, 16.5);
        let low = Viewport {
            zoom: 1.0,
            ..Viewport::default()
        };
        assert_eq!(zoomed(low, -1.0, &config).zoom, 1.0);
    }

    #[test]
    fn test_north_up_keeps_position() {
        let v = Viewport {
            latitude: 51.0,
            bearing: 45.0,
            pitch: 30.0,
            ..Viewport::default()
        };
        let reset = north_up(v);
        assert_eq!((reset.bearing, reset.pitch), (0.0, 0.0));
        assert_eq!(reset.latitude, 51.0);
        assert_eq!(reset.zoom, v.zoom);
    }

    #[test]
    fn test_position_label() {
        assert_eq!(position_label(Some(0), 9), "1 / 9");
        assert_eq!(position_label(Some(8), 9), "9 / 9");
        assert_eq!(position_label(None, 0), "– / 0");
    }
}
