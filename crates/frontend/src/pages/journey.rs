use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use waypoint_shared::events::{bind_map_events, Subscription};
use waypoint_shared::spring::CameraSpring;
use waypoint_shared::state::{MapEvent, MapState};

use crate::components::help_overlay::HelpOverlay;
use crate::components::map_view::MapView;
use crate::components::nav_control::NavControl;
use crate::components::overlay::InfoOverlay;
use crate::dataset;
use crate::window_events::WindowEventSource;

#[component]
pub fn Journey(initial_index: Option<usize>) -> Element {
    let store = use_signal(dataset::load_store);
    let config = use_signal(dataset::load_config);
    let mut state = use_signal(|| {
        let store = store.peek();
        let config = config.peek();
        let initial = MapState::initial(&store, &config);
        match initial_index {
            Some(index) => initial.apply(&store, &config, MapEvent::Select(index)),
            None => initial,
        }
    });
    let mut camera = use_signal(|| {
        let viewport = state.peek().viewport;
        CameraSpring::at(viewport.latitude, viewport.longitude)
    });
    let mut show_help = use_signal(|| false);

    // Single queue for every input, so events apply one at a time in arrival order.
    let events = use_coroutine(move |mut rx: UnboundedReceiver<MapEvent>| async move {
        while let Some(event) = rx.next().await {
            let current = *state.peek();
            let next = current.apply(&store.peek(), &config.peek(), event);
            if next == current {
                continue;
            }
            if event.snaps_camera() {
                camera.set(CameraSpring::at(
                    next.viewport.latitude,
                    next.viewport.longitude,
                ));
            }
            tracing::debug!(?event, selection = ?next.selection, "Applied map event");
            state.set(next);
        }
    });

    // Window listeners live exactly as long as this page is mounted.
    let subscriptions: Rc<RefCell<Vec<Subscription>>> = use_hook(move || {
        let Some(source) = WindowEventSource::new() else {
            tracing::warn!("No window available, resize and keyboard input disabled");
            return Rc::new(RefCell::new(Vec::new()));
        };
        if let Some((width, height)) = source.inner_size() {
            events.send(MapEvent::Resized { width, height });
        }
        let bound = bind_map_events(&source, move |event| events.send(event));
        Rc::new(RefCell::new(bound))
    });
    use_drop(move || subscriptions.borrow_mut().clear());

    let current = *state.read();
    let count = store.read().len();
    let selected = current.selected(&store.read()).cloned();
    let cfg = config.read().clone();
    let date_format = cfg.date_format.clone();

    rsx! {
        div { class: "app",
            MapView {
                store,
                config,
                state,
                camera,
                on_event: move |event| events.send(event),
            }

            InfoOverlay { waypoint: selected, date_format }

            div { class: "nav",
                NavControl {
                    viewport: current.viewport,
                    selection: current.selection,
                    count,
                    config: cfg,
                    on_event: move |event| events.send(event),
                    on_help: move |_| show_help.set(true),
                }
            }

            HelpOverlay { show: show_help }
        }
    }
}
