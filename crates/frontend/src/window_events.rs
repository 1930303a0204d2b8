use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use waypoint_shared::events::{EventKind, EventSource, Handler, Subscription, WindowEvent};

/// `EventSource` backed by the browser window.
pub struct WindowEventSource {
    window: web_sys::Window,
}

impl WindowEventSource {
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| WindowEventSource { window })
    }

    pub fn inner_size(&self) -> Option<(f64, f64)> {
        inner_size(&self.window)
    }
}

fn inner_size(window: &web_sys::Window) -> Option<(f64, f64)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

impl EventSource for WindowEventSource {
    fn subscribe(&self, kind: EventKind, mut handler: Handler) -> Subscription {
        let listener = match kind {
            EventKind::Resize => {
                let window = self.window.clone();
                EventListener::new(&self.window, "resize", move |_event| {
                    if let Some((width, height)) = inner_size(&window) {
                        handler(&WindowEvent::Resize { width, height });
                    }
                })
            }
            EventKind::KeyUp => EventListener::new(&self.window, "keyup", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                handler(&WindowEvent::KeyUp { key: event.key() });
            }),
        };
        tracing::debug!(?kind, "Attached window listener");
        Subscription::new(move || {
            drop(listener);
            tracing::debug!(?kind, "Detached window listener");
        })
    }
}
