//! Window-level event subscription as an injectable capability.
//!
//! The map only needs resize and keyup notifications. Components receive an
//! `EventSource` instead of reaching for the global window, and keep the
//! returned `Subscription`s alive for exactly as long as they are mounted.

use std::cell::RefCell;
use std::rc::Rc;

use crate::gesture::NavKey;
use crate::state::MapEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    KeyUp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Resize { width: f64, height: f64 },
    KeyUp { key: String },
}

impl WindowEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WindowEvent::Resize { .. } => EventKind::Resize,
            WindowEvent::KeyUp { .. } => EventKind::KeyUp,
        }
    }
}

pub type Handler = Box<dyn FnMut(&WindowEvent)>;

pub trait EventSource {
    fn subscribe(&self, kind: EventKind, handler: Handler) -> Subscription;
}

/// Keeps a handler attached; detaches it when dropped.
#[must_use = "the handler is detached as soon as the subscription is dropped"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Subscription {
            release: Some(Box::new(release)),
        }
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Translate window events into map events and forward them to `dispatch`.
///
/// Keys other than the navigation arrows are dropped here.
pub fn bind_map_events<S, F>(source: &S, dispatch: F) -> Vec<Subscription>
where
    S: EventSource + ?Sized,
    F: FnMut(MapEvent) + 'static,
{
    let dispatch = Rc::new(RefCell::new(dispatch));

    let on_resize = Rc::clone(&dispatch);
    let resize = source.subscribe(
        EventKind::Resize,
        Box::new(move |event: &WindowEvent| {
            if let WindowEvent::Resize { width, height } = *event {
                let mut dispatch = on_resize.borrow_mut();
                (*dispatch)(MapEvent::Resized { width, height });
            }
        }),
    );

    let on_key = dispatch;
    let keyup = source.subscribe(
        EventKind::KeyUp,
        Box::new(move |event: &WindowEvent| {
            if let WindowEvent::KeyUp { key } = event {
                if let Some(nav) = NavKey::from_key(key) {
                    let mut dispatch = on_key.borrow_mut();
                    (*dispatch)(MapEvent::Key(nav));
                }
            }
        }),
    );

    vec![resize, keyup]
}

type SharedHandler = Rc<RefCell<Handler>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, EventKind, SharedHandler)>,
}

/// In-memory event source driven by `emit`. Used where there is no window.
#[derive(Default, Clone)]
pub struct ManualEventSource {
    registry: Rc<RefCell<Registry>>,
}

impl ManualEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every live handler of its kind; returns how many ran.
    pub fn emit(&self, event: &WindowEvent) -> usize {
        let kind = event.kind();
        // Clone the handlers out so they may subscribe or unsubscribe re-entrantly.
        let targets: Vec<SharedHandler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        for handler in &targets {
            let mut handler = handler.borrow_mut();
            (*handler)(event);
        }
        targets.len()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .handlers
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }
}

impl EventSource for ManualEventSource {
    fn subscribe(&self, kind: EventKind, handler: Handler) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry
                .handlers
                .push((id, kind, Rc::new(RefCell::new(handler))));
            id
        };
        let registry = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .borrow_mut()
                    .handlers
                    .retain(|(handler_id, _, _)| *handler_id != id);
            }
        })
    }
}
