use crate::config::MapConfig;
use crate::gesture::{NavKey, SwipeDirection};
use crate::models::{Viewport, Waypoint};
use crate::store::WaypointStore;

impl Viewport {
    /// Same camera, new canvas size.
    pub fn resized(self, width: f64, height: f64) -> Viewport {
        Viewport {
            width,
            height,
            ..self
        }
    }

    /// Centre on a waypoint, shifted south by `latitude_offset` so the overlay
    /// sits above the marker. Zoom, bearing, pitch and size are kept.
    pub fn centered_on(self, waypoint: &Waypoint, latitude_offset: f64) -> Viewport {
        Viewport {
            latitude: waypoint.latitude - latitude_offset,
            longitude: waypoint.longitude,
            ..self
        }
    }
}

/// Inputs the map reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    Resized { width: f64, height: f64 },
    /// Drag, wheel, pinch or navigation control. Replaces the viewport as is.
    ViewportChanged(Viewport),
    Advance,
    Retreat,
    Key(NavKey),
    Swiped(SwipeDirection),
    /// Marker click or deep link. Out-of-range indices are ignored.
    Select(usize),
}

impl MapEvent {
    /// Events whose new camera position is shown at once rather than animated.
    pub fn snaps_camera(&self) -> bool {
        matches!(
            self,
            MapEvent::Resized { .. } | MapEvent::ViewportChanged(_)
        )
    }
}

/// Immutable snapshot of everything that changes while the map is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapState {
    pub viewport: Viewport,
    /// `None` only when there are no waypoints.
    pub selection: Option<usize>,
}

impl MapState {
    /// Start on the earliest waypoint, or on the configured camera when the
    /// dataset is empty.
    pub fn initial(store: &WaypointStore, config: &MapConfig) -> MapState {
        match store.first() {
            Some(first) => MapState {
                viewport: config
                    .initial_viewport
                    .centered_on(first, config.latitude_offset),
                selection: Some(0),
            },
            None => MapState {
                viewport: config.initial_viewport,
                selection: None,
            },
        }
    }

    pub fn selected<'a>(&self, store: &'a WaypointStore) -> Option<&'a Waypoint> {
        self.selection.and_then(|i| store.get(i))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection == Some(index)
    }

    pub fn apply(self, store: &WaypointStore, config: &MapConfig, event: MapEvent) -> MapState {
        match event {
            MapEvent::Resized { width, height } => MapState {
                viewport: self.viewport.resized(width, height),
                ..self
            },
            MapEvent::ViewportChanged(viewport) => MapState { viewport, ..self },
            MapEvent::Advance
            | MapEvent::Key(NavKey::Right)
            | MapEvent::Swiped(SwipeDirection::Left) => self.advance(store, config),
            MapEvent::Retreat
            | MapEvent::Key(NavKey::Left)
            | MapEvent::Swiped(SwipeDirection::Right) => self.retreat(store, config),
            MapEvent::Select(index) => self.select(store, config, index),
        }
    }

    /// Move to the next waypoint; no-op at the last one.
    pub fn advance(self, store: &WaypointStore, config: &MapConfig) -> MapState {
        match self.selection {
            Some(i) if i + 1 < store.len() => self.select(store, config, i + 1),
            _ => self,
        }
    }

    /// Move to the previous waypoint; no-op at the first one.
    pub fn retreat(self, store: &WaypointStore, config: &MapConfig) -> MapState {
        match self.selection {
            Some(i) if i > 0 => self.select(store, config, i - 1),
            _ => self,
        }
    }

    /// North-up, flat camera at the configured zoom over the selected
    /// waypoint (or the configured camera when nothing is selected).
    pub fn home_viewport(&self, store: &WaypointStore, config: &MapConfig) -> Viewport {
        let home = Viewport {
            width: self.viewport.width,
            height: self.viewport.height,
            ..config.initial_viewport
        };
        match self.selected(store) {
            Some(waypoint) => home.centered_on(waypoint, config.latitude_offset),
            None => home,
        }
    }

    fn select(self, store: &WaypointStore, config: &MapConfig, index: usize) -> MapState {
        let Some(waypoint) = store.get(index) else {
            tracing::debug!(index, len = store.len(), "Ignoring out-of-range selection");
            return self;
        };
        MapState {
            viewport: self
                .viewport
                .centered_on(waypoint, config.latitude_offset),
            selection: Some(index),
        }
    }
}
