use crate::config::SwipeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Keys that step through the waypoint sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(NavKey::Left),
            "ArrowRight" | "Right" => Some(NavKey::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchStart {
    x: f64,
    y: f64,
    time_ms: f64,
}

/// Classifies a single-finger touch as a horizontal swipe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeTracker {
    start: Option<TouchStart>,
}

impl SwipeTracker {
    pub fn start(&mut self, x: f64, y: f64, time_ms: f64) {
        self.start = Some(TouchStart { x, y, time_ms });
    }

    /// Forget the current touch, e.g. when a second finger lands.
    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// End the touch and return the swipe it formed, if any.
    pub fn finish(
        &mut self,
        x: f64,
        y: f64,
        time_ms: f64,
        config: &SwipeConfig,
    ) -> Option<SwipeDirection> {
        let start = self.start.take()?;
        let dx = x - start.x;
        let dy = y - start.y;
        let elapsed = time_ms - start.time_ms;

        if dx.abs() < config.min_distance || dx.abs() <= dy.abs() {
            return None;
        }
        if elapsed > config.max_duration_ms {
            return None;
        }
        if dx < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            Some(SwipeDirection::Right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(dx: f64, dy: f64, ms: f64) -> Option<SwipeDirection> {
        let mut tracker = SwipeTracker::default();
        tracker.start(200.0, 300.0, 1000.0);
        tracker.finish(200.0 + dx, 300.0 + dy, 1000.0 + ms, &SwipeConfig::default())
    }

    #[test]
    fn test_nav_key_from_key() {
        assert_eq!(NavKey::from_key("ArrowLeft"), Some(NavKey::Left));
        assert_eq!(NavKey::from_key("ArrowRight"), Some(NavKey::Right));
        assert_eq!(NavKey::from_key("Right"), Some(NavKey::Right));
        assert_eq!(NavKey::from_key("ArrowUp"), None);
        assert_eq!(NavKey::from_key("a"), None);
    }

    #[test]
    fn test_swipe_left_and_right() {
        assert_eq!(swipe(-120.0, 10.0, 200.0), Some(SwipeDirection::Left));
        assert_eq!(swipe(120.0, -10.0, 200.0), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_short_travel_is_not_a_swipe() {
        assert_eq!(swipe(30.0, 0.0, 100.0), None);
    }

    #[test]
    fn test_vertical_travel_is_not_a_swipe() {
        assert_eq!(swipe(80.0, 150.0, 100.0), None);
    }

    #[test]
    fn test_slow_drag_is_not_a_swipe() {
        assert_eq!(swipe(200.0, 0.0, 2000.0), None);
    }

    #[test]
    fn test_finish_without_start() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(
            tracker.finish(0.0, 0.0, 0.0, &SwipeConfig::default()),
            None
        );
    }

    #[test]
    fn test_cancel_and_finish_resets() {
        let mut tracker = SwipeTracker::default();
        tracker.start(0.0, 0.0, 0.0);
        assert!(tracker.is_tracking());
        tracker.cancel();
        assert!(!tracker.is_tracking());
        assert_eq!(
            tracker.finish(-300.0, 0.0, 10.0, &SwipeConfig::default()),
            None
        );

        tracker.start(0.0, 0.0, 0.0);
        assert!(tracker
            .finish(-300.0, 0.0, 10.0, &SwipeConfig::default())
            .is_some());
        assert!(!tracker.is_tracking());
    }
}
