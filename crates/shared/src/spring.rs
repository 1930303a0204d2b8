use serde::Deserialize;

/// Longest step the integrator takes at once, in seconds. Frames that arrive
/// later than this (background tab, debugger) are split into several steps.
const MAX_STEP_SECS: f64 = 1.0 / 60.0;

/// Longest frame the integrator accepts. Anything beyond (suspend, long
/// background stall) is treated as this much time.
const MAX_FRAME_SECS: f64 = 0.25;

/// Spring parameters. Defaults are the common "gentle" preset
/// (tension 170, friction 26, mass 1).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub tension: f64,
    pub friction: f64,
    pub mass: f64,
    /// Below this displacement and velocity the spring is considered at rest.
    pub precision: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        SpringConfig {
            tension: 170.0,
            friction: 26.0,
            mass: 1.0,
            precision: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpringState {
    pub value: f64,
    pub velocity: f64,
}

impl SpringState {
    pub fn at(value: f64) -> Self {
        SpringState {
            value,
            velocity: 0.0,
        }
    }
}

impl SpringConfig {
    /// Advance `state` towards `target` by `dt` seconds.
    ///
    /// Semi-implicit Euler; snaps to the target once settled.
    pub fn step(&self, state: SpringState, target: f64, dt: f64) -> SpringState {
        if dt <= 0.0 {
            return state;
        }
        let mut state = state;
        let mut remaining = dt.min(MAX_FRAME_SECS);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let spring_force = -self.tension * (state.value - target);
            let damping_force = -self.friction * state.velocity;
            let acceleration = (spring_force + damping_force) / self.mass;
            state.velocity += acceleration * h;
            state.value += state.velocity * h;
            remaining -= h;
        }
        if self.is_settled(state, target) {
            SpringState::at(target)
        } else {
            state
        }
    }

    pub fn is_settled(&self, state: SpringState, target: f64) -> bool {
        (state.value - target).abs() < self.precision && state.velocity.abs() < self.precision
    }
}

/// A pair of springs driving a latitude/longitude camera transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraSpring {
    pub latitude: SpringState,
    pub longitude: SpringState,
}

impl CameraSpring {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        CameraSpring {
            latitude: SpringState::at(latitude),
            longitude: SpringState::at(longitude),
        }
    }

    /// Longitude travels the short way round, across the antimeridian when
    /// that is nearer, and is kept within [-180, 180).
    pub fn step(&self, config: &SpringConfig, target: (f64, f64), dt: f64) -> Self {
        let target_lon = nearest_longitude(self.longitude.value, target.1);
        let mut longitude = config.step(self.longitude, target_lon, dt);
        if longitude == SpringState::at(target_lon) {
            longitude = SpringState::at(target.1);
        } else {
            longitude.value = wrap_longitude(longitude.value);
        }
        CameraSpring {
            latitude: config.step(self.latitude, target.0, dt),
            longitude,
        }
    }

    pub fn is_settled(&self, config: &SpringConfig, target: (f64, f64)) -> bool {
        config.is_settled(self.latitude, target.0)
            && config.is_settled(
                self.longitude,
                nearest_longitude(self.longitude.value, target.1),
            )
    }

    pub fn position(&self) -> (f64, f64) {
        (self.latitude.value, self.longitude.value)
    }
}

/// The copy of `target` (plus or minus whole turns) closest to `current`.
fn nearest_longitude(current: f64, target: f64) -> f64 {
    let delta = target - current;
    if delta.abs() <= 180.0 {
        target
    } else {
        current + (delta + 180.0).rem_euclid(360.0) - 180.0
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// Step a set of springs towards their targets.
///
/// Returns `None` when every spring is already at rest. A length mismatch
/// (the dataset changed) resets all springs onto their targets.
pub fn step_all(
    config: &SpringConfig,
    states: &[SpringState],
    targets: &[f64],
    dt: f64,
) -> Option<Vec<SpringState>> {
    if states.len() != targets.len() {
        return Some(targets.iter().copied().map(SpringState::at).collect());
    }
    if states
        .iter()
        .zip(targets)
        .all(|(state, target)| config.is_settled(*state, *target))
    {
        return None;
    }
    Some(
        states
            .iter()
            .zip(targets)
            .map(|(state, target)| config.step(*state, *target, dt))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: &SpringConfig, from: f64, to: f64, seconds: f64) -> SpringState {
        let mut state = SpringState::at(from);
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            state = config.step(state, to, 1.0 / 60.0);
        }
        state
    }

    #[test]
    fn test_settled_spring_stays_put() {
        let config = SpringConfig::default();
        let state = config.step(SpringState::at(20.0), 20.0, 0.016);
        assert_eq!(state, SpringState::at(20.0));
    }

    #[test]
    fn test_moves_towards_target() {
        let config = SpringConfig::default();
        let state = config.step(SpringState::at(20.0), 32.0, 1.0 / 60.0);
        assert!(state.value > 20.0 && state.value < 32.0);
        assert!(state.velocity > 0.0);
    }

    #[test]
    fn test_converges_and_snaps() {
        let config = SpringConfig::default();
        let state = run(&config, 20.0, 32.0, 3.0);
        assert_eq!(state, SpringState::at(32.0));
        assert!(config.is_settled(state, 32.0));
    }

    #[test]
    fn test_shrinks_back() {
        let config = SpringConfig::default();
        let state = run(&config, 32.0, 20.0, 3.0);
        assert_eq!(state.value, 20.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let config = SpringConfig::default();
        let start = SpringState {
            value: 5.0,
            velocity: 3.0,
        };
        assert_eq!(config.step(start, 10.0, 0.0), start);
        assert_eq!(config.step(start, 10.0, -1.0), start);
    }

    #[test]
    fn test_large_dt_stays_stable() {
        let config = SpringConfig::default();
        let state = config.step(SpringState::at(0.0), 1.0, 0.25);
        assert!(state.value.is_finite() && state.velocity.is_finite());
        assert!(state.value > 0.5 && state.value < 1.5);
    }

    #[test]
    fn test_long_stall_counts_as_one_capped_frame() {
        let config = SpringConfig::default();
        let start = SpringState::at(20.0);
        let capped = config.step(start, 32.0, MAX_FRAME_SECS);
        assert_eq!(config.step(start, 32.0, 3600.0 * 8.0), capped);
        assert_eq!(config.step(start, 32.0, f64::INFINITY), capped);
    }

    #[test]
    fn test_camera_spring_converges() {
        let config = SpringConfig::default();
        let target = (51.4, -0.1);
        let mut camera = CameraSpring::at(53.0, -2.0);
        for _ in 0..240 {
            camera = camera.step(&config, target, 1.0 / 60.0);
        }
        assert!(camera.is_settled(&config, target));
        assert_eq!(camera.position(), target);
    }

    #[test]
    fn test_camera_crosses_antimeridian_the_short_way() {
        let config = SpringConfig::default();
        let target = (0.0, -179.0);
        let mut camera = CameraSpring::at(0.0, 179.0);
        for _ in 0..240 {
            camera = camera.step(&config, target, 1.0 / 60.0);
            let lon = camera.longitude.value;
            // Only values within a few degrees of the antimeridian on either side.
            assert!(lon >= 170.0 || lon <= -170.0, "longitude swung to {lon}");
            assert!((-180.0..180.0).contains(&lon));
        }
        assert!(camera.is_settled(&config, target));
        assert_eq!(camera.position(), target);
    }

    #[test]
    fn test_nearest_longitude() {
        assert_eq!(nearest_longitude(-2.0, -0.1), -0.1);
        assert!((nearest_longitude(179.0, -179.0) - 181.0).abs() < 1e-9);
        assert!((nearest_longitude(-170.0, 170.0) + 190.0).abs() < 1e-9);
        assert!((wrap_longitude(181.0) + 179.0).abs() < 1e-9);
        assert_eq!(wrap_longitude(-45.0), -45.0);
    }

    #[test]
    fn test_step_all_settled_returns_none() {
        let config = SpringConfig::default();
        let states = [SpringState::at(20.0), SpringState::at(32.0)];
        assert!(step_all(&config, &states, &[20.0, 32.0], 1.0 / 60.0).is_none());
    }

    #[test]
    fn test_step_all_moves_towards_targets() {
        let config = SpringConfig::default();
        let states = [SpringState::at(20.0), SpringState::at(32.0)];
        let next = step_all(&config, &states, &[32.0, 20.0], 1.0 / 60.0).unwrap();
        assert!(next[0].value > 20.0 && next[0].value < 32.0);
        assert!(next[1].value < 32.0 && next[1].value > 20.0);
    }

    #[test]
    fn test_step_all_resets_on_length_change() {
        let config = SpringConfig::default();
        let next = step_all(&config, &[SpringState::at(5.0)], &[20.0, 32.0], 0.0).unwrap();
        assert_eq!(next, vec![SpringState::at(20.0), SpringState::at(32.0)]);
    }
}
