// ============================================================================
// SPIN CONTROLLER
// ============================================================================

use std::ops::Range;

use rand::Rng;

/// Per-frame speed reduction, radians/frame².
pub const DEFAULT_DECELERATION: f64 = 0.002;

/// Initial speeds are drawn uniformly from this range, radians/frame.
pub const DEFAULT_SPEED_RANGE: Range<f64> = 0.3..0.5;

/// Rotation state shared with the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpinState {
    /// Accumulated wheel angle in radians. Never wrapped.
    pub angle: f64,
    /// Current speed in radians per frame, never negative.
    pub speed: f64,
    pub spinning: bool,
    /// Radians covered since the current spin started.
    pub total_rotation: f64,
    /// Frames elapsed since the current spin started.
    pub frames: u32,
}

/// What a single frame did to the spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Idle,
    Spinning,
    /// The wheel stopped during this frame at `angle`.
    Stopped { angle: f64 },
}

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinRequest {
    Started { speed: f64 },
    /// A spin was already running; nothing changed.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SpinController {
    state: SpinState,
    deceleration: f64,
    speed_range: Range<f64>,
}

impl Default for SpinController {
    fn default() -> Self {
        Self::new(DEFAULT_DECELERATION, DEFAULT_SPEED_RANGE)
    }
}

impl SpinController {
    /// A deceleration that is not a finite positive number would never stop
    /// the wheel, so it falls back to [`DEFAULT_DECELERATION`].
    pub fn new(deceleration: f64, speed_range: Range<f64>) -> Self {
        let deceleration = if deceleration.is_finite() && deceleration > 0.0 {
            deceleration
        } else {
            log::warn!("deceleration {deceleration} cannot stop the wheel, using {DEFAULT_DECELERATION}");
            DEFAULT_DECELERATION
        };
        Self {
            state: SpinState::default(),
            deceleration,
            speed_range,
        }
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state.spinning
    }

    /// Starts a spin with a random initial speed. No-op while spinning.
    pub fn start<R: Rng>(&mut self, rng: &mut R) -> SpinRequest {
        if self.state.spinning {
            return SpinRequest::Ignored;
        }
        let speed = if self.speed_range.is_empty() {
            self.speed_range.start
        } else {
            rng.random_range(self.speed_range.clone())
        };
        self.start_with_speed(speed)
    }

    /// Starts a spin at a fixed speed. No-op while spinning.
    pub fn start_with_speed(&mut self, speed: f64) -> SpinRequest {
        if self.state.spinning {
            return SpinRequest::Ignored;
        }
        let speed = speed.max(0.0);
        self.state.speed = speed;
        self.state.total_rotation = 0.0;
        self.state.frames = 0;
        self.state.spinning = true;
        SpinRequest::Started { speed }
    }

    /// Advances the spin by one frame.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.spinning {
            return TickOutcome::Idle;
        }

        let state = &mut self.state;
        state.angle += state.speed;
        state.total_rotation += state.speed;
        state.frames += 1;
        state.speed = (state.speed - self.deceleration).max(0.0);

        if state.speed == 0.0 {
            state.spinning = false;
            TickOutcome::Stopped { angle: state.angle }
        } else {
            TickOutcome::Spinning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_to_rest(controller: &mut SpinController) -> (u32, f64) {
        let mut frames = 0;
        loop {
            frames += 1;
            assert!(frames < 100_000, "spin never stopped");
            if let TickOutcome::Stopped { angle } = controller.tick() {
                return (frames, angle);
            }
        }
    }

    #[test]
    fn idle_controller_does_not_move() {
        let mut controller = SpinController::default();
        assert_eq!(controller.tick(), TickOutcome::Idle);
        assert_eq!(controller.state().angle, 0.0);
    }

    #[test]
    fn half_radian_spin_stops_after_250_frames() {
        let mut controller = SpinController::default();
        controller.start_with_speed(0.5);
        let (frames, angle) = run_to_rest(&mut controller);

        assert_eq!(frames, 250);
        assert_eq!(controller.state().frames, 250);
        assert_eq!(controller.state().speed, 0.0);
        assert!(!controller.is_spinning());

        let expected: f64 = (0..250).map(|k| 0.5 - 0.002 * k as f64).sum();
        assert!((expected - 62.75).abs() < 1e-9);
        assert!((controller.state().total_rotation - expected).abs() < 1e-9);
        assert!((angle - expected).abs() < 1e-9);
    }

    #[test]
    fn frames_to_rest_is_ceiling_of_speed_over_deceleration() {
        for &(speed, expected) in &[(0.3, 150), (0.4, 200), (0.301, 151), (0.4999, 250), (0.001, 1), (0.3 + 4e-10, 151)] {
            let mut controller = SpinController::default();
            controller.start_with_speed(speed);
            let (frames, _) = run_to_rest(&mut controller);
            assert_eq!(frames, expected, "speed {speed}");
            assert_eq!(controller.state().speed, 0.0);
        }
    }

    #[test]
    fn speed_never_goes_negative() {
        let mut controller = SpinController::new(0.07, 0.3..0.5);
        controller.start_with_speed(0.3);
        while controller.is_spinning() {
            controller.tick();
            assert!(controller.state().speed >= 0.0);
        }
    }

    #[test]
    fn start_just_above_a_multiple_of_deceleration_takes_an_extra_frame() {
        let mut controller = SpinController::default();
        controller.start_with_speed(0.3 + 4e-10);
        for _ in 0..150 {
            controller.tick();
        }
        assert!(controller.is_spinning());
        assert!(controller.state().speed > 0.0);
        assert!(matches!(controller.tick(), TickOutcome::Stopped { .. }));
        assert_eq!(controller.state().speed, 0.0);
    }

    #[test]
    fn unusable_deceleration_falls_back_to_default() {
        for bad in [0.0, -0.002, f64::NAN, f64::INFINITY] {
            let mut controller = SpinController::new(bad, 0.3..0.5);
            controller.start_with_speed(0.5);
            let (frames, _) = run_to_rest(&mut controller);
            assert_eq!(frames, 250, "deceleration {bad}");
        }
    }

    #[test]
    fn start_while_spinning_is_ignored() {
        let mut controller = SpinController::default();
        controller.start_with_speed(0.4);
        controller.tick();
        let before = *controller.state();

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(controller.start(&mut rng), SpinRequest::Ignored);
        assert_eq!(controller.start_with_speed(0.35), SpinRequest::Ignored);
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn random_start_speed_is_within_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut controller = SpinController::default();
            match controller.start(&mut rng) {
                SpinRequest::Started { speed } => assert!((0.3..0.5).contains(&speed)),
                SpinRequest::Ignored => panic!("idle controller ignored start"),
            }
        }
    }

    #[test]
    fn restart_keeps_angle_and_resets_totals() {
        let mut controller = SpinController::default();
        controller.start_with_speed(0.1);
        let (_, rest) = run_to_rest(&mut controller);

        controller.start_with_speed(0.2);
        assert_eq!(controller.state().angle, rest);
        assert_eq!(controller.state().total_rotation, 0.0);
        assert_eq!(controller.state().frames, 0);
        assert!(controller.is_spinning());
    }
}
