// ============================================================================
// FRAME LOOP STATE
// ============================================================================

use rand::Rng;

use crate::config::WheelConfig;
use crate::landing::LandingResolver;
use crate::spin::{SpinController, SpinRequest, SpinState, TickOutcome};

/// Wedge the wheel came to rest on.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinResult {
    pub index: usize,
    pub label: String,
    pub angle: f64,
    pub frames: u32,
    pub total_rotation: f64,
}

/// Everything one frame needs: spin physics, landing and the displayed result.
///
/// The host scheduler calls [`WheelSession::tick`] once per presented frame.
/// Ticks are ignored until [`WheelSession::start`] and after
/// [`WheelSession::stop`].
#[derive(Debug, Clone)]
pub struct WheelSession {
    controller: SpinController,
    resolver: LandingResolver,
    labels: Vec<String>,
    result: Option<SpinResult>,
    running: bool,
}

impl WheelSession {
    pub fn new(config: &WheelConfig) -> Self {
        Self {
            controller: SpinController::new(config.deceleration, config.speed_range()),
            resolver: LandingResolver::new(config.slice_count, config.pointer_offset_deg),
            labels: config.labels.clone(),
            result: None,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn spin_state(&self) -> &SpinState {
        self.controller.state()
    }

    pub fn is_spinning(&self) -> bool {
        self.controller.is_spinning()
    }

    /// Most recent landing, cleared while a new spin is under way.
    pub fn result(&self) -> Option<&SpinResult> {
        self.result.as_ref()
    }

    pub fn request_spin<R: Rng>(&mut self, rng: &mut R) -> SpinRequest {
        let request = self.controller.start(rng);
        self.after_request(request)
    }

    pub fn request_spin_with_speed(&mut self, speed: f64) -> SpinRequest {
        let request = self.controller.start_with_speed(speed);
        self.after_request(request)
    }

    fn after_request(&mut self, request: SpinRequest) -> SpinRequest {
        match request {
            SpinRequest::Started { speed } => {
                log::info!("spin started at {speed:.4} rad/frame");
                self.result = None;
            }
            SpinRequest::Ignored => log::debug!("spin request ignored, wheel already spinning"),
        }
        request
    }

    /// Advances one frame. Returns the landing on the frame the wheel stops.
    pub fn tick(&mut self) -> Option<&SpinResult> {
        if !self.running {
            return None;
        }
        match self.controller.tick() {
            TickOutcome::Stopped { angle } => {
                let index = self.resolver.resolve(angle);
                let label = match self.labels.get(index) {
                    Some(label) => label.clone(),
                    None => {
                        log::warn!("no label for wedge {index}, showing it blank");
                        String::new()
                    }
                };
                let state = self.controller.state();
                let result = SpinResult {
                    index,
                    label,
                    angle,
                    frames: state.frames,
                    total_rotation: state.total_rotation,
                };
                log::info!(
                    "landed on wedge {} ({}) after {} frames, {:.3} rad",
                    result.index,
                    result.label,
                    result.frames,
                    result.total_rotation
                );
                self.result = Some(result);
                self.result.as_ref()
            }
            TickOutcome::Idle | TickOutcome::Spinning => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running_session(config: &WheelConfig) -> WheelSession {
        let mut session = WheelSession::new(config);
        session.start();
        session
    }

    fn spin_to_rest(session: &mut WheelSession) -> SpinResult {
        for _ in 0..100_000 {
            if let Some(result) = session.tick() {
                return result.clone();
            }
        }
        panic!("wheel never came to rest");
    }

    #[test]
    fn stopped_session_ignores_ticks() {
        let mut session = WheelSession::new(&WheelConfig::default());
        session.request_spin_with_speed(0.4);
        assert!(session.tick().is_none());
        assert_eq!(session.spin_state().angle, 0.0);

        session.start();
        session.tick();
        assert!(session.spin_state().angle > 0.0);

        session.stop();
        let frozen = *session.spin_state();
        session.tick();
        assert_eq!(*session.spin_state(), frozen);
    }

    #[test]
    fn landing_reports_wedge_and_label() {
        let config = WheelConfig::default();
        let mut session = running_session(&config);
        session.request_spin_with_speed(0.5);
        let result = spin_to_rest(&mut session);

        assert_eq!(result.frames, 250);
        assert!((result.total_rotation - 62.75).abs() < 1e-9);
        assert_eq!(result.index, LandingResolver::default().resolve(result.angle));
        assert_eq!(result.label, config.label(result.index));
        assert_eq!(session.result(), Some(&result));
        assert!(!session.is_spinning());
    }

    #[test]
    fn new_spin_clears_previous_result() {
        let mut session = running_session(&WheelConfig::default());
        session.request_spin_with_speed(0.01);
        spin_to_rest(&mut session);
        assert!(session.result().is_some());

        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(session.request_spin(&mut rng), SpinRequest::Started { .. }));
        assert!(session.result().is_none());
    }

    #[test]
    fn retrigger_while_spinning_keeps_state() {
        let mut session = running_session(&WheelConfig::default());
        session.request_spin_with_speed(0.4);
        session.tick();
        let before = *session.spin_state();

        assert_eq!(session.request_spin_with_speed(0.3), SpinRequest::Ignored);
        assert_eq!(*session.spin_state(), before);
    }

    #[test]
    fn short_label_list_lands_blank() {
        let config = WheelConfig::builder().labels(Vec::new()).build();
        let mut session = running_session(&config);
        session.request_spin_with_speed(0.05);
        let result = spin_to_rest(&mut session);
        assert_eq!(result.label, "");
    }

    #[test]
    fn result_is_only_reported_on_the_stopping_frame() {
        let mut session = running_session(&WheelConfig::default());
        session.request_spin_with_speed(0.004);
        assert!(session.tick().is_none());
        assert!(session.tick().is_some());
        assert!(session.tick().is_none());
        assert!(session.result().is_some());
    }
}
