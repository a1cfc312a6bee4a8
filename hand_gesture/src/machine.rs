//! The display-mode state machine.
//!
//! Owns the current [`Mode`], the free-running camera-rotation target, and
//! the debounce timestamp.  One call to [`ModeMachine::step`] per detection
//! frame evaluates the transition rules in priority order; the caller commits
//! the returned [`Transition`] (mode plus focus) to the scene in the same
//! turn, so mode and focus never change independently.
//!
//! Rapid gesture flicker is damped only by the 500 ms gate — there is no
//! hysteresis on the signal itself, so at most one transition can land per
//! gate window.

use std::time::{Duration, Instant};

use tree_particles::{Mode, ParticleId};

use crate::classify::GestureSignal;

// ════════════════════════════════════════════════════════════════════════════
// Constants
// ════════════════════════════════════════════════════════════════════════════

/// Minimum wall-clock interval between accepted mode transitions.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Wrist sweep → rotation target gain: ±1 of hand travel maps to ±2 radians.
pub const ROTATION_GAIN: f32 = 2.0;

// ════════════════════════════════════════════════════════════════════════════
// Transition / StepOutcome
// ════════════════════════════════════════════════════════════════════════════

/// An accepted mode change.  `focus` is the particle promoted by a zoom
/// transition and `None` for everything else — committing both fields
/// together is what keeps mode and focus consistent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub mode:  Mode,
    pub focus: Option<ParticleId>,
}

/// What one `step` did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub transition:       Option<Transition>,
    /// True when the rotation target was updated this frame (scatter only).
    pub rotation_changed: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// ModeMachine
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct ModeMachine {
    mode:            Mode,
    rotation_target: f32,
    last_transition: Option<Instant>,
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeMachine {
    pub fn new() -> Self {
        ModeMachine {
            mode:            Mode::Tree,
            rotation_target: 0.0,
            last_transition: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Free-running rotation scalar — not wrapped to [0, 2π); consumers apply
    /// trigonometric wrapping when deriving an orbital position.
    pub fn rotation_target(&self) -> f32 {
        self.rotation_target
    }

    /// Process one gesture signal.
    ///
    /// `zoom_focus` is the particle a zoom transition would promote (the
    /// caller's pick, normally the first photo particle); `None` suppresses
    /// the zoom rule entirely — pinching with no photos is a silent no-op.
    pub fn step(
        &mut self,
        sig: &GestureSignal,
        now: Instant,
        zoom_focus: Option<ParticleId>,
    ) -> StepOutcome {
        let gate_open = self
            .last_transition
            .map_or(true, |t| now.duration_since(t) >= DEBOUNCE);

        let mut transition = None;
        if gate_open {
            // First match wins.
            if sig.extended_fingers <= 1 && !sig.is_pinching {
                if self.mode != Mode::Tree {
                    transition = Some(self.accept(Mode::Tree, None, now));
                }
            } else if sig.extended_fingers >= 4 {
                if self.mode != Mode::Scatter {
                    transition = Some(self.accept(Mode::Scatter, None, now));
                }
            } else if sig.is_pinching && self.mode == Mode::Scatter {
                if let Some(id) = zoom_focus {
                    transition = Some(self.accept(Mode::Zoom, Some(id), now));
                }
            }
        }

        // Continuous rotation update — never debounced.
        let mut rotation_changed = false;
        if self.mode == Mode::Scatter {
            self.rotation_target = sig.hand_x * ROTATION_GAIN;
            rotation_changed = true;
        }

        StepOutcome {
            transition,
            rotation_changed,
        }
    }

    fn accept(&mut self, mode: Mode, focus: Option<ParticleId>, now: Instant) -> Transition {
        log::debug!("mode {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        self.last_transition = Some(now);
        Transition { mode, focus }
    }

    /// Directly set the mode, bypassing gestures — the manual fallback the
    /// UI keeps working when the camera feed is gone.  Does not stamp the
    /// debounce timer.
    pub fn force_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Back to the launch state: tree mode, rotation zeroed, gate open.
    pub fn reset(&mut self) {
        self.mode = Mode::Tree;
        self.rotation_target = 0.0;
        self.last_transition = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn fist() -> GestureSignal {
        GestureSignal { extended_fingers: 0, is_pinching: false, hand_x: 0.0 }
    }
    fn open() -> GestureSignal {
        GestureSignal { extended_fingers: 5, is_pinching: false, hand_x: 0.0 }
    }
    fn pinch() -> GestureSignal {
        GestureSignal { extended_fingers: 2, is_pinching: true, hand_x: 0.0 }
    }
    fn sweep(hand_x: f32) -> GestureSignal {
        GestureSignal { extended_fingers: 5, is_pinching: false, hand_x }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_in_tree_with_open_gate() {
        let mut m = ModeMachine::new();
        let out = m.step(&open(), Instant::now(), None);
        assert_eq!(m.mode(), Mode::Scatter);
        assert_eq!(
            out.transition,
            Some(Transition { mode: Mode::Scatter, focus: None })
        );
    }

    #[test]
    fn fist_in_tree_is_a_no_op() {
        let mut m = ModeMachine::new();
        let out = m.step(&fist(), Instant::now(), None);
        assert_eq!(m.mode(), Mode::Tree);
        assert_eq!(out.transition, None);
    }

    #[test]
    fn debounce_blocks_second_transition_within_window() {
        let mut m = ModeMachine::new();
        let t0 = Instant::now();
        assert!(m.step(&open(), t0, None).transition.is_some());
        // Qualifying fist 200 ms later is swallowed by the gate.
        assert!(m.step(&fist(), t0 + ms(200), None).transition.is_none());
        assert_eq!(m.mode(), Mode::Scatter);
        // After the window it lands.
        assert!(m.step(&fist(), t0 + ms(600), None).transition.is_some());
        assert_eq!(m.mode(), Mode::Tree);
    }

    #[test]
    fn at_most_one_transition_per_window() {
        let mut m = ModeMachine::new();
        let t0 = Instant::now();
        let mut accepted = 0;
        for i in 0..10 {
            let sig = if i % 2 == 0 { open() } else { fist() };
            if m.step(&sig, t0 + ms(i * 50), None).transition.is_some() {
                accepted += 1;
            }
        }
        // 450 ms of flicker, one accepted transition.
        assert_eq!(accepted, 1);
    }

    #[test]
    fn no_op_gestures_do_not_stamp_the_gate() {
        let mut m = ModeMachine::new();
        let t0 = Instant::now();
        // Fist while already in tree: no transition, gate must stay open.
        m.step(&fist(), t0, None);
        assert!(m.step(&open(), t0 + ms(10), None).transition.is_some());
    }

    #[test]
    fn pinch_without_photo_is_suppressed() {
        let mut m = ModeMachine::new();
        let t0 = Instant::now();
        m.step(&open(), t0, None);
        let out = m.step(&pinch(), t0 + ms(600), None);
        assert_eq!(out.transition, None);
        assert_eq!(m.mode(), Mode::Scatter);
    }

    #[test]
    fn pinch_in_scatter_with_photo_zooms() {
        let mut m = ModeMachine::new();
        let t0 = Instant::now();
        m.step(&open(), t0, None);
        let focus = tree_particles::ParticleId::fresh();
        let out = m.step(&pinch(), t0 + ms(600), Some(focus));
        assert_eq!(
            out.transition,
            Some(Transition { mode: Mode::Zoom, focus: Some(focus) })
        );
        assert_eq!(m.mode(), Mode::Zoom);
    }

    #[test]
    fn pinch_outside_scatter_does_not_zoom() {
        let mut m = ModeMachine::new();
        let focus = tree_particles::ParticleId::fresh();
        let out = m.step(&pinch(), Instant::now(), Some(focus));
        assert_eq!(out.transition, None);
        assert_eq!(m.mode(), Mode::Tree);
    }

    #[test]
    fn tree_and_scatter_transitions_clear_focus() {
        let mut m = ModeMachine::new();
        let t0 = Instant::now();
        m.step(&open(), t0, None);
        let focus = tree_particles::ParticleId::fresh();
        m.step(&pinch(), t0 + ms(600), Some(focus));
        let out = m.step(&fist(), t0 + ms(1200), Some(focus));
        assert_eq!(
            out.transition,
            Some(Transition { mode: Mode::Tree, focus: None })
        );
    }

    #[test]
    fn rotation_updates_every_scatter_frame_despite_gate() {
        let mut m = ModeMachine::new();
        let t0 = Instant::now();
        m.step(&open(), t0, None);
        // Inside the debounce window the rotation still tracks the hand.
        for (i, x) in [(1u64, 0.25f32), (2, -0.5), (3, 1.0)] {
            let out = m.step(&sweep(x), t0 + ms(i * 50), None);
            assert!(out.rotation_changed);
            assert_eq!(m.rotation_target(), x * ROTATION_GAIN);
        }
    }

    #[test]
    fn rotation_untouched_outside_scatter() {
        let mut m = ModeMachine::new();
        let out = m.step(
            &GestureSignal { extended_fingers: 2, is_pinching: false, hand_x: 0.8 },
            Instant::now(),
            None,
        );
        assert!(!out.rotation_changed);
        assert_eq!(m.rotation_target(), 0.0);
    }

    #[test]
    fn force_mode_and_reset() {
        let mut m = ModeMachine::new();
        m.force_mode(Mode::Zoom);
        assert_eq!(m.mode(), Mode::Zoom);
        m.reset();
        assert_eq!(m.mode(), Mode::Tree);
        assert_eq!(m.rotation_target(), 0.0);
    }
}
