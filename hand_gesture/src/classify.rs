//! Pure gesture classification.
//!
//! [`classify`] maps one landmark frame (or its absence) to a
//! [`GestureSignal`].  It keeps no memory of prior frames; debouncing and
//! hysteresis live in the state machine, not here.
//!
//! The extension heuristic is deliberately simple geometry: a finger counts
//! as extended when its tip sits above its reference joint in image space
//! (smaller y is higher).  No handedness or mirroring correction is applied.

use crate::landmark::{HandFrame, FINGER_PAIRS, INDEX_TIP, THUMB_TIP, WRIST};

/// Thumb–index tip distance (2D, normalized units) below which the hand
/// counts as pinching.
pub const PINCH_THRESHOLD: f32 = 0.05;

// ════════════════════════════════════════════════════════════════════════════
// GestureSignal
// ════════════════════════════════════════════════════════════════════════════

/// The discrete gesture reading for one detection frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSignal {
    /// How many fingers read as extended, 0–5.
    pub extended_fingers: u8,
    /// Thumb and index tips close enough to count as a pinch.
    pub is_pinching: bool,
    /// Wrist x remapped from [0, 1] to [−1, 1].
    pub hand_x: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one frame.  `None` in, `None` out: when no hand was detected the
/// caller must leave all downstream state untouched.
pub fn classify(frame: Option<&HandFrame>) -> Option<GestureSignal> {
    let frame = frame?;
    let pts = &frame.points;

    let mut extended_fingers = 0u8;
    for (tip, joint) in FINGER_PAIRS {
        if pts[tip].y < pts[joint].y {
            extended_fingers += 1;
        }
    }

    // Pinch uses the 2D image-plane distance; depth is too noisy to help.
    let dx = pts[THUMB_TIP].x - pts[INDEX_TIP].x;
    let dy = pts[THUMB_TIP].y - pts[INDEX_TIP].y;
    let is_pinching = (dx * dx + dy * dy).sqrt() < PINCH_THRESHOLD;

    let hand_x = (pts[WRIST].x - 0.5) * 2.0;

    Some(GestureSignal {
        extended_fingers,
        is_pinching,
        hand_x,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Landmark;

    #[test]
    fn no_frame_yields_no_signal() {
        assert_eq!(classify(None), None);
    }

    #[test]
    fn open_palm_counts_five() {
        let sig = classify(Some(&HandFrame::open_palm(0.5))).unwrap();
        assert_eq!(sig.extended_fingers, 5);
    }

    #[test]
    fn fist_counts_zero_and_does_not_pinch() {
        let sig = classify(Some(&HandFrame::fist(0.5))).unwrap();
        assert_eq!(sig.extended_fingers, 0);
        assert!(!sig.is_pinching);
    }

    #[test]
    fn pinch_is_detected() {
        let sig = classify(Some(&HandFrame::pinch(0.5))).unwrap();
        assert!(sig.is_pinching);
    }

    #[test]
    fn pinch_threshold_is_strict() {
        // Tips exactly at the threshold distance must not count.
        let mut f = HandFrame::open_palm(0.3);
        f.points[THUMB_TIP] = Landmark::new(0.5, 0.5, 0.0);
        f.points[INDEX_TIP] = Landmark::new(0.5 + PINCH_THRESHOLD, 0.5, 0.0);
        assert!(!classify(Some(&f)).unwrap().is_pinching);

        f.points[INDEX_TIP].x = 0.5 + PINCH_THRESHOLD * 0.9;
        assert!(classify(Some(&f)).unwrap().is_pinching);
    }

    #[test]
    fn hand_x_remaps_to_signed_range() {
        let at = |x: f32| classify(Some(&HandFrame::open_palm(x))).unwrap().hand_x;
        assert!((at(0.5) - 0.0).abs() < 1e-6);
        assert!((at(0.0) - -1.0).abs() < 1e-6);
        assert!((at(1.0) - 1.0).abs() < 1e-6);
        assert!((at(0.75) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn classification_is_deterministic() {
        let f = HandFrame::pinch(0.42);
        let a = classify(Some(&f)).unwrap();
        for _ in 0..10 {
            assert_eq!(classify(Some(&f)).unwrap(), a);
        }
    }
}
