//! Hand-landmark model.
//!
//! A detected hand is a fixed-size ordered array of 21 normalized 3D points,
//! indexed by the usual hand-landmarker anatomical convention.  Coordinates
//! live in roughly [0, 1] image space with y growing downward; z is depth
//! relative to the wrist and is accepted but unused by the classifier.
//!
//! Synthetic pose constructors are provided for the keyboard-simulation
//! backend (and the classifier tests) — a hand does not need to exist for
//! the rest of the pipeline to run.

// ════════════════════════════════════════════════════════════════════════════
// Anatomical index constants
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// (tip, reference joint) pairs checked by the finger-extension count.
pub const FINGER_PAIRS: [(usize, usize); 5] = [
    (THUMB_TIP, THUMB_IP),
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

// ════════════════════════════════════════════════════════════════════════════
// Landmark / HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One detected 3D keypoint of a tracked hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }
}

/// The 21 landmarks of one hand for one frame.  Ephemeral — recomputed every
/// detection frame, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    pub points: [Landmark; 21],
}

impl HandFrame {
    pub fn new(points: [Landmark; 21]) -> Self {
        HandFrame { points }
    }

    // ── Synthetic poses ───────────────────────────────────────────────────
    //
    // Geometry is schematic: joints at y = 0.5, tips above (extended) or
    // below (curled).  Only the coordinates the classifier reads matter.

    /// All five fingers curled.
    pub fn fist(wrist_x: f32) -> Self {
        let mut f = Self::flat_hand(wrist_x);
        for (tip, joint) in FINGER_PAIRS {
            f.points[tip].y = f.points[joint].y + 0.1; // tip below joint
        }
        // Keep the thumb clear of the index tip so a fist never reads as a pinch.
        f.points[THUMB_TIP].x = wrist_x - 0.1;
        f
    }

    /// All five fingers extended.
    pub fn open_palm(wrist_x: f32) -> Self {
        let mut f = Self::flat_hand(wrist_x);
        for (tip, joint) in FINGER_PAIRS {
            f.points[tip].y = f.points[joint].y - 0.1; // tip above joint
        }
        f
    }

    /// Thumb and index tips touching, other fingers half-curled.
    pub fn pinch(wrist_x: f32) -> Self {
        let mut f = Self::fist(wrist_x);
        // Index extended, thumb tip brought onto it.
        f.points[INDEX_TIP].y = f.points[INDEX_PIP].y - 0.1;
        f.points[THUMB_TIP] = Landmark::new(
            f.points[INDEX_TIP].x + 0.01,
            f.points[INDEX_TIP].y + 0.01,
            0.0,
        );
        f
    }

    /// Neutral skeleton: every joint at y = 0.5, tips level with joints,
    /// x spread a little around the wrist.
    fn flat_hand(wrist_x: f32) -> Self {
        let mut points = [Landmark::default(); 21];
        for (i, p) in points.iter_mut().enumerate() {
            *p = Landmark::new(wrist_x + i as f32 * 0.02, 0.5, 0.0);
        }
        points[WRIST] = Landmark::new(wrist_x, 0.7, 0.0);
        HandFrame { points }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_pairs_cover_all_five_fingers() {
        assert_eq!(FINGER_PAIRS.len(), 5);
        for (tip, joint) in FINGER_PAIRS {
            assert!(tip < 21 && joint < 21);
            assert!(tip > joint);
        }
    }

    #[test]
    fn open_palm_tips_above_joints() {
        let f = HandFrame::open_palm(0.5);
        for (tip, joint) in FINGER_PAIRS {
            assert!(f.points[tip].y < f.points[joint].y);
        }
    }

    #[test]
    fn fist_tips_below_joints() {
        let f = HandFrame::fist(0.5);
        for (tip, joint) in FINGER_PAIRS {
            assert!(f.points[tip].y > f.points[joint].y);
        }
    }

    #[test]
    fn pinch_tips_touch() {
        let f = HandFrame::pinch(0.5);
        let t = f.points[THUMB_TIP];
        let i = f.points[INDEX_TIP];
        let d = ((t.x - i.x).powi(2) + (t.y - i.y).powi(2)).sqrt();
        assert!(d < 0.05);
    }

    #[test]
    fn wrist_x_is_respected() {
        assert_eq!(HandFrame::open_palm(0.25).points[WRIST].x, 0.25);
    }
}
