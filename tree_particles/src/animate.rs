//! Per-frame particle animation.
//!
//! [`tick`] advances every particle's live transform toward the target
//! dictated by the current mode.  Smoothing is a fixed-α lerp applied once
//! per frame with no delta-time scaling, so convergence speed tracks the
//! frame rate.  Static particle attributes are never touched.

use glam::Vec3;

use crate::particle::{Particle, ParticleId};
use crate::Mode;

// ════════════════════════════════════════════════════════════════════════════
// Tuning constants
// ════════════════════════════════════════════════════════════════════════════

/// Per-frame position smoothing factor.
pub const POS_ALPHA: f32 = 0.05;
/// Per-frame scale smoothing factor.
pub const SCALE_ALPHA: f32 = 0.1;
/// Per-frame rotation relaxation factor in tree mode.
pub const ROT_ALPHA: f32 = 0.05;
/// Continuous spin step per frame outside tree mode (radians).
pub const SPIN_STEP: f32 = 0.005;
/// Amplitude of the scatter-mode vertical float.
pub const FLOAT_AMPLITUDE: f32 = 0.02;
/// How far non-focused particles are pushed outward in zoom mode.
pub const ZOOM_PUSH: f32 = 1.5;
/// Where the focused particle is brought, close to the viewer.
pub const ZOOM_ANCHOR: Vec3 = Vec3::new(0.0, 0.0, 8.0);
/// Fixed magnification of the focused particle.
pub const ZOOM_SCALE: f32 = 5.0;

// ════════════════════════════════════════════════════════════════════════════
// tick
// ════════════════════════════════════════════════════════════════════════════

/// Advance the whole population by one render frame.
///
/// `elapsed` is wall-clock seconds since startup (drives the scatter float);
/// `viewpoint` is the current camera eye, used only to billboard the focused
/// particle in zoom mode.
pub fn tick(
    particles: &mut [Particle],
    mode: Mode,
    focused: Option<ParticleId>,
    elapsed: f32,
    viewpoint: Vec3,
) {
    for p in particles.iter_mut() {
        let focused_here = focused == Some(p.id);
        let (target_pos, target_scale) = target_for(p, mode, focused_here, elapsed);

        p.live.position = p.live.position.lerp(target_pos, POS_ALPHA);
        p.live.scale += (target_scale - p.live.scale) * SCALE_ALPHA;

        match mode {
            // Relax the first axis back to the rest pose; the other axes are
            // deliberately left where the spin last put them.
            Mode::Tree => {
                p.live.rotation.x += (p.base_rotation.x - p.live.rotation.x) * ROT_ALPHA;
            }
            _ => {
                p.live.rotation.x += SPIN_STEP;
                p.live.rotation.y += SPIN_STEP;
            }
        }

        if mode == Mode::Zoom && focused_here {
            p.live.rotation = look_rotation(p.live.position, viewpoint);
        }
    }
}

/// Target position and scale for one particle under the given mode.
fn target_for(p: &Particle, mode: Mode, focused: bool, elapsed: f32) -> (Vec3, f32) {
    match mode {
        Mode::Tree => (p.tree_target, p.visual_scale),
        Mode::Scatter => {
            let mut pos = p.scatter_target;
            pos.y += (elapsed + float_phase(p.id)).sin() * FLOAT_AMPLITUDE;
            (pos, p.visual_scale)
        }
        Mode::Zoom => {
            if focused {
                (ZOOM_ANCHOR, ZOOM_SCALE)
            } else {
                (p.scatter_target * ZOOM_PUSH, p.visual_scale)
            }
        }
    }
}

/// Per-particle phase offset for the scatter float, derived from the id so
/// the cloud doesn't bob in unison.
fn float_phase(id: ParticleId) -> f32 {
    (id.raw() % 97) as f32
}

/// Euler angles (pitch, yaw, 0) that aim a particle at the viewpoint.
fn look_rotation(position: Vec3, viewpoint: Vec3) -> Vec3 {
    let d = viewpoint - position;
    let yaw = d.x.atan2(d.z);
    let pitch = (-d.y).atan2((d.x * d.x + d.z * d.z).sqrt());
    Vec3::new(pitch, yaw, 0.0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
