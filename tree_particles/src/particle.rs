//! The particle data model.
//!
//! A [`Particle`] is one renderable element of the scene.  Everything except
//! [`Particle::live`] is fixed at generation time; the live transform is
//! mutated once per render frame by the animator and read by the renderer.

use glam::Vec3;
use std::sync::atomic::{AtomicU64, Ordering};

// ════════════════════════════════════════════════════════════════════════════
// Palette — ARGB, matching the framebuffer convention
// ════════════════════════════════════════════════════════════════════════════

pub const MATTE_GREEN:    u32 = 0xFF0F3B1E;
pub const GOLD:           u32 = 0xFFFFD700;
pub const DEEP_RED:       u32 = 0xFF8A0303;
pub const ORNAMENT_WHITE: u32 = 0xFFF0F0F0;

// ════════════════════════════════════════════════════════════════════════════
// ParticleId
// ════════════════════════════════════════════════════════════════════════════

/// Stable unique particle identity.
///
/// Ids come from a process-wide counter, so regenerating a population never
/// reuses an id from an earlier one — a focus reference held across a
/// regeneration can only ever dangle, never silently rebind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl ParticleId {
    /// Allocate a fresh id.
    pub fn fresh() -> Self {
        ParticleId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ParticleKind
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// A bauble — matte green by default, white for the ornament variant.
    OrnamentSphere,
    /// A gold cube accent.
    AccentCube,
    /// A red candy cane.
    CandyCane,
    /// A user-supplied photo in a gold frame.
    Photo,
}

// ════════════════════════════════════════════════════════════════════════════
// LiveTransform — the only mutable per-frame state
// ════════════════════════════════════════════════════════════════════════════

/// Position, Euler rotation, and uniform scale as currently displayed.
/// Owned by the animator; read-only everywhere else.
#[derive(Clone, Copy, Debug)]
pub struct LiveTransform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale:    f32,
}

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

/// One decorative or photo element.
///
/// `tree_target` lies on the cone-surface distribution, `scatter_target` in
/// the uniform scatter cube.  `base_rotation` is the rest pose the first
/// rotation axis relaxes back to in tree mode.
#[derive(Clone, Debug)]
pub struct Particle {
    pub id:             ParticleId,
    pub kind:           ParticleKind,
    pub color:          u32,
    /// Base scale factor used as the target scale outside zoom focus.
    pub visual_scale:   f32,
    pub base_rotation:  Vec3,
    pub tree_target:    Vec3,
    pub scatter_target: Vec3,
    /// Opaque photo reference; present iff `kind == Photo`.
    pub photo:          Option<String>,
    pub live:           LiveTransform,
}

impl Particle {
    pub fn is_photo(&self) -> bool {
        self.kind == ParticleKind::Photo
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
