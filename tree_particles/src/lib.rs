//! # tree_particles
//!
//! Pure core of the gesture-controlled holiday-tree visualizer: the particle
//! data model, the procedural layout generator, and the per-frame animator.
//!
//! The crate is deliberately free of I/O and threads.  A population of
//! [`Particle`]s is generated once (and regenerated wholesale whenever the
//! photo list changes); each particle carries two precomputed spatial targets
//! (tree cone, scatter cloud) plus static visual attributes.  Every render
//! frame [`animate::tick`] advances each particle's live transform toward the
//! target dictated by the current [`Mode`] via fixed-α exponential smoothing.
//!
//! ## Layouts
//!
//! | Mode | Target |
//! |---|---|
//! | `Tree`    | cone-surface point, areal-uniform per height slice |
//! | `Scatter` | uniform cube ±25 with a gentle per-particle float |
//! | `Zoom`    | focused photo at (0, 0, 8) scale 5; everything else pushed out |

pub mod animate;
pub mod layout;
pub mod particle;

pub use particle::{LiveTransform, Particle, ParticleId, ParticleKind};

// ════════════════════════════════════════════════════════════════════════════
// Mode — the discrete display layout state
// ════════════════════════════════════════════════════════════════════════════

/// The scene-wide display mode.  Exactly one is current at any time; all
/// transitions flow through the gesture state machine (or an explicit manual
/// override / reset).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Particles assemble into the cone.
    Tree,
    /// Particles disperse into the floating cloud; hand position steers the
    /// orbital camera.
    Scatter,
    /// One photo particle is promoted to full-screen prominence.
    Zoom,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Tree    => "TREE",
            Mode::Scatter => "SCATTER",
            Mode::Zoom    => "ZOOM",
        }
    }
}
