//! The scene state store — the single mutation surface between the gesture
//! pipeline and the animator/renderer.
//!
//! All mutation flows through the named transition methods here; a mode
//! change and its focus update always commit inside one call, so a reader
//! between frames never observes a half-applied transition.  The store is
//! touched only from the app loop (single writer).

use std::time::Instant;

use glam::Vec3;

use hand_gesture::{classify, HandFrame, ModeMachine};
use tree_particles::{animate, layout, Mode, Particle, ParticleId, ParticleKind};

// ════════════════════════════════════════════════════════════════════════════
// UiEvent — requests from the UI boundary
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// Append one photo and regenerate the population.
    AddPhoto,
    /// Manual mode toggle — the non-gesture fallback.
    ManualMode(Mode),
    /// Back to tree mode, no focus, rotation zeroed.
    Reset,
    /// Close the application.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// SceneConfig
// ════════════════════════════════════════════════════════════════════════════

/// Initial scene parameters.
pub struct SceneConfig {
    /// Ornamental particle count (photos are added on top).
    pub ornament_count: usize,
    /// Photos preloaded at startup.
    pub photos: Vec<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            ornament_count: 150,
            photos: Vec::new(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SceneState
// ════════════════════════════════════════════════════════════════════════════

pub struct SceneState {
    machine:        ModeMachine,
    particles:      Vec<Particle>,
    photos:         Vec<String>,
    focused:        Option<ParticleId>,
    ornament_count: usize,
    photo_serial:   usize,

    // ── status message ────────────────────────────────────────────────────
    pub status: String,
}

impl SceneState {
    pub fn new(cfg: SceneConfig) -> Self {
        let particles = layout::generate(cfg.ornament_count, &cfg.photos, &mut rand::rng());
        let photo_serial = cfg.photos.len();
        SceneState {
            machine: ModeMachine::new(),
            particles,
            photos: cfg.photos,
            focused: None,
            ornament_count: cfg.ornament_count,
            photo_serial,
            status: "Ready — make a fist for the tree, open your hand to scatter".to_string(),
        }
    }

    // ── accessors for the render loop ─────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }
    pub fn rotation_target(&self) -> f32 {
        self.machine.rotation_target()
    }
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
    pub fn photos(&self) -> &[String] {
        &self.photos
    }
    pub fn focused(&self) -> Option<ParticleId> {
        self.focused
    }

    // ── detection tick ────────────────────────────────────────────────────

    /// Feed one detection frame through the classifier and the state machine.
    /// A `None` frame (no hand) changes nothing, including the debounce gate.
    pub fn step_gesture(&mut self, frame: Option<&HandFrame>, now: Instant) {
        let Some(sig) = classify(frame) else { return };
        let candidate = self.first_photo_particle();
        let outcome = self.machine.step(&sig, now, candidate);
        if let Some(t) = outcome.transition {
            // Mode already moved inside the machine; focus commits here, in
            // the same turn, before anything else can observe the scene.
            self.focused = t.focus;
            self.status = match t.mode {
                Mode::Tree    => "FIST — assembling the tree".to_string(),
                Mode::Scatter => "OPEN HAND — scattering; sweep to orbit".to_string(),
                Mode::Zoom    => format!(
                    "PINCH — zooming photo {}",
                    t.focus.map(|id| id.raw()).unwrap_or(0)
                ),
            };
        }
    }

    // ── UI boundary ───────────────────────────────────────────────────────

    /// Append a photo and regenerate the whole population.  Regeneration
    /// invalidates every prior particle id, so the focus is defensively
    /// cleared before the next animator tick can dereference it.
    pub fn add_photo(&mut self, uri: String) {
        self.photos.push(uri.clone());
        self.regenerate();
        self.status = format!("Photo added ({} total): {}", self.photos.len(), uri);
    }

    /// Mint an opaque URI for an uploaded photo.
    pub fn next_photo_uri(&mut self) -> String {
        self.photo_serial += 1;
        format!("photo://upload-{}", self.photo_serial)
    }

    /// Manual mode toggle (camera-free fallback).  Zoom still requires a
    /// photo particle; without one the request is silently dropped, same as
    /// the gesture path.
    pub fn force_mode(&mut self, mode: Mode) {
        let focus = match mode {
            Mode::Zoom => match self.first_photo_particle() {
                Some(id) => Some(id),
                None => {
                    self.status = "Zoom needs a photo — press P to add one".to_string();
                    return;
                }
            },
            _ => None,
        };
        self.machine.force_mode(mode);
        self.focused = focus;
        self.status = format!("Manual mode: {}", mode.name());
    }

    pub fn reset(&mut self) {
        self.machine.reset();
        self.focused = None;
        self.status = "Reset — back to the tree".to_string();
    }

    // ── render tick ───────────────────────────────────────────────────────

    /// Advance every particle's live transform by one render frame.
    pub fn tick(&mut self, elapsed: f32, viewpoint: Vec3) {
        animate::tick(
            &mut self.particles,
            self.machine.mode(),
            self.focused,
            elapsed,
            viewpoint,
        );
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn regenerate(&mut self) {
        self.particles = layout::generate(self.ornament_count, &self.photos, &mut rand::rng());
        self.focused = None;
        log::debug!(
            "population regenerated: {} particles, {} photos",
            self.particles.len(),
            self.photos.len()
        );
    }

    /// Zoom focus policy: the first photo particle in generation order.
    fn first_photo_particle(&self) -> Option<ParticleId> {
        self.particles
            .iter()
            .find(|p| p.kind == ParticleKind::Photo)
            .map(|p| p.id)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
