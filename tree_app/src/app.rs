//! The main application loop.
//!
//! Two periodic flows share one scene store, both serviced from this single
//! loop: landmark frames arrive over a channel at detection rate and feed
//! the classifier + state machine; the render tick advances the animator and
//! camera at display rate.  Each drain runs to completion before the other,
//! so every transition commits whole — no lock is needed.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use hand_gesture::HandFrame;

use crate::source::{spawn_landmark_source, SimInput};
use crate::state::{SceneConfig, SceneState, UiEvent};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    /// Ornamental particle count.
    pub ornament_count: usize,
    /// Photos preloaded at startup (more can be added with `P`).
    pub photos: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            ornament_count: 150,
            photos: Vec::new(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark source selection
// ════════════════════════════════════════════════════════════════════════════

#[cfg(not(feature = "tracker"))]
fn spawn_source(sim_rx: Receiver<SimInput>) -> Receiver<Option<HandFrame>> {
    spawn_landmark_source(crate::source::SimLandmarkSource { rx: sim_rx })
}

#[cfg(feature = "tracker")]
fn spawn_source(sim_rx: Receiver<SimInput>) -> Receiver<Option<HandFrame>> {
    // Keyboard poses are ignored when a real tracker drives the scene.
    drop(sim_rx);
    spawn_landmark_source(crate::source::TrackerLandmarkSource::from_env())
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer window, the landmark source (keyboard simulation
/// by default, external tracker with `--features tracker`), and drives the
/// event/render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    // ── channels ──────────────────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>();
    let frame_rx = spawn_source(sim_rx);

    // ── visualizer (owns the window and both input senders) ───────────────
    let mut vis = Visualizer::new(sim_tx, ui_tx)?;

    // ── scene ─────────────────────────────────────────────────────────────
    let mut scene = SceneState::new(SceneConfig {
        ornament_count: cfg.ornament_count,
        photos: cfg.photos,
    });

    let start = Instant::now();

    // ── main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → SimInput / UiEvent
        if !vis.poll_input() {
            break;
        }

        // 2. Drain UI events
        loop {
            match ui_rx.try_recv() {
                Ok(UiEvent::Quit) => return Ok(()),
                Ok(UiEvent::AddPhoto) => {
                    let uri = scene.next_photo_uri();
                    scene.add_photo(uri);
                }
                Ok(UiEvent::ManualMode(mode)) => scene.force_mode(mode),
                Ok(UiEvent::Reset) => scene.reset(),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        // 3. Drain detection frames (classifier + state machine).
        //    A starved channel means no hand: nothing changes.
        for frame in frame_rx.try_iter() {
            scene.step_gesture(frame.as_ref(), Instant::now());
        }

        // 4. Render tick: animator then draw
        scene.tick(start.elapsed().as_secs_f32(), vis.camera_eye());
        vis.render(&scene);
    }

    Ok(())
}
