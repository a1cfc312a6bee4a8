//! # tree_app
//!
//! Gesture-controlled holiday-tree visualizer: a cloud of decorative
//! particles and user-uploaded photos that rearranges between three spatial
//! layouts, driven by hand gestures from a landmark feed.
//!
//! ## Gesture → action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Fist (≤ 1 finger extended) | Assemble the tree |
//! | Open palm (≥ 4 fingers) | Scatter into the floating cloud |
//! | Sweep hand left/right | Orbit the camera (scatter only) |
//! | Pinch (thumb–index) | Zoom the first photo (scatter only, needs a photo) |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keyboard shortcuts synthesize landmark
//!   frames; no camera or tracker needed.
//! * `tracker` — **Tracker mode**: landmark frames stream from an external
//!   hand-landmarker process as JSON lines.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `F` / hold | Fist |
//! | `O` / hold | Open palm |
//! | `G` / hold | Pinch ("grab") |
//! | `←` / `→` | Move the hand (steers the scatter orbit) |
//! | `P` | Upload a photo |
//! | `1` / `2` / `3` | Manual mode toggle (tree / scatter / zoom) |
//! | `R` | Reset |
//! | `Q` | Quit |

pub mod app;
pub mod source;
pub mod state;
pub mod visualizer;
