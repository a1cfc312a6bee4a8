//! # hand_gesture
//!
//! Turns noisy per-frame hand-landmark coordinates into discrete display-mode
//! transitions and a continuous camera-rotation signal.
//!
//! ## Pipeline
//!
//! ```text
//! landmark source ──▶ classify() ──▶ ModeMachine::step() ──▶ Transition / rotation
//!  (21 points or      GestureSignal   500 ms debounce,
//!   nothing)          per frame       priority rules
//! ```
//!
//! ## Gesture → mode mapping
//!
//! | Gesture | Condition | Mode |
//! |---|---|---|
//! | Fist | ≤ 1 extended finger, not pinching | `Tree` |
//! | Open palm | ≥ 4 extended fingers | `Scatter` |
//! | Pinch | thumb–index tips < 0.05 apart, while scattered | `Zoom` (needs a photo) |
//! | Hand sweep | wrist x while scattered | camera rotation target |

pub mod classify;
pub mod landmark;
pub mod machine;

pub use classify::{classify, GestureSignal, PINCH_THRESHOLD};
pub use landmark::{HandFrame, Landmark};
pub use machine::{ModeMachine, StepOutcome, Transition, DEBOUNCE};
