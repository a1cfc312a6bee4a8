//! Landmark sources — keyboard simulation and the external-tracker bridge.
//!
//! The public interface is one detection frame per message over an `mpsc`
//! channel: `Some(HandFrame)` when a hand is visible, `None` when the
//! detector explicitly reports hand loss.  A starved channel (camera gone,
//! no key held) is equally a no-signal condition; the consumer leaves all
//! state untouched either way.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use hand_gesture::HandFrame;

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for sim and tracker
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver detection frames over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<Option<HandFrame>>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<Option<HandFrame>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
}

/// Simulated pose keys (mapped from minifb keys by the visualizer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    Fist,      // F
    OpenPalm,  // O
    Pinch,     // G
    MoveLeft,  // ←
    MoveRight, // →
}

/// Translates window key events into synthetic landmark frames.
///
/// The simulated wrist x starts centred and is nudged by the arrow keys;
/// arrow movement emits an open-palm frame so the sweep steers the scatter
/// orbit exactly like a real waving hand would.
pub struct SimLandmarkSource {
    pub rx: Receiver<SimInput>,
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<Option<HandFrame>>) {
        let mut wrist_x = 0.5f32;
        for input in self.rx {
            let frame = match input {
                SimInput::KeyDown(SimKey::Fist)     => HandFrame::fist(wrist_x),
                SimInput::KeyDown(SimKey::OpenPalm) => HandFrame::open_palm(wrist_x),
                SimInput::KeyDown(SimKey::Pinch)    => HandFrame::pinch(wrist_x),
                SimInput::KeyDown(SimKey::MoveLeft) => {
                    wrist_x = (wrist_x - 0.02).max(0.0);
                    HandFrame::open_palm(wrist_x)
                }
                SimInput::KeyDown(SimKey::MoveRight) => {
                    wrist_x = (wrist_x + 0.02).min(1.0);
                    HandFrame::open_palm(wrist_x)
                }
            };
            if tx.send(Some(frame)).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TrackerLandmarkSource — external landmarker process (feature = "tracker")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by an external hand-landmarker helper.
///
/// The helper is spawned as a subprocess and prints one JSON object per
/// detection frame on stdout:
///
/// ```json
/// {"landmarks": [[0.41, 0.62, 0.0], ...21 points...]}
/// {"landmarks": null}
/// ```
///
/// `null` landmarks mean no hand this frame.  Malformed lines are skipped.
/// The helper command comes from `TREE_TRACKER_CMD` (default
/// `hand_landmarker`).
#[cfg(feature = "tracker")]
pub struct TrackerLandmarkSource {
    pub command: String,
}

#[cfg(feature = "tracker")]
impl TrackerLandmarkSource {
    pub fn from_env() -> Self {
        TrackerLandmarkSource {
            command: std::env::var("TREE_TRACKER_CMD")
                .unwrap_or_else(|_| "hand_landmarker".to_string()),
        }
    }
}

#[cfg(feature = "tracker")]
impl LandmarkSource for TrackerLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<Option<HandFrame>>) {
        use hand_gesture::Landmark;
        use std::io::{BufRead, BufReader};
        use std::process::{Command, Stdio};

        #[derive(serde::Deserialize)]
        struct TrackerLine {
            landmarks: Option<Vec<[f32; 3]>>,
        }

        let mut child = match Command::new(&self.command)
            .stdout(Stdio::piped())
            .spawn()
        {
            Ok(c) => c,
            Err(e) => {
                log::error!("[tracker] failed to spawn {:?}: {}", self.command, e);
                return;
            }
        };
        let stdout = match child.stdout.take() {
            Some(s) => s,
            None => return,
        };
        log::info!("[tracker] reading landmarks from {:?}", self.command);

        for line in BufReader::new(stdout).lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            let parsed: TrackerLine = match serde_json::from_str(&line) {
                Ok(p) => p,
                Err(e) => {
                    log::debug!("[tracker] skipping malformed line: {}", e);
                    continue;
                }
            };
            let frame = parsed.landmarks.and_then(|pts| {
                if pts.len() != 21 {
                    log::debug!("[tracker] expected 21 landmarks, got {}", pts.len());
                    return None;
                }
                let mut points = [Landmark::default(); 21];
                for (dst, src) in points.iter_mut().zip(&pts) {
                    *dst = Landmark::new(src[0], src[1], src[2]);
                }
                Some(HandFrame::new(points))
            });
            if tx.send(frame).is_err() {
                break;
            }
        }
        let _ = child.kill();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::classify;

    #[test]
    fn sim_source_translates_poses() {
        let (in_tx, in_rx) = mpsc::channel();
        let frame_rx = spawn_landmark_source(SimLandmarkSource { rx: in_rx });

        in_tx.send(SimInput::KeyDown(SimKey::OpenPalm)).unwrap();
        let sig = classify(frame_rx.recv().unwrap().as_ref()).unwrap();
        assert_eq!(sig.extended_fingers, 5);

        in_tx.send(SimInput::KeyDown(SimKey::Fist)).unwrap();
        let sig = classify(frame_rx.recv().unwrap().as_ref()).unwrap();
        assert_eq!(sig.extended_fingers, 0);
        assert!(!sig.is_pinching);

        in_tx.send(SimInput::KeyDown(SimKey::Pinch)).unwrap();
        let sig = classify(frame_rx.recv().unwrap().as_ref()).unwrap();
        assert!(sig.is_pinching);
    }

    #[test]
    fn arrow_keys_move_the_wrist() {
        let (in_tx, in_rx) = mpsc::channel();
        let frame_rx = spawn_landmark_source(SimLandmarkSource { rx: in_rx });

        in_tx.send(SimInput::KeyDown(SimKey::MoveRight)).unwrap();
        let first = classify(frame_rx.recv().unwrap().as_ref()).unwrap().hand_x;
        in_tx.send(SimInput::KeyDown(SimKey::MoveRight)).unwrap();
        let second = classify(frame_rx.recv().unwrap().as_ref()).unwrap().hand_x;
        assert!(second > first);

        for _ in 0..200 {
            in_tx.send(SimInput::KeyDown(SimKey::MoveLeft)).unwrap();
        }
        let mut last = f32::NAN;
        for _ in 0..200 {
            let f = frame_rx.recv().unwrap();
            last = classify(f.as_ref()).unwrap().hand_x;
        }
        // Clamped at the left edge of the image.
        assert_eq!(last, -1.0);
    }

    #[test]
    fn source_stops_when_input_closes() {
        let (in_tx, in_rx) = mpsc::channel::<SimInput>();
        let frame_rx = spawn_landmark_source(SimLandmarkSource { rx: in_rx });
        drop(in_tx);
        assert!(frame_rx.recv().is_err());
    }
}
