//! Software-rendered visualizer using `minifb`.
//!
//! Particles are projected through a perspective camera and painted back to
//! front; each kind gets its own primitive:
//!
//! ```text
//! ornament sphere  →  filled disc
//! accent cube      →  filled square with border
//! candy cane       →  red bar with a white stripe
//! photo            →  gold-framed rect (marker ring when focused)
//! ```
//!
//! The camera rig lives here too: per-mode eye anchors, with the scatter
//! orbit steered by the state machine's free-running rotation target.

use std::sync::mpsc::Sender;

use glam::{Mat4, Vec3, Vec4};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use tree_particles::{Mode, Particle, ParticleKind};

use crate::source::{SimInput, SimKey};
use crate::state::{SceneState, UiEvent};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 960;
pub const WIN_H: usize = 720;
const STATUS_Y: usize = WIN_H - 36;
const BG_COLOR: u32 = 0xFF020403; // near-black green
const HUD_BG:   u32 = 0xFF0F3460;
const GOLD:     u32 = 0xFFFFD700;
const STAR_DIM: u32 = 0xFF404048;

const FOV_Y_DEG: f32 = 50.0;
const NEAR: f32 = 0.1;
const FAR:  f32 = 200.0;

// ════════════════════════════════════════════════════════════════════════════
// CameraRig — per-mode eye anchors, scatter orbit
// ════════════════════════════════════════════════════════════════════════════

const ORBIT_RADIUS: f32 = 25.0;
const ORBIT_HEIGHT: f32 = 5.0;
const TREE_EYE: Vec3 = Vec3::new(0.0, 0.0, 30.0);
const ZOOM_EYE: Vec3 = Vec3::new(0.0, 0.0, 20.0);
const CAM_ALPHA: f32 = 0.05;

/// Smoothed camera state.  The rotation target is a free scalar; wrapping
/// happens here, trigonometrically, when it becomes an orbital position.
pub struct CameraRig {
    rotation: f32,
    eye:      Vec3,
}

impl CameraRig {
    pub fn new() -> Self {
        CameraRig {
            rotation: 0.0,
            eye:      TREE_EYE,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Advance one frame toward the mode's anchor.
    pub fn tick(&mut self, mode: Mode, rotation_target: f32) {
        let anchor = match mode {
            Mode::Scatter => {
                self.rotation += (rotation_target - self.rotation) * CAM_ALPHA;
                Vec3::new(
                    self.rotation.sin() * ORBIT_RADIUS,
                    ORBIT_HEIGHT,
                    self.rotation.cos() * ORBIT_RADIUS,
                )
            }
            Mode::Tree => TREE_EYE,
            Mode::Zoom => ZOOM_EYE,
        };
        self.eye = self.eye.lerp(anchor, CAM_ALPHA);
    }

    fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(
            FOV_Y_DEG.to_radians(),
            WIN_W as f32 / WIN_H as f32,
            NEAR,
            FAR,
        );
        let view = Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y);
        proj * view
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    sim_tx: Sender<SimInput>,
    ui_tx:  Sender<UiEvent>,
    rig:    CameraRig,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>, ui_tx: Sender<UiEvent>) -> Result<Self, String> {
        let mut window = Window::new(
            "Holiday Tree — Gesture Particles",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            ui_tx,
            rig: CameraRig::new(),
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Current camera eye — handed to the animator for billboarding.
    pub fn camera_eye(&self) -> Vec3 {
        self.rig.eye()
    }

    /// Poll keyboard input, translating pose keys to SimInput and UI keys to
    /// UiEvents.  Returns false on quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }

        let one_shot = |w: &Window, k: Key| w.is_key_pressed(k, KeyRepeat::No);
        let held     = |w: &Window, k: Key| w.is_key_pressed(k, KeyRepeat::Yes);

        if one_shot(&self.window, Key::Q) {
            let _ = self.ui_tx.send(UiEvent::Quit);
            return false;
        }
        if one_shot(&self.window, Key::P) {
            let _ = self.ui_tx.send(UiEvent::AddPhoto);
        }
        if one_shot(&self.window, Key::R) {
            let _ = self.ui_tx.send(UiEvent::Reset);
        }
        if one_shot(&self.window, Key::Key1) {
            let _ = self.ui_tx.send(UiEvent::ManualMode(Mode::Tree));
        }
        if one_shot(&self.window, Key::Key2) {
            let _ = self.ui_tx.send(UiEvent::ManualMode(Mode::Scatter));
        }
        if one_shot(&self.window, Key::Key3) {
            let _ = self.ui_tx.send(UiEvent::ManualMode(Mode::Zoom));
        }

        // Pose keys repeat while held — each repeat is one detection frame.
        for (key, pose) in [
            (Key::F, SimKey::Fist),
            (Key::O, SimKey::OpenPalm),
            (Key::G, SimKey::Pinch),
            (Key::Left, SimKey::MoveLeft),
            (Key::Right, SimKey::MoveRight),
        ] {
            if held(&self.window, key) {
                let _ = self.sim_tx.send(SimInput::KeyDown(pose));
            }
        }

        true
    }

    // ── Render ────────────────────────────────────────────────────────────

    /// Render one frame.  Advances the camera rig first so the scene reads
    /// one consistent eye per frame.
    pub fn render(&mut self, scene: &SceneState) {
        self.rig.tick(scene.mode(), scene.rotation_target());

        self.buf.fill(BG_COLOR);
        self.draw_stars();

        let vp = self.rig.view_proj();
        let view = Mat4::look_at_rh(self.rig.eye, Vec3::ZERO, Vec3::Y);

        // Painter's algorithm: farthest (most negative view z) first.
        let mut order: Vec<(usize, f32)> = scene
            .particles()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let v = view * p.live.position.extend(1.0);
                (i, v.z)
            })
            .collect();
        order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let focal = (WIN_H as f32 / 2.0) / (FOV_Y_DEG.to_radians() / 2.0).tan();
        for (i, view_z) in order {
            if view_z >= -NEAR {
                continue; // behind the camera
            }
            let p = &scene.particles()[i];
            let Some((sx, sy)) = project(vp, p.live.position) else { continue };
            let radius = (p.live.scale * focal / -view_z).max(1.0);
            let focused = scene.focused() == Some(p.id);
            self.draw_particle(p, sx, sy, radius, focused);
        }

        self.draw_hud(scene);
        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Particle shapes ───────────────────────────────────────────────────

    fn draw_particle(&mut self, p: &Particle, sx: f32, sy: f32, radius: f32, focused: bool) {
        let (x, y, r) = (sx as isize, sy as isize, radius as isize);
        match p.kind {
            ParticleKind::OrnamentSphere => {
                self.fill_circle(x, y, r, p.color);
            }
            ParticleKind::AccentCube => {
                let half = (radius * 0.75) as isize;
                self.fill_rect_signed(x - half, y - half, half * 2, half * 2, p.color);
                self.border_signed(x - half, y - half, half * 2, half * 2, 0xFF000000);
            }
            ParticleKind::CandyCane => {
                // Tall bar with a diagonal-suggesting white stripe.
                let w = (radius * 0.4).max(1.0) as isize;
                let h = (radius * 1.6).max(2.0) as isize;
                self.fill_rect_signed(x - w / 2, y - h / 2, w, h, p.color);
                self.fill_rect_signed(x - w / 2, y - h / 6, w, (h / 5).max(1), 0xFFF0F0F0);
            }
            ParticleKind::Photo => {
                let half = radius as isize;
                // Gold frame around a pale print.
                self.fill_rect_signed(x - half - 2, y - half - 2, half * 2 + 4, half * 2 + 4, GOLD);
                self.fill_rect_signed(x - half, y - half, half * 2, half * 2, 0xFFDDE8DD);
                if focused {
                    self.border_signed(
                        x - half - 5,
                        y - half - 5,
                        half * 2 + 10,
                        half * 2 + 10,
                        0xFFFFFFFF,
                    );
                }
            }
        }
    }

    // ── Background stars ──────────────────────────────────────────────────

    fn draw_stars(&mut self) {
        // Fixed pseudo-random sprinkle; the same sky every frame.
        let mut seed = 0x2545F4914F6CDD1Du64;
        for _ in 0..240 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let x = (seed % WIN_W as u64) as usize;
            let y = ((seed >> 16) % STATUS_Y as u64) as usize;
            self.set_pixel(x, y, STAR_DIM);
        }
    }

    // ── HUD ───────────────────────────────────────────────────────────────

    fn draw_hud(&mut self, scene: &SceneState) {
        // Mode banner
        self.fill_rect(0, 0, WIN_W, 26, HUD_BG);
        let banner = format!(
            "mode: {}   particles: {}   photos: {}   rot: {:.2}",
            scene.mode().name(),
            scene.particles().len(),
            scene.photos().len(),
            scene.rotation_target(),
        );
        self.draw_label(&banner, 10, 9, 0xFFEEEEEE);
        if let Some(id) = scene.focused() {
            let tag = format!("focus: #{}", id.raw());
            self.draw_label(&tag, WIN_W - 120, 9, GOLD);
        }

        // Status bar + key legend
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, HUD_BG);
        self.draw_label(&scene.status, 10, STATUS_Y + 8, 0xFFEEEEEE);
        self.draw_label(
            "F=fist  O=open  G=pinch  arrows=sweep  P=photo  1/2/3=mode  R=reset  Q=quit",
            10,
            WIN_H - 14,
            0xFF888888,
        );
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn fill_rect_signed(&mut self, x: isize, y: isize, w: isize, h: isize, color: u32) {
        for row in y.max(0)..(y + h).min(WIN_H as isize) {
            for col in x.max(0)..(x + w).min(WIN_W as isize) {
                self.buf[row as usize * WIN_W + col as usize] = color;
            }
        }
    }

    fn border_signed(&mut self, x: isize, y: isize, w: isize, h: isize, color: u32) {
        for col in x..x + w {
            self.set_pixel_signed(col, y, color);
            self.set_pixel_signed(col, y + h - 1, color);
        }
        for row in y..y + h {
            self.set_pixel_signed(x, row, color);
            self.set_pixel_signed(x + w - 1, row, color);
        }
    }

    fn fill_circle(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel_signed(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    fn set_pixel_signed(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    /// Minimal bitmap font — 3×5 characters for label rendering.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// Project a world point to screen coordinates; `None` when clipped.
fn project(vp: Mat4, p: Vec3) -> Option<(f32, f32)> {
    let clip: Vec4 = vp * p.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    if ndc_x.abs() > 1.2 || ndc_y.abs() > 1.2 {
        return None; // off screen with margin for partially visible shapes
    }
    Some((
        (ndc_x + 1.0) * 0.5 * WIN_W as f32,
        (1.0 - ndc_y) * 0.5 * WIN_H as f32,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '#' => [0b101, 0b111, 0b101, 0b111, 0b101],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
