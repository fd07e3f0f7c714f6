//! Spring-follow custom cursor.
//!
//! The drawn cursor chases the real pointer through a damped spring, with a
//! hover state that grows and tilts it into a target reticle, and a small
//! trailing accent dot on a fixed-lag tween. Screen coordinates throughout;
//! the host feeds pointer positions and hover flags and reads back the
//! state to draw.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Clamp on the integration step so a long frame cannot destabilize the
/// spring (the frame after a tab switch can be hundreds of ms).
const MAX_STEP: f32 = 1.0 / 30.0;

/// Hover tilt target in radians (45 degrees).
const HOVER_TILT: f32 = std::f32::consts::FRAC_PI_4;
/// Hover scale target.
const HOVER_SCALE: f32 = 1.5;
/// Seconds for the trail dot to close its gap.
const TRAIL_LAG: f32 = 0.1;

fn default_stiffness() -> f32 {
    500.0
}
fn default_damping() -> f32 {
    28.0
}
fn default_mass() -> f32 {
    0.5
}

/// Damped spring tuning shared by every animated cursor property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringParams {
    #[serde(default = "default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
        }
    }
}

impl SpringParams {
    /// One semi-implicit Euler step toward `target`.
    fn step(&self, value: f32, velocity: f32, target: f32, dt: f32) -> (f32, f32) {
        let mass = self.mass.max(1e-4);
        let accel = (self.stiffness * (target - value) - self.damping * velocity) / mass;
        let velocity = velocity + accel * dt;
        (value + velocity * dt, velocity)
    }
}

/// Serializable cursor state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorSnapshot {
    pub position: Vec2,
    pub trail: Vec2,
    pub scale: f32,
    pub tilt: f32,
    pub hovering: bool,
}

/// The animated cursor state machine.
#[derive(Debug, Clone)]
pub struct Cursor {
    params: SpringParams,
    pointer: Vec2,
    position: Vec2,
    velocity: Vec2,
    trail: Vec2,
    scale: f32,
    scale_velocity: f32,
    tilt: f32,
    tilt_velocity: f32,
    hovering: bool,
}

impl Cursor {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            pointer: Vec2::ZERO,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            trail: Vec2::ZERO,
            scale: 1.0,
            scale_velocity: 0.0,
            tilt: 0.0,
            tilt_velocity: 0.0,
            hovering: false,
        }
    }

    /// Latest real pointer position.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
    }

    /// Whether the pointer is over an interactive element.
    pub fn set_hover(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn hovering(&self) -> bool {
        self.hovering
    }

    /// Integrate one frame.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_STEP);
        if dt == 0.0 {
            return;
        }

        let (x, vx) = self
            .params
            .step(self.position.x, self.velocity.x, self.pointer.x, dt);
        let (y, vy) = self
            .params
            .step(self.position.y, self.velocity.y, self.pointer.y, dt);
        self.position = Vec2::new(x, y);
        self.velocity = Vec2::new(vx, vy);

        let scale_target = if self.hovering { HOVER_SCALE } else { 1.0 };
        let tilt_target = if self.hovering { HOVER_TILT } else { 0.0 };
        let (s, sv) = self
            .params
            .step(self.scale, self.scale_velocity, scale_target, dt);
        let (t, tv) = self.params.step(self.tilt, self.tilt_velocity, tilt_target, dt);
        self.scale = s;
        self.scale_velocity = sv;
        self.tilt = t;
        self.tilt_velocity = tv;

        // Fixed-lag tween, not a spring: the accent dot just closes a
        // fraction of its gap each frame.
        let blend = (dt / TRAIL_LAG).min(1.0);
        self.trail += (self.position - self.trail) * blend;
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            trail: self.trail,
            scale: self.scale,
            tilt: self.tilt,
            hovering: self.hovering,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(cursor: &mut Cursor, frames: usize) {
        for _ in 0..frames {
            cursor.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_converges_to_stationary_pointer() {
        let mut cursor = Cursor::default();
        cursor.set_pointer(Vec2::new(320.0, 240.0));
        settle(&mut cursor, 300);

        assert!((cursor.position() - Vec2::new(320.0, 240.0)).length() < 0.5);
    }

    #[test]
    fn test_does_not_diverge_on_long_frames() {
        let mut cursor = Cursor::default();
        cursor.set_pointer(Vec2::new(100.0, 100.0));
        for _ in 0..50 {
            cursor.update(0.5); // clamped internally
        }
        assert!(cursor.position().is_finite());
        assert!((cursor.position() - Vec2::new(100.0, 100.0)).length() < 1.0);
    }

    #[test]
    fn test_hover_grows_and_tilts() {
        let mut cursor = Cursor::default();
        cursor.set_hover(true);
        settle(&mut cursor, 300);

        let snap = cursor.snapshot();
        assert!((snap.scale - HOVER_SCALE).abs() < 0.01);
        assert!((snap.tilt - HOVER_TILT).abs() < 0.01);

        cursor.set_hover(false);
        settle(&mut cursor, 300);
        assert!((cursor.snapshot().scale - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_trail_lags_then_catches_up() {
        let mut cursor = Cursor::default();
        cursor.set_pointer(Vec2::new(200.0, 0.0));
        cursor.update(1.0 / 60.0);

        let snap = cursor.snapshot();
        assert!(snap.trail.x < snap.position.x || snap.position.x == 0.0);

        settle(&mut cursor, 600);
        let snap = cursor.snapshot();
        assert!((snap.trail - snap.position).length() < 0.5);
    }

    #[test]
    fn test_zero_dt_is_a_no_op() {
        let mut cursor = Cursor::default();
        cursor.set_pointer(Vec2::new(50.0, 50.0));
        cursor.update(0.0);
        assert_eq!(cursor.position(), Vec2::ZERO);
    }
}
