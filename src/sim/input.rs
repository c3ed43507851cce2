//! Player intent consumed by the simulation
//!
//! Hosts translate raw keyboard/pointer events into these types. Unknown
//! keys are ignored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Held movement directions. Opposite directions may be held together and
/// cancel out; perpendicular ones combine into diagonal movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Velocity added this tick (screen coordinates, +y is down)
    pub fn acceleration(&self, amount: f32) -> Vec2 {
        let mut accel = Vec2::ZERO;
        if self.right {
            accel.x += amount;
        }
        if self.left {
            accel.x -= amount;
        }
        if self.down {
            accel.y += amount;
        }
        if self.up {
            accel.y -= amount;
        }
        accel
    }

    /// Update from a key event. Returns false for keys that don't map to a
    /// direction, leaving the intent unchanged.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        let flag = match key {
            "w" | "W" | "ArrowUp" => &mut self.up,
            "s" | "S" | "ArrowDown" => &mut self.down,
            "a" | "A" | "ArrowLeft" => &mut self.left,
            "d" | "D" | "ArrowRight" => &mut self.right,
            _ => return false,
        };
        *flag = pressed;
        true
    }
}

/// Where a shot is aimed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Aim {
    /// Angle in radians (screen coordinates, 0 = right, PI/2 = down)
    Angle(f32),
    /// A point in arena coordinates; the shot travels from the actor's
    /// center toward it
    Point(Vec2),
}

impl Aim {
    /// Unit direction from `origin`, or `None` if the aim gives no direction
    pub fn direction(&self, origin: Vec2) -> Option<Vec2> {
        match *self {
            Aim::Angle(angle) => angle.is_finite().then(|| crate::aim_direction(angle)),
            Aim::Point(target) => (target - origin).try_normalize(),
        }
    }
}
