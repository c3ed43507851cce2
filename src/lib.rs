//! Horde Arena - a 2D arena survival simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, steering, spawning)
//! - `tuning`: Data-driven game balance
//! - `error`: Errors for the fallible edges (config and snapshot decoding)
//!
//! Drawing, input capture and frame scheduling are left to the host; the
//! simulation only consumes a [`sim::TickInput`] per frame and exposes a
//! [`sim::RenderFrame`] view of its state.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use tuning::{Tuning, TuningPreset};

use glam::Vec2;

/// Canonical tuning values. `Tuning::default()` is built from these.
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1024.0;
    pub const ARENA_HEIGHT: f32 = 576.0;

    /// Actor (player) defaults
    pub const ACTOR_EXTENT: f32 = 50.0;
    pub const ACTOR_STARTING_HEALTH: i32 = 5;
    pub const ACTOR_ACCELERATION: f32 = 1.0;
    pub const ACTOR_FRICTION: f32 = 0.4;
    pub const ACTOR_MAX_SPEED: f32 = 15.0;
    pub const ACTOR_WALL_RESTITUTION: f32 = 1.0;

    /// Hostile defaults
    pub const HOSTILE_EXTENT: f32 = 50.0;
    pub const HOSTILE_STARTING_HEALTH: i32 = 1;
    pub const HOSTILE_FRICTION: f32 = 0.1;
    /// 0.9x the actor's top speed
    pub const HOSTILE_MAX_SPEED: f32 = ACTOR_MAX_SPEED * 0.9;
    pub const HOSTILE_WALL_RESTITUTION: f32 = 0.75;
    /// Ticks a fresh hostile stands still after spawning (1s at 60 Hz)
    pub const HOSTILE_GRACE_TICKS: u64 = 60;
    pub const CONTACT_COOLDOWN_TICKS: u32 = 15;

    /// Steering
    pub const AVOID_RADIUS: f32 = 100.0;
    pub const SEPARATION_FORCE: f32 = 0.2;
    pub const PREDICTION_TICKS: f32 = 15.0;
    pub const FOLLOW_FORCE: f32 = 0.3;

    /// Hostile-hostile collisions
    pub const COLLISION_RESTITUTION: f32 = 1.0;
    pub const COLLISION_COOLDOWN_TICKS: u32 = 15;
    pub const SEPARATING_COOLDOWN_TICKS: u32 = 10;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    pub const PROJECTILE_COLOR: u32 = 0xFF_FF_FF;

    /// Spawning (4 seconds at 60 Hz)
    pub const SPAWN_RATE_TICKS: u64 = 240;
    pub const SPAWN_WALL_BUFFER: f32 = 10.0;
    /// Minimum actor distance as a fraction of arena width
    pub const SPAWN_MIN_ACTOR_DISTANCE_FRACTION: f32 = 0.3;
    /// Added to the hostile extent for the minimum hostile-hostile spacing
    pub const SPAWN_SEPARATION_PADDING: f32 = 20.0;
    pub const SPAWN_MAX_ATTEMPTS: u32 = 100;

    /// Timers (12s and 24s at 60 Hz)
    pub const DESPAWN_INTERVAL_TICKS: u64 = 720;
    pub const LIFE_GAIN_INTERVAL_TICKS: u64 = 1440;
}

/// Center of a square body given its top-left corner and side length
#[inline]
pub fn circle_center(top_left: Vec2, extent: f32) -> Vec2 {
    top_left + Vec2::splat(extent / 2.0)
}

/// Unit direction for an aim angle (radians, screen coordinates: +y is down)
#[inline]
pub fn aim_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_circle_center() {
        let c = circle_center(Vec2::new(10.0, 20.0), 50.0);
        assert_eq!(c, Vec2::new(35.0, 45.0));
    }

    #[test]
    fn test_aim_direction_points_down() {
        let d = aim_direction(FRAC_PI_2);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
    }
}
