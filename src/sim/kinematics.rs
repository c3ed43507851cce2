//! Velocity shaping and wall bounce for square bodies
//!
//! Speed limits are per axis, not per vector: a body moving diagonally can
//! reach up to sqrt(2) times the nominal cap.

use glam::Vec2;

use crate::tuning::Friction;

/// Apply friction independently to each axis
#[inline]
pub fn apply_friction(vel: Vec2, friction: Friction) -> Vec2 {
    Vec2::new(friction.apply(vel.x), friction.apply(vel.y))
}

/// Clamp each axis to `[-max_speed, max_speed]`
#[inline]
pub fn clamp_axes(vel: Vec2, max_speed: f32) -> Vec2 {
    Vec2::new(
        vel.x.clamp(-max_speed, max_speed),
        vel.y.clamp(-max_speed, max_speed),
    )
}

/// Reflect any axis whose next step would touch or cross a wall
///
/// Uses the about-to-be-applied velocity: if `pos + vel` puts the near edge at
/// or past 0, or the far edge at or past the arena bound, that axis is
/// inverted and scaled by `restitution`. Position is never clamped, so a body
/// may sit slightly outside the arena for a frame before the reflected
/// velocity brings it back.
pub fn bounce_walls(pos: Vec2, vel: Vec2, extent: f32, arena: Vec2, restitution: f32) -> Vec2 {
    let mut vel = vel;
    let next = pos + vel;
    if next.x <= 0.0 || next.x + extent >= arena.x {
        vel.x *= -restitution;
    }
    if next.y <= 0.0 || next.y + extent >= arena.y {
        vel.y *= -restitution;
    }
    vel
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARENA: Vec2 = Vec2::new(1024.0, 576.0);

    #[test]
    fn test_bounce_left_wall() {
        let vel = bounce_walls(Vec2::new(2.0, 100.0), Vec2::new(-3.0, 1.0), 50.0, ARENA, 0.75);
        assert!((vel.x - 2.25).abs() < 1e-6);
        assert_eq!(vel.y, 1.0);
    }

    #[test]
    fn test_bounce_bottom_wall() {
        let vel = bounce_walls(Vec2::new(100.0, 520.0), Vec2::new(0.0, 6.0), 50.0, ARENA, 1.0);
        assert_eq!(vel.y, -6.0);
    }

    #[test]
    fn test_no_bounce_in_open_field() {
        let vel = Vec2::new(4.0, -4.0);
        assert_eq!(bounce_walls(Vec2::new(400.0, 200.0), vel, 50.0, ARENA, 0.75), vel);
    }

    #[test]
    fn test_stationary_body_touching_wall_still_flips() {
        // Position 0 counts as touching; a zero velocity stays zero
        let vel = bounce_walls(Vec2::new(0.0, 100.0), Vec2::ZERO, 50.0, ARENA, 0.75);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_diagonal_exceeds_nominal_cap() {
        let vel = clamp_axes(Vec2::new(40.0, 40.0), 15.0);
        assert_eq!(vel, Vec2::new(15.0, 15.0));
        assert!(vel.length() > 15.0);
    }

    #[test]
    fn test_friction_per_axis() {
        let vel = apply_friction(Vec2::new(1.0, -0.05), Friction::Decrement(0.1));
        assert!((vel.x - 0.9).abs() < 1e-6);
        assert_eq!(vel.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_clamp_holds_per_axis(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            max in 0.0f32..50.0,
        ) {
            let v = clamp_axes(Vec2::new(x, y), max);
            prop_assert!(v.x.abs() <= max);
            prop_assert!(v.y.abs() <= max);
        }

        #[test]
        fn prop_bounce_never_increases_speed(
            px in -20.0f32..1044.0,
            py in -20.0f32..596.0,
            vx in -30.0f32..30.0,
            vy in -30.0f32..30.0,
            restitution in 0.0f32..=1.0,
        ) {
            let v = bounce_walls(Vec2::new(px, py), Vec2::new(vx, vy), 50.0, ARENA, restitution);
            prop_assert!(v.x.abs() <= vx.abs());
            prop_assert!(v.y.abs() <= vy.abs());
        }

        #[test]
        fn prop_decrement_friction_moves_toward_zero(v in -50.0f32..50.0, amount in 0.0f32..2.0) {
            let out = Friction::Decrement(amount).apply(v);
            prop_assert!(out.abs() <= v.abs());
            prop_assert!(out == 0.0 || out.signum() == v.signum());
        }
    }
}
