//! Demo mode: generates input so the simulation can play itself
//!
//! Not clever. The actor backs away from the nearest hostile when it gets
//! close, otherwise drifts back toward the middle of the arena, and fires at
//! the nearest hostile every `fire_every` frames.

use glam::Vec2;

use super::input::{Aim, MoveIntent};
use super::state::{GameState, Hostile};
use super::tick::TickInput;

/// Hostiles closer than this make the actor retreat
const DANGER_RADIUS: f32 = 220.0;
/// Offsets smaller than this don't trigger movement on that axis
const DEAD_ZONE: f32 = 40.0;

fn nearest_hostile(state: &GameState) -> Option<&Hostile> {
    let center = state.actor.center();
    state.hostiles.iter().min_by(|a, b| {
        a.center()
            .distance_squared(center)
            .partial_cmp(&b.center().distance_squared(center))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Hold the directions that move along `offset`
fn steer_along(offset: Vec2) -> MoveIntent {
    MoveIntent {
        right: offset.x > DEAD_ZONE,
        left: offset.x < -DEAD_ZONE,
        down: offset.y > DEAD_ZONE,
        up: offset.y < -DEAD_ZONE,
    }
}

/// Input for the next frame in demo mode
pub fn demo_input(state: &GameState, fire_every: u64) -> TickInput {
    let center = state.actor.center();
    let nearest = nearest_hostile(state);

    let movement = match nearest {
        Some(h) if h.center().distance(center) < DANGER_RADIUS => {
            // Scale up so the dead zone doesn't swallow a close threat
            steer_along((center - h.center()) * 4.0)
        }
        _ => steer_along(state.arena() / 2.0 - center),
    };

    let mut fire = Vec::new();
    if let Some(h) = nearest {
        if fire_every > 0 && state.frame.is_multiple_of(fire_every) {
            fire.push(Aim::Point(h.center()));
        }
    }

    TickInput { movement, fire }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{run_ticks, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_no_hostiles_no_fire() {
        let state = GameState::new(1);
        let input = demo_input(&state, 1);
        assert!(input.fire.is_empty());
        // Actor starts centered
        assert_eq!(input.movement, MoveIntent::default());
    }

    #[test]
    fn test_fires_at_nearest() {
        let mut state = GameState::new(1);
        state.spawn_hostile(Vec2::new(900.0, 100.0), 0);
        state.spawn_hostile(Vec2::new(100.0, 100.0), 0);
        let input = demo_input(&state, 1);
        assert_eq!(input.fire.len(), 1);
        let Aim::Point(target) = input.fire[0] else {
            panic!("expected a point aim");
        };
        assert_eq!(target, state.hostiles[1].center());
    }

    #[test]
    fn test_retreats_from_close_hostile() {
        let mut state = GameState::new(1);
        let pos = state.actor.pos + Vec2::new(80.0, 0.0);
        state.spawn_hostile(pos, 0);
        let input = demo_input(&state, 0);
        assert!(input.movement.left);
        assert!(!input.movement.right);
        assert!(input.fire.is_empty());
    }

    #[test]
    fn test_demo_session_runs() {
        let mut tuning = Tuning::default();
        tuning.spawn.rate_ticks = 60;
        let mut state = GameState::with_tuning(9, tuning);
        for _ in 0..2000 {
            if state.is_terminal() {
                break;
            }
            let input = demo_input(&state, 15);
            tick(&mut state, &input);
        }
        run_ticks(&mut state, &TickInput::default(), 10);
        assert!(state.frame > 0);
        assert!(state.hostiles.iter().all(|h| h.health > 0));
    }
}
