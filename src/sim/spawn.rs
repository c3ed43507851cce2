//! Hostile spawn placement
//!
//! Bounded rejection sampling: draw candidate positions inside the arena
//! (inset by the wall buffer and the hostile's extent) until one is far
//! enough from the actor and from every existing hostile, or the attempt cap
//! runs out. Exhausting the cap means no spawn this time, never a spawn at an
//! invalid spot.

use glam::Vec2;
use rand::Rng;

use super::state::{Actor, Hostile};
use crate::circle_center;
use crate::tuning::Tuning;

/// A validated spawn position and how many draws it took
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    /// Top-left corner of the new hostile
    pub pos: Vec2,
    pub attempts: u32,
}

/// Draw one candidate top-left position, floored to whole units
fn draw_candidate<R: Rng + ?Sized>(rng: &mut R, span: Vec2, buffer: f32) -> Vec2 {
    let x = (rng.random::<f32>() * span.x + buffer).floor();
    let y = (rng.random::<f32>() * span.y + buffer).floor();
    Vec2::new(x, y)
}

/// Is `center` far enough from the actor and every hostile?
pub fn is_valid_spawn(center: Vec2, actor: &Actor, hostiles: &[Hostile], tuning: &Tuning) -> bool {
    if center.distance(actor.center()) < tuning.spawn_min_actor_distance() {
        return false;
    }
    let min_separation = tuning.spawn_min_separation();
    hostiles
        .iter()
        .all(|h| center.distance(h.center()) >= min_separation)
}

/// Find a spawn position for a new hostile, or `None` if the attempt cap is
/// exhausted
pub fn plan_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    actor: &Actor,
    hostiles: &[Hostile],
) -> Option<SpawnPlan> {
    let extent = tuning.hostile.extent;
    let buffer = tuning.spawn.wall_buffer;
    let span = Vec2::new(
        tuning.arena.width - extent - 2.0 * buffer,
        tuning.arena.height - extent - 2.0 * buffer,
    );
    if span.x <= 0.0 || span.y <= 0.0 {
        log::warn!("Arena too small to spawn a hostile of extent {extent}");
        return None;
    }

    for attempt in 1..=tuning.spawn.max_attempts {
        let pos = draw_candidate(rng, span, buffer);
        if is_valid_spawn(circle_center(pos, extent), actor, hostiles, tuning) {
            return Some(SpawnPlan {
                pos,
                attempts: attempt,
            });
        }
    }

    log::debug!(
        "No valid spawn position after {} attempts ({} hostiles)",
        tuning.spawn.max_attempts,
        hostiles.len()
    );
    None
}

/// Cosmetic hostile colour: a random shade of red
pub fn hostile_color<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let red = (rng.random::<f32>() * 255.0).floor() as u32;
    red << 16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::HostileTuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Tuning, Actor) {
        let tuning = Tuning::default();
        let actor = Actor::new(
            1,
            &tuning.actor,
            Vec2::new(tuning.arena.width, tuning.arena.height),
        );
        (tuning, actor)
    }

    #[test]
    fn test_plan_respects_bounds_and_actor_distance() {
        let (tuning, actor) = setup();
        let mut rng = Pcg32::seed_from_u64(42);
        let plan = plan_spawn(&mut rng, &tuning, &actor, &[]).unwrap();
        assert!(plan.pos.x >= 10.0 && plan.pos.x + 50.0 <= 1024.0 - 10.0);
        assert!(plan.pos.y >= 10.0 && plan.pos.y + 50.0 <= 576.0 - 10.0);
        assert!(circle_center(plan.pos, 50.0).distance(actor.center()) >= 307.2);
        assert_eq!(plan.pos, plan.pos.floor());
    }

    #[test]
    fn test_impossible_distance_gives_up() {
        let (mut tuning, actor) = setup();
        // Nothing in a 1024x576 arena is 2048 units from its center
        tuning.spawn.min_actor_distance_fraction = 2.0;
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(plan_spawn(&mut rng, &tuning, &actor, &[]).is_none());
    }

    #[test]
    fn test_crowded_arena_gives_up() {
        let (mut tuning, actor) = setup();
        tuning.spawn.min_actor_distance_fraction = 0.0;
        // Huge padding: any existing hostile blocks the whole arena
        tuning.spawn.separation_padding = 2000.0;
        let blocker = Hostile::new(9, Vec2::new(0.0, 0.0), &HostileTuning::default(), 1, 0, 0);
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(plan_spawn(&mut rng, &tuning, &actor, &[blocker]).is_none());
    }

    #[test]
    fn test_color_is_red_only() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..32 {
            let c = hostile_color(&mut rng);
            assert_eq!(c & 0x00FF_FF, 0);
            assert!(c >> 16 < 255);
        }
    }

    proptest! {
        #[test]
        fn prop_plan_never_violates_spacing(
            seed in any::<u64>(),
            others in prop::collection::vec((10.0f32..964.0, 10.0f32..516.0), 0..8),
        ) {
            let (tuning, actor) = setup();
            let hostiles: Vec<Hostile> = others
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| {
                    Hostile::new(10 + i as u32, Vec2::new(x, y), &tuning.hostile, 1, 0, 0)
                })
                .collect();
            let mut rng = Pcg32::seed_from_u64(seed);
            if let Some(plan) = plan_spawn(&mut rng, &tuning, &actor, &hostiles) {
                let center = circle_center(plan.pos, tuning.hostile.extent);
                prop_assert!(center.distance(actor.center()) >= tuning.spawn_min_actor_distance());
                for h in &hostiles {
                    prop_assert!(center.distance(h.center()) >= tuning.spawn_min_separation());
                }
                prop_assert!(plan.attempts <= tuning.spawn.max_attempts);
            }
        }
    }
}
