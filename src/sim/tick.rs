//! Per-frame simulation tick
//!
//! One call advances the session by exactly one frame. Order within a frame:
//!
//! 1. queued shots are fired
//! 2. actor moves by last frame's velocity
//! 3. projectiles move, off-field ones are dropped
//! 4. hostiles update in reverse index order (hits, steering, contact,
//!    motion, pairwise collisions against higher indices, death)
//! 5. despawn and life-gain timers
//! 6. actor friction, input, speed cap and wall bounce
//! 7. spawn attempt on the spawn cadence
//! 8. clock advance and terminal check

use glam::Vec2;

use super::collision::{projectile_hits, resolve_contact, resolve_pair};
use super::input::{Aim, MoveIntent};
use super::kinematics::{apply_friction, bounce_walls, clamp_axes};
use super::spawn::{hostile_color, plan_spawn};
use super::state::{GameEvent, GamePhase, GameState, Projectile};
use super::steering::steer;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Currently held movement directions
    pub movement: MoveIntent,
    /// Shots fired since the previous tick, one projectile each
    pub fire: Vec<Aim>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Nothing changes once the actor is down
    if state.phase == GamePhase::Terminal {
        return;
    }

    for aim in &input.fire {
        fire(state, *aim);
    }

    state.actor.integrate();
    update_projectiles(state);
    update_hostiles(state);
    run_timers(state);

    let arena = state.arena();
    state
        .actor
        .apply_controls(input.movement, &state.tuning.actor, arena);

    if state.frame.is_multiple_of(state.tuning.spawn.rate_ticks) {
        try_spawn(state);
    }

    state.frame += 1;

    if state.actor.health <= 0 {
        state.phase = GamePhase::Terminal;
        state.events.push(GameEvent::GameOver { frame: state.frame });
        log::info!(
            "Game over at frame {} ({} hostiles on field)",
            state.frame,
            state.hostiles.len()
        );
    }
}

/// Fire one projectile from the actor's center. Aims without a direction
/// are dropped.
pub fn fire(state: &mut GameState, aim: Aim) -> Option<u32> {
    let origin = state.actor.center();
    let Some(dir) = aim.direction(origin) else {
        log::debug!("Ignoring shot with no direction: {aim:?}");
        return None;
    };
    let id = state.next_entity_id();
    state
        .projectiles
        .push(Projectile::new(id, origin, dir, &state.tuning.projectile));
    Some(id)
}

fn update_projectiles(state: &mut GameState) {
    let arena = state.arena();
    for index in (0..state.projectiles.len()).rev() {
        let projectile = &mut state.projectiles[index];
        projectile.pos += projectile.vel;
        if projectile.is_off_field(arena) {
            state.projectiles.remove(index);
        }
    }
}

/// Update every hostile, back to front so removal never skips an element.
/// Pairwise collisions only look at higher indices, so each unordered pair
/// is resolved at most once per frame.
fn update_hostiles(state: &mut GameState) {
    let arena = state.arena();
    let frame = state.frame;
    let GameState {
        hostiles,
        projectiles,
        actor,
        tuning,
        events,
        last_despawn_tick,
        ..
    } = state;

    for index in (0..hostiles.len()).rev() {
        let dead = {
            let (before, rest) = hostiles.split_at_mut(index);
            let Some((hostile, after)) = rest.split_first_mut() else {
                continue;
            };

            // Shots land before the hostile moves
            for p in (0..projectiles.len()).rev() {
                if projectile_hits(&projectiles[p], hostile) {
                    hostile.health -= 1;
                    let projectile = projectiles.remove(p);
                    events.push(GameEvent::HostileShot {
                        hostile_id: hostile.id,
                        projectile_id: projectile.id,
                    });
                }
            }

            if !hostile.in_grace(frame, tuning.hostile.grace_ticks) {
                let target = (actor.id == hostile.target).then_some(&*actor);
                steer(
                    hostile,
                    before.iter().chain(after.iter()),
                    target,
                    &tuning.steering,
                );
            }

            if resolve_contact(actor, hostile, &tuning.hostile) {
                events.push(GameEvent::ActorHit {
                    hostile_id: hostile.id,
                    health: actor.health,
                });
                if tuning.hostile.reset_despawn_on_contact {
                    *last_despawn_tick = frame;
                }
            }

            hostile.pos += hostile.vel;
            hostile.vel = apply_friction(hostile.vel, tuning.hostile.friction);
            hostile.vel = bounce_walls(
                hostile.pos,
                hostile.vel,
                hostile.extent,
                arena,
                tuning.hostile.wall_restitution,
            );
            hostile.vel = clamp_axes(hostile.vel, tuning.hostile.max_speed);

            hostile.cooldown = hostile.cooldown.saturating_sub(1);

            for other in after.iter_mut() {
                resolve_pair(hostile, other, &tuning.collision);
            }

            hostile.is_dead()
        };

        if dead {
            let hostile = hostiles.remove(index);
            log::debug!("Hostile {} died at frame {}", hostile.id, frame);
            events.push(GameEvent::HostileKilled {
                hostile_id: hostile.id,
            });
        }
    }
}

fn run_timers(state: &mut GameState) {
    let frame = state.frame;
    let despawn_interval = state.tuning.timers.despawn_interval_ticks;
    let life_gain_interval = state.tuning.timers.life_gain_interval_ticks;

    if frame.saturating_sub(state.last_despawn_tick) > despawn_interval {
        if let Some(index) = oldest_hostile(state) {
            let hostile = state.hostiles.remove(index);
            state.last_despawn_tick = frame;
            log::debug!(
                "Despawned hostile {} (spawned at frame {})",
                hostile.id,
                hostile.spawn_tick
            );
            state.events.push(GameEvent::HostileDespawned {
                hostile_id: hostile.id,
            });
        }
    }

    if frame.saturating_sub(state.last_life_gain_tick) > life_gain_interval {
        state.actor.health += 1;
        state.last_life_gain_tick = frame;
        state.events.push(GameEvent::LifeGained {
            health: state.actor.health,
        });
    }
}

/// Index of the hostile with the smallest spawn tick (first one on ties)
fn oldest_hostile(state: &GameState) -> Option<usize> {
    let mut oldest: Option<(usize, u64)> = None;
    for (index, hostile) in state.hostiles.iter().enumerate() {
        match oldest {
            Some((_, tick)) if hostile.spawn_tick >= tick => {}
            _ => oldest = Some((index, hostile.spawn_tick)),
        }
    }
    oldest.map(|(index, _)| index)
}

fn try_spawn(state: &mut GameState) {
    let plan = plan_spawn(
        &mut state.rng,
        &state.tuning,
        &state.actor,
        &state.hostiles,
    );
    match plan {
        Some(plan) => {
            let color = hostile_color(&mut state.rng);
            let id = state.spawn_hostile(plan.pos, color);
            log::debug!(
                "Spawned hostile {} at {:?} after {} attempts",
                id,
                plan.pos,
                plan.attempts
            );
            state.events.push(GameEvent::HostileSpawned {
                hostile_id: id,
                pos: plan.pos,
            });
        }
        None => {
            log::info!("Spawn skipped at frame {}: no valid position", state.frame);
            state.events.push(GameEvent::SpawnSkipped);
        }
    }
}

/// Convenience: tick `n` frames with the same input, stopping early on game over
pub fn run_ticks(state: &mut GameState, input: &TickInput, n: u64) {
    for _ in 0..n {
        if state.is_terminal() {
            break;
        }
        tick(state, input);
    }
}
