//! Game state and core simulation types
//!
//! All state that must survive a snapshot/restore lives here, including the
//! RNG, so a restored session ticks exactly like the session it was saved from.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::MoveIntent;
use super::kinematics::{bounce_walls, clamp_axes};
use crate::circle_center;
use crate::tuning::{ActorTuning, HostileTuning, ProjectileTuning, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking, spawning and accepting input
    Active,
    /// Actor ran out of health; nothing changes until a new session starts
    Terminal,
}

/// Things that happened during the last tick, for hosts that react to them
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A hostile touched the actor
    ActorHit { hostile_id: u32, health: i32 },
    /// A projectile struck a hostile
    HostileShot { hostile_id: u32, projectile_id: u32 },
    /// A hostile reached zero health and was removed
    HostileKilled { hostile_id: u32 },
    /// The oldest hostile was removed by the despawn timer
    HostileDespawned { hostile_id: u32 },
    HostileSpawned { hostile_id: u32, pos: Vec2 },
    /// No valid spawn position was found within the attempt cap
    SpawnSkipped,
    LifeGained { health: i32 },
    GameOver { frame: u64 },
}

/// The player-controlled body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Side length
    pub extent: f32,
    /// May exceed the starting value through regeneration
    pub health: i32,
}

impl Actor {
    /// Actor centered in the arena, at rest
    pub fn new(id: u32, tuning: &ActorTuning, arena: Vec2) -> Self {
        Self {
            id,
            pos: arena / 2.0 - Vec2::splat(tuning.extent / 2.0),
            vel: Vec2::ZERO,
            extent: tuning.extent,
            health: tuning.starting_health,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        circle_center(self.pos, self.extent)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.extent / 2.0
    }

    /// Move by the velocity settled at the end of the previous tick
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Friction, input acceleration, speed cap, then wall bounce
    pub fn apply_controls(&mut self, intent: MoveIntent, tuning: &ActorTuning, arena: Vec2) {
        self.vel.x = tuning.friction.apply(self.vel.x);
        self.vel.y = tuning.friction.apply(self.vel.y);
        self.vel += intent.acceleration(tuning.acceleration);
        self.vel = clamp_axes(self.vel, tuning.max_speed);
        self.vel = bounce_walls(self.pos, self.vel, self.extent, arena, tuning.wall_restitution);
    }
}

/// A hostile that hunts the actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub extent: f32,
    pub health: i32,
    /// 0xRRGGBB, cosmetic only
    pub color: u32,
    /// Id of the actor this hostile pursues (not owned)
    pub target: u32,
    /// Frame index at creation
    pub spawn_tick: u64,
    /// Ticks remaining before it may collide again
    pub cooldown: u32,
}

impl Hostile {
    pub fn new(
        id: u32,
        pos: Vec2,
        tuning: &HostileTuning,
        target: u32,
        spawn_tick: u64,
        color: u32,
    ) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            extent: tuning.extent,
            health: tuning.starting_health,
            color,
            target,
            spawn_tick,
            cooldown: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        circle_center(self.pos, self.extent)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.extent / 2.0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Fresh hostiles hold still for `grace_ticks` after spawning
    #[inline]
    pub fn in_grace(&self, frame: u64, grace_ticks: u64) -> bool {
        frame.saturating_sub(self.spawn_tick) < grace_ticks
    }
}

/// A shot fired by the actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Center point
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: u32,
}

impl Projectile {
    /// Projectile leaving `origin` along the unit vector `dir`
    pub fn new(id: u32, origin: Vec2, dir: Vec2, tuning: &ProjectileTuning) -> Self {
        Self {
            id,
            pos: origin,
            vel: dir * tuning.speed,
            radius: tuning.radius,
            color: tuning.color,
        }
    }

    /// Fully outside the arena on any side
    pub fn is_off_field(&self, arena: Vec2) -> bool {
        self.pos.x + self.radius < 0.0
            || self.pos.x - self.radius > arena.x
            || self.pos.y + self.radius < 0.0
            || self.pos.y - self.radius > arena.y
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn placement and cosmetic colours draw from this
    pub rng: Pcg32,
    /// Index of the next frame to simulate
    pub frame: u64,
    pub phase: GamePhase,
    pub last_despawn_tick: u64,
    pub last_life_gain_tick: u64,
    pub tuning: Tuning,
    pub actor: Actor,
    pub hostiles: Vec<Hostile>,
    pub projectiles: Vec<Projectile>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new session. `tuning` is expected to have passed
    /// [`Tuning::validate`].
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let actor = Actor::new(1, &tuning.actor, tuning_arena(&tuning));
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            phase: GamePhase::Active,
            last_despawn_tick: 0,
            last_life_gain_tick: 0,
            tuning,
            actor,
            hostiles: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 2,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Arena size as a vector
    #[inline]
    pub fn arena(&self) -> Vec2 {
        tuning_arena(&self.tuning)
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Terminal
    }

    /// Resolve a hostile's pursuit handle
    pub fn pursuit_target(&self, hostile: &Hostile) -> Option<&Actor> {
        (self.actor.id == hostile.target).then_some(&self.actor)
    }

    /// Add a hostile at `pos` targeting the actor, stamped with the current frame
    pub fn spawn_hostile(&mut self, pos: Vec2, color: u32) -> u32 {
        let id = self.next_entity_id();
        let hostile = Hostile::new(
            id,
            pos,
            &self.tuning.hostile,
            self.actor.id,
            self.frame,
            color,
        );
        self.hostiles.push(hostile);
        id
    }
}

fn tuning_arena(tuning: &Tuning) -> Vec2 {
    Vec2::new(tuning.arena.width, tuning.arena.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.actor.health, 5);
        assert_eq!(state.actor.pos, Vec2::new(487.0, 263.0));
        assert_eq!(state.actor.center(), Vec2::new(512.0, 288.0));
        assert!(state.hostiles.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(7);
        let a = state.spawn_hostile(Vec2::new(10.0, 10.0), 0);
        let b = state.spawn_hostile(Vec2::new(100.0, 10.0), 0);
        assert_ne!(a, b);
        assert_ne!(a, state.actor.id);
        assert_eq!(state.hostiles[0].target, state.actor.id);
        assert!(state.pursuit_target(&state.hostiles[0]).is_some());
    }

    #[test]
    fn test_hostile_grace_window() {
        let h = Hostile::new(3, Vec2::ZERO, &HostileTuning::default(), 1, 100, 0);
        assert!(h.in_grace(100, 60));
        assert!(h.in_grace(159, 60));
        assert!(!h.in_grace(160, 60));
    }

    #[test]
    fn test_projectile_off_field() {
        let arena = Vec2::new(100.0, 100.0);
        let mut p = Projectile::new(1, Vec2::new(50.0, 50.0), Vec2::X, &ProjectileTuning::default());
        assert!(!p.is_off_field(arena));
        p.pos.x = 107.0; // still touching the edge
        assert!(!p.is_off_field(arena));
        p.pos.x = 108.5;
        assert!(p.is_off_field(arena));
        p.pos = Vec2::new(50.0, -9.0);
        assert!(p.is_off_field(arena));
    }

    #[test]
    fn test_actor_controls_clamp_and_bounce() {
        let tuning = ActorTuning::default();
        let arena = Vec2::new(1024.0, 576.0);
        let mut actor = Actor::new(1, &tuning, arena);
        let intent = MoveIntent {
            right: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..100 {
            actor.apply_controls(intent, &tuning, arena);
        }
        assert!(actor.vel.x <= tuning.max_speed);
        assert!(actor.vel.y <= tuning.max_speed);

        // Flush against the right wall: the x velocity reverses
        actor.pos.x = arena.x - actor.extent - 1.0;
        actor.vel = Vec2::new(5.0, 0.0);
        actor.apply_controls(MoveIntent::default(), &tuning, arena);
        assert!(actor.vel.x < 0.0);
    }
}
