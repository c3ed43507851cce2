//! Game balance and behaviour tuning
//!
//! Every constant the simulation reads lives here, grouped by the system that
//! consumes it. Behaviours that differ between play styles (friction model,
//! contact damage, despawn coupling) are choices in this struct rather than
//! separate code paths.
//!
//! Tuning is plain serde data: a partial JSON document overrides only the
//! keys it names, everything else falls back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// How velocity bleeds off each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Friction {
    /// Subtract a fixed amount per axis toward zero, snapping to zero
    /// instead of crossing it
    Decrement(f32),
    /// Multiply each axis by the retained fraction
    Decay(f32),
}

impl Friction {
    /// Apply friction to one velocity component
    #[inline]
    pub fn apply(self, v: f32) -> f32 {
        match self {
            Friction::Decrement(amount) => {
                if v.abs() <= amount {
                    0.0
                } else {
                    v - amount.copysign(v)
                }
            }
            Friction::Decay(retain) => v * retain,
        }
    }
}

/// What touching the actor does to a hostile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactDamage {
    /// Hostile dies on contact
    #[default]
    InstantKill,
    /// Hostile loses one health point
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    /// Side length of the actor's square
    pub extent: f32,
    pub starting_health: i32,
    /// Velocity added per tick for each held direction
    pub acceleration: f32,
    pub friction: Friction,
    /// Per-axis speed cap
    pub max_speed: f32,
    /// Fraction of speed kept (and inverted) on a wall bounce
    pub wall_restitution: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            extent: ACTOR_EXTENT,
            starting_health: ACTOR_STARTING_HEALTH,
            acceleration: ACTOR_ACCELERATION,
            friction: Friction::Decrement(ACTOR_FRICTION),
            max_speed: ACTOR_MAX_SPEED,
            wall_restitution: ACTOR_WALL_RESTITUTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileTuning {
    pub extent: f32,
    pub starting_health: i32,
    pub friction: Friction,
    pub max_speed: f32,
    pub wall_restitution: f32,
    /// Ticks after spawning during which steering is suppressed
    pub grace_ticks: u64,
    pub contact_damage: ContactDamage,
    /// Cooldown applied to a hostile after it touches the actor
    pub contact_cooldown_ticks: u32,
    /// Touching the actor restarts the despawn timer
    pub reset_despawn_on_contact: bool,
}

impl Default for HostileTuning {
    fn default() -> Self {
        Self {
            extent: HOSTILE_EXTENT,
            starting_health: HOSTILE_STARTING_HEALTH,
            friction: Friction::Decrement(HOSTILE_FRICTION),
            max_speed: HOSTILE_MAX_SPEED,
            wall_restitution: HOSTILE_WALL_RESTITUTION,
            grace_ticks: HOSTILE_GRACE_TICKS,
            contact_damage: ContactDamage::InstantKill,
            contact_cooldown_ticks: CONTACT_COOLDOWN_TICKS,
            reset_despawn_on_contact: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringTuning {
    /// Neighbours closer than this push a hostile away
    pub avoid_radius: f32,
    pub separation_force: f32,
    /// How far ahead the actor's position is extrapolated
    pub prediction_ticks: f32,
    pub follow_force: f32,
}

impl Default for SteeringTuning {
    fn default() -> Self {
        Self {
            avoid_radius: AVOID_RADIUS,
            separation_force: SEPARATION_FORCE,
            prediction_ticks: PREDICTION_TICKS,
            follow_force: FOLLOW_FORCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Restitution of hostile-hostile impulses (1.0 = perfectly elastic)
    pub restitution: f32,
    pub cooldown_ticks: u32,
    /// Cooldown when the pair was already separating
    pub separating_cooldown_ticks: u32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            restitution: COLLISION_RESTITUTION,
            cooldown_ticks: COLLISION_COOLDOWN_TICKS,
            separating_cooldown_ticks: SEPARATING_COOLDOWN_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            color: PROJECTILE_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// A spawn is attempted whenever the frame index is a multiple of this
    pub rate_ticks: u64,
    /// Gap kept between a spawned hostile and the walls
    pub wall_buffer: f32,
    /// Minimum center distance to the actor, as a fraction of arena width
    pub min_actor_distance_fraction: f32,
    /// Added to the hostile extent to get the minimum hostile spacing
    pub separation_padding: f32,
    pub max_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            rate_ticks: SPAWN_RATE_TICKS,
            wall_buffer: SPAWN_WALL_BUFFER,
            min_actor_distance_fraction: SPAWN_MIN_ACTOR_DISTANCE_FRACTION,
            separation_padding: SPAWN_SEPARATION_PADDING,
            max_attempts: SPAWN_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerTuning {
    /// Oldest hostile is removed once this many ticks pass without a despawn
    pub despawn_interval_ticks: u64,
    /// Actor gains a life once this many ticks pass without a gain
    pub life_gain_interval_ticks: u64,
}

impl Default for TimerTuning {
    fn default() -> Self {
        Self {
            despawn_interval_ticks: DESPAWN_INTERVAL_TICKS,
            life_gain_interval_ticks: LIFE_GAIN_INTERVAL_TICKS,
        }
    }
}

/// Complete tuning for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub actor: ActorTuning,
    pub hostile: HostileTuning,
    pub steering: SteeringTuning,
    pub collision: CollisionTuning,
    pub projectile: ProjectileTuning,
    pub spawn: SpawnTuning,
    pub timers: TimerTuning,
}

/// Named tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    /// Bouncy walls, fully elastic hostile collisions, fixed-decrement friction
    #[default]
    Standard,
    /// Softer walls, lossy collisions, multiplicative friction
    Damped,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Standard => "Standard",
            TuningPreset::Damped => "Damped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(TuningPreset::Standard),
            "damped" => Some(TuningPreset::Damped),
            _ => None,
        }
    }
}

impl Tuning {
    /// Build the tuning for a preset
    pub fn from_preset(preset: TuningPreset) -> Self {
        let mut tuning = Self::default();
        if preset == TuningPreset::Damped {
            tuning.actor.friction = Friction::Decay(0.92);
            tuning.actor.wall_restitution = 0.75;
            tuning.hostile.friction = Friction::Decay(0.97);
            tuning.hostile.wall_restitution = 0.85;
            tuning.collision.restitution = 0.6;
            tuning.steering.avoid_radius = 80.0;
            tuning.steering.separation_force = 0.25;
            tuning.spawn.rate_ticks = 200;
        }
        tuning
    }

    /// Parse tuning from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Minimum center distance between a fresh spawn and the actor
    pub fn spawn_min_actor_distance(&self) -> f32 {
        self.arena.width * self.spawn.min_actor_distance_fraction
    }

    /// Minimum center distance between a fresh spawn and any other hostile
    pub fn spawn_min_separation(&self) -> f32 {
        self.hostile.extent + self.spawn.separation_padding
    }

    /// Reject values the simulation cannot honour
    pub fn validate(&self) -> Result<(), SimError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("actor.extent", self.actor.extent)?;
        positive("hostile.extent", self.hostile.extent)?;
        non_negative("actor.acceleration", self.actor.acceleration)?;
        non_negative("actor.max_speed", self.actor.max_speed)?;
        non_negative("hostile.max_speed", self.hostile.max_speed)?;
        unit_interval("actor.wall_restitution", self.actor.wall_restitution)?;
        unit_interval("hostile.wall_restitution", self.hostile.wall_restitution)?;
        friction("actor.friction", self.actor.friction)?;
        friction("hostile.friction", self.hostile.friction)?;
        unit_interval("collision.restitution", self.collision.restitution)?;
        positive("steering.avoid_radius", self.steering.avoid_radius)?;
        non_negative("steering.prediction_ticks", self.steering.prediction_ticks)?;
        positive("projectile.speed", self.projectile.speed)?;
        non_negative("projectile.radius", self.projectile.radius)?;
        non_negative("spawn.wall_buffer", self.spawn.wall_buffer)?;

        if self.actor.extent >= self.arena.width.min(self.arena.height) {
            return Err(SimError::InvalidTuning {
                name: "actor.extent",
                value: self.actor.extent as f64,
                expected: "smaller than both arena dimensions",
            });
        }
        if self.spawn.max_attempts == 0 {
            return Err(SimError::InvalidTuning {
                name: "spawn.max_attempts",
                value: 0.0,
                expected: ">= 1",
            });
        }
        if self.spawn.rate_ticks == 0 {
            return Err(SimError::InvalidTuning {
                name: "spawn.rate_ticks",
                value: 0.0,
                expected: ">= 1",
            });
        }

        let spawn_span = self.hostile.extent + 2.0 * self.spawn.wall_buffer;
        if spawn_span >= self.arena.width.min(self.arena.height) {
            return Err(SimError::InvalidTuning {
                name: "hostile.extent",
                value: self.hostile.extent as f64,
                expected: "extent plus both wall buffers smaller than the arena",
            });
        }

        if self.spawn_min_actor_distance() > self.arena.width.hypot(self.arena.height) {
            log::warn!(
                "spawn.min_actor_distance_fraction {} excludes the whole arena; no hostile will ever spawn",
                self.spawn.min_actor_distance_fraction
            );
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), SimError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidTuning {
            name,
            value: value as f64,
            expected: "> 0",
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), SimError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidTuning {
            name,
            value: value as f64,
            expected: ">= 0",
        })
    }
}

fn unit_interval(name: &'static str, value: f32) -> Result<(), SimError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::InvalidTuning {
            name,
            value: value as f64,
            expected: "within [0, 1]",
        })
    }
}

fn friction(name: &'static str, value: Friction) -> Result<(), SimError> {
    match value {
        Friction::Decrement(amount) => non_negative(name, amount),
        Friction::Decay(retain) => unit_interval(name, retain),
    }
}
