//! Collision detection and response
//!
//! Every square body is treated as its inscribed circle. Two bodies collide
//! when their centers are strictly closer than the sum of their radii.

use glam::Vec2;

use super::state::{Actor, Hostile, Projectile};
use crate::tuning::{CollisionTuning, ContactDamage, HostileTuning};

/// Normal used when two centers coincide exactly
pub const FALLBACK_NORMAL: Vec2 = Vec2::X;

/// Strict circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Does the projectile's circle touch the hostile's circle?
#[inline]
pub fn projectile_hits(projectile: &Projectile, hostile: &Hostile) -> bool {
    circles_overlap(
        projectile.pos,
        projectile.radius,
        hostile.center(),
        hostile.radius(),
    )
}

/// Is the hostile touching the actor?
#[inline]
pub fn actor_contact(actor: &Actor, hostile: &Hostile) -> bool {
    circles_overlap(actor.center(), actor.radius(), hostile.center(), hostile.radius())
}

/// Apply actor-hostile contact damage if the pair overlaps and the hostile's
/// cooldown has expired. Returns true if damage was dealt.
pub fn resolve_contact(actor: &mut Actor, hostile: &mut Hostile, tuning: &HostileTuning) -> bool {
    if hostile.cooldown > 0 || !actor_contact(actor, hostile) {
        return false;
    }
    actor.health -= 1;
    match tuning.contact_damage {
        ContactDamage::InstantKill => hostile.health = 0,
        ContactDamage::Decrement => hostile.health -= 1,
    }
    hostile.cooldown = tuning.contact_cooldown_ticks;
    true
}

/// Outcome of resolving one hostile pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Either member is still cooling down
    CoolingDown,
    /// Not overlapping
    Apart,
    /// Overlap corrected, but the pair was already moving apart
    Separating,
    /// Overlap corrected and an impulse of magnitude `j` exchanged
    Impulse { j: f32 },
}

impl PairOutcome {
    /// Did this call change either body?
    pub fn touched(&self) -> bool {
        matches!(self, PairOutcome::Separating | PairOutcome::Impulse { .. })
    }
}

/// Equal-mass elastic collision between two hostiles with positional correction
///
/// `a` and `b` are pushed apart by half the overlap each along the normal
/// from `a` to `b`. If they were already separating only a short cooldown is
/// applied; otherwise `j = -(1 + e) * v_rel.n / 2` is exchanged and both get
/// the full collision cooldown.
pub fn resolve_pair(a: &mut Hostile, b: &mut Hostile, tuning: &CollisionTuning) -> PairOutcome {
    if a.cooldown > 0 || b.cooldown > 0 {
        return PairOutcome::CoolingDown;
    }

    let delta = b.center() - a.center();
    let dist = delta.length();
    let radii = a.radius() + b.radius();
    if dist >= radii {
        return PairOutcome::Apart;
    }

    let normal = if dist > 0.0 {
        delta / dist
    } else {
        log::debug!("Hostiles {} and {} share a center, using fallback normal", a.id, b.id);
        FALLBACK_NORMAL
    };

    // Push apart so the pair doesn't sink into each other
    let correction = normal * ((radii - dist) / 2.0);
    a.pos -= correction;
    b.pos += correction;

    let rel_along_normal = (b.vel - a.vel).dot(normal);
    if rel_along_normal > 0.0 {
        a.cooldown = tuning.separating_cooldown_ticks;
        b.cooldown = tuning.separating_cooldown_ticks;
        return PairOutcome::Separating;
    }

    let j = -(1.0 + tuning.restitution) * rel_along_normal / 2.0;
    let impulse = normal * j;
    a.vel -= impulse;
    b.vel += impulse;

    a.cooldown = tuning.cooldown_ticks;
    b.cooldown = tuning.cooldown_ticks;
    PairOutcome::Impulse { j }
}
