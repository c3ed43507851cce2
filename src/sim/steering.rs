//! Hostile steering: separation from peers plus predictive pursuit
//!
//! Both influences are velocity deltas. Pursuit is bang-bang per axis: a
//! constant push toward the target's extrapolated position, regardless of how
//! far away it is.

use glam::Vec2;

use super::state::{Actor, Hostile};
use crate::tuning::SteeringTuning;

/// Average push away from neighbours inside `avoid_radius`
///
/// Each neighbour contributes a unit vector away from it weighted by
/// `1 - dist / avoid_radius`; the sum is averaged over contributors and
/// scaled by `separation_force`. Neighbours at exactly the same center are
/// ignored since they give no direction.
pub fn separation(center: Vec2, neighbours: impl IntoIterator<Item = Vec2>, tuning: &SteeringTuning) -> Vec2 {
    let mut push = Vec2::ZERO;
    let mut count = 0u32;

    for other in neighbours {
        let away = center - other;
        let dist = away.length();
        if dist > 0.0 && dist < tuning.avoid_radius {
            let strength = 1.0 - dist / tuning.avoid_radius;
            push += away / dist * strength;
            count += 1;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }
    push / count as f32 * tuning.separation_force
}

/// Where the target will be after `prediction_ticks` at its current velocity
#[inline]
pub fn predict_position(target: &Actor, prediction_ticks: f32) -> Vec2 {
    target.pos + target.vel * prediction_ticks
}

/// Constant per-axis push from `pos` toward `predicted`
///
/// Ties push in the positive direction.
pub fn pursuit(pos: Vec2, predicted: Vec2, follow_force: f32) -> Vec2 {
    let axis = |from: f32, to: f32| if from > to { -follow_force } else { follow_force };
    Vec2::new(axis(pos.x, predicted.x), axis(pos.y, predicted.y))
}

/// Apply separation and pursuit to `hostile`'s velocity
///
/// `others` must not include `hostile` itself. A missing target (stale
/// handle) only skips the pursuit half.
pub fn steer<'a>(
    hostile: &mut Hostile,
    others: impl IntoIterator<Item = &'a Hostile>,
    target: Option<&Actor>,
    tuning: &SteeringTuning,
) {
    let center = hostile.center();
    hostile.vel += separation(center, others.into_iter().map(Hostile::center), tuning);

    if let Some(target) = target {
        let predicted = predict_position(target, tuning.prediction_ticks);
        hostile.vel += pursuit(hostile.pos, predicted, tuning.follow_force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{ActorTuning, HostileTuning};

    fn actor_at(pos: Vec2, vel: Vec2) -> Actor {
        let mut actor = Actor::new(1, &ActorTuning::default(), Vec2::new(1024.0, 576.0));
        actor.pos = pos;
        actor.vel = vel;
        actor
    }

    #[test]
    fn test_separation_pushes_away() {
        let tuning = SteeringTuning::default();
        let push = separation(Vec2::ZERO, [Vec2::new(50.0, 0.0)], &tuning);
        // strength = 1 - 50/100 = 0.5, times force 0.2
        assert!((push.x + 0.1).abs() < 1e-6);
        assert_eq!(push.y, 0.0);
    }

    #[test]
    fn test_separation_averages_contributors() {
        let tuning = SteeringTuning::default();
        let push = separation(
            Vec2::ZERO,
            [Vec2::new(50.0, 0.0), Vec2::new(-50.0, 0.0), Vec2::new(500.0, 0.0)],
            &tuning,
        );
        assert!(push.length() < 1e-6);
    }

    #[test]
    fn test_separation_ignores_far_and_coincident() {
        let tuning = SteeringTuning::default();
        let push = separation(Vec2::ZERO, [Vec2::ZERO, Vec2::new(100.0, 0.0)], &tuning);
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn test_prediction_extrapolates_velocity() {
        let actor = actor_at(Vec2::new(100.0, 100.0), Vec2::new(2.0, -1.0));
        assert_eq!(predict_position(&actor, 15.0), Vec2::new(130.0, 85.0));
    }

    #[test]
    fn test_pursuit_is_constant_magnitude() {
        let near = pursuit(Vec2::new(10.0, 10.0), Vec2::new(11.0, 9.0), 0.3);
        let far = pursuit(Vec2::new(10.0, 10.0), Vec2::new(900.0, -500.0), 0.3);
        assert_eq!(near, Vec2::new(0.3, -0.3));
        assert_eq!(near, far);
    }

    #[test]
    fn test_steer_leads_moving_target() {
        let tuning = SteeringTuning::default();
        // Target is left of the hostile but running right fast enough that
        // its predicted position is to the hostile's right
        let target = actor_at(Vec2::new(280.0, 300.0), Vec2::new(10.0, 0.0));
        let mut h = Hostile::new(2, Vec2::new(300.0, 300.0), &HostileTuning::default(), 1, 0, 0);
        steer(&mut h, std::iter::empty::<&Hostile>(), Some(&target), &tuning);
        assert!(h.vel.x > 0.0);
    }

    #[test]
    fn test_steer_without_target_only_separates() {
        let tuning = SteeringTuning::default();
        let mut h = Hostile::new(2, Vec2::new(300.0, 300.0), &HostileTuning::default(), 1, 0, 0);
        steer(&mut h, std::iter::empty::<&Hostile>(), None, &tuning);
        assert_eq!(h.vel, Vec2::ZERO);
    }
}
