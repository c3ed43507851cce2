//! Render-facing view of the simulation
//!
//! A flat copy of everything a 2D drawing surface needs for one frame. Hosts
//! draw from this instead of reaching into [`GameState`].

use glam::Vec2;
use serde::Serialize;

use super::state::GameState;

#[derive(Debug, Clone, Serialize)]
pub struct ActorSprite {
    /// Top-left corner
    pub pos: Vec2,
    pub extent: f32,
    pub health: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostileSprite {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub extent: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileSprite {
    /// Center point
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub frame: u64,
    pub arena: Vec2,
    pub actor: ActorSprite,
    pub hostiles: Vec<HostileSprite>,
    pub projectiles: Vec<ProjectileSprite>,
    /// Set once the actor is down; hosts show their game-over screen
    pub terminal: bool,
}

/// Build the render view for the current state
pub fn build_render_frame(state: &GameState) -> RenderFrame {
    let actor = ActorSprite {
        pos: state.actor.pos,
        extent: state.actor.extent,
        health: state.actor.health,
    };

    let hostiles = state
        .hostiles
        .iter()
        .map(|h| HostileSprite {
            id: h.id,
            pos: h.pos,
            extent: h.extent,
            color: h.color,
        })
        .collect();

    let projectiles = state
        .projectiles
        .iter()
        .map(|p| ProjectileSprite {
            pos: p.pos,
            radius: p.radius,
            color: p.color,
        })
        .collect();

    RenderFrame {
        frame: state.frame,
        arena: state.arena(),
        actor,
        hostiles,
        projectiles,
        terminal: state.is_terminal(),
    }
}

/// CSS-style `rgb(r, g, b)` string for a packed 0xRRGGBB colour
pub fn css_color(color: u32) -> String {
    format!(
        "rgb({}, {}, {})",
        (color >> 16) & 0xFF,
        (color >> 8) & 0xFF,
        color & 0xFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Aim, TickInput, tick};

    #[test]
    fn test_frame_mirrors_state() {
        let mut state = GameState::new(3);
        let input = TickInput {
            fire: vec![Aim::Angle(0.0)],
            ..Default::default()
        };
        tick(&mut state, &input);

        let view = build_render_frame(&state);
        assert_eq!(view.frame, 1);
        assert_eq!(view.arena, Vec2::new(1024.0, 576.0));
        assert_eq!(view.actor.health, state.actor.health);
        assert_eq!(view.hostiles.len(), state.hostiles.len());
        assert_eq!(view.projectiles.len(), 1);
        assert_eq!(view.projectiles[0].color, 0xFFFFFF);
        assert!(!view.terminal);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(0xAB0000), "rgb(171, 0, 0)");
        assert_eq!(css_color(0xFFFFFF), "rgb(255, 255, 255)");
    }
}
