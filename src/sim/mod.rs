//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to [`tick`] is one frame; there is no wall-clock time
//! - Seeded RNG only, stored in the state
//! - Hostiles update in reverse index order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod kinematics;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;
pub mod view;

pub use autopilot::demo_input;
pub use collision::{PairOutcome, circles_overlap, resolve_contact, resolve_pair};
pub use input::{Aim, MoveIntent};
pub use spawn::{SpawnPlan, plan_spawn};
pub use state::{Actor, GameEvent, GamePhase, GameState, Hostile, Projectile};
pub use tick::{TickInput, fire, run_ticks, tick};
pub use view::{RenderFrame, build_render_frame};
