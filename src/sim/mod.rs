//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` is one simulation step
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod physics;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionKind, check_collision};
pub use state::{Bomb, GameEvent, GamePhase, GameState, Match, Particle, Viewport};
pub use tick::{TickInput, apply_input, tick, update};
