//! Fixed timestep simulation tick
//!
//! The session state machine:
//! `Uninitialized -> WaitingForStart -> Running -> Exploding -> GameOver -> (reset) -> WaitingForStart`

use super::collision::{self, CollisionKind};
use super::state::{GameEvent, GamePhase, GameState};
use super::{particles, physics, scoring, spawner};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space/tap): starts a run, flaps, or restarts after game over
    pub flap: bool,
    /// Welcome screen dismissed
    pub start_session: bool,
}

impl TickInput {
    pub fn flap() -> Self {
        Self {
            flap: true,
            ..Default::default()
        }
    }

    pub fn start_session() -> Self {
        Self {
            start_session: true,
            ..Default::default()
        }
    }
}

/// Advance the game state by one tick: apply input, then simulate
pub fn tick(state: &mut GameState, input: &TickInput) {
    apply_input(state, input);
    update(state);
}

/// Route input according to the current phase
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Uninitialized => {
            if input.start_session {
                state.phase = GamePhase::WaitingForStart;
                state.bomb.freeze_at_center(&state.viewport);
                state.emit(GameEvent::SessionStarted);
                log::info!("Session started, waiting for first flap");
            }
        }
        GamePhase::WaitingForStart => {
            if input.flap {
                state.phase = GamePhase::Running;
                physics::apply_flap(&mut state.bomb);
                state.emit(GameEvent::RunStarted);
                state.emit(GameEvent::Flap);
                log::info!("Run started (seed {})", state.seed);
            }
        }
        GamePhase::Running => {
            if input.flap && physics::apply_flap(&mut state.bomb) {
                state.emit(GameEvent::Flap);
            }
        }
        // Flaps are swallowed while the explosion plays out
        GamePhase::Exploding => {}
        GamePhase::GameOver => {
            if input.flap {
                state.reset();
                state.emit(GameEvent::Restarted);
                log::info!("Session reset (seed {})", state.seed);
            }
        }
    }
}

/// Simulate one tick for the current phase
pub fn update(state: &mut GameState) {
    match state.phase {
        GamePhase::Uninitialized | GamePhase::GameOver => {}
        GamePhase::WaitingForStart => {
            state.bomb.freeze_at_center(&state.viewport);
        }
        GamePhase::Running | GamePhase::Exploding => step_run(state),
    }
}

fn step_run(state: &mut GameState) {
    state.time_ticks += 1;

    // Bomb keeps falling while it explodes
    physics::advance(&mut state.bomb);
    if !state.bomb.exploding {
        state.bomb.record_trail();
    }

    particles::update(&mut state.particles);

    if physics::advance_explosion(&mut state.bomb, &mut state.particles, &mut state.rng) {
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::ExplosionFinished);
        log::info!("Game over with score {}", state.score);
    }

    let time_ms = state.time_ms();
    spawner::advance_all(&mut state.matches, MATCH_SPEED, time_ms);

    if !state.bomb.exploding {
        if let Some(kind) = collision::detect(&state.bomb, &state.matches, &state.viewport) {
            explode(state, kind);
        }
    }

    let awarded = scoring::evaluate(&state.bomb, &mut state.matches, &mut state.score);
    for _ in 0..awarded {
        state.emit(GameEvent::Scored);
    }

    spawner::prune_offscreen(&mut state.matches);

    if state.phase == GamePhase::Running {
        state.spawn_ticks += 1;
        if state.spawn_ticks >= MATCH_SPAWN_INTERVAL_TICKS {
            state.spawn_ticks = 0;
            spawner::try_spawn(&mut state.matches, &mut state.rng, &state.viewport);
        }
    }
}

fn explode(state: &mut GameState, kind: CollisionKind) {
    if physics::trigger_explosion(&mut state.bomb) {
        state.phase = GamePhase::Exploding;
        state.bomb.trail.clear();
        state.emit(GameEvent::Collision);
        log::info!("Bomb hit {:?} at y={:.1}", kind, state.bomb.pos.y);
    }
}
