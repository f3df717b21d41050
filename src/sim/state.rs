//! Game state and core simulation types
//!
//! A `GameState` is one play session: it owns every entity and is replaced
//! wholesale on restart.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Welcome screen still up, nothing simulated
    Uninitialized,
    /// Bomb frozen at center, waiting for the first flap
    WaitingForStart,
    /// Active gameplay
    Running,
    /// Bomb hit something; explosion plays out, flaps ignored
    Exploding,
    /// Run ended, waiting for restart input
    GameOver,
}

/// Side effects for collaborators outside the simulation (audio, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Welcome screen dismissed
    SessionStarted,
    /// First flap of a session
    RunStarted,
    /// Bomb flapped
    Flap,
    /// Bomb hit a match or left the playfield
    Collision,
    /// A match was passed
    Scored,
    /// Explosion faded out, run is over
    ExplosionFinished,
    /// Session reset after game over
    Restarted,
}

/// Logical playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// The player's bomb
#[derive(Debug, Clone)]
pub struct Bomb {
    /// Position (x never changes, the world scrolls instead)
    pub pos: Vec2,
    /// Vertical velocity (negative is up)
    pub velocity: f32,
    pub radius: f32,
    /// Banking angle, derived from velocity
    pub rotation: f32,
    pub exploding: bool,
    /// Ticks since the explosion started
    pub explosion_ticks: u32,
    pub explosion_radius: f32,
    pub explosion_alpha: f32,
    /// Recent fuse tip positions for the spark trail (newest first)
    pub trail: Vec<Vec2>,
}

impl Bomb {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(BOMB_X, viewport.center_y()),
            velocity: 0.0,
            radius: BOMB_RADIUS,
            rotation: 0.0,
            exploding: false,
            explosion_ticks: 0,
            explosion_radius: 0.0,
            explosion_alpha: 1.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Pin the bomb at vertical center with no motion
    pub fn freeze_at_center(&mut self, viewport: &Viewport) {
        self.pos.y = viewport.center_y();
        self.velocity = 0.0;
        self.rotation = 0.0;
    }

    /// Record the fuse tip to the trail (call each tick while flying).
    ///
    /// Older sparks drift left with the scrolling world.
    pub fn record_trail(&mut self) {
        for spark in self.trail.iter_mut() {
            spark.x -= MATCH_SPEED;
        }
        self.trail.insert(0, self.fuse_tip());
        self.trail.truncate(TRAIL_LENGTH);
    }

    /// Top of the fuse, where sparks come from
    pub fn fuse_tip(&self) -> Vec2 {
        let local = Vec2::new(20.0, -self.radius - 5.0);
        self.pos + Vec2::from_angle(self.rotation).rotate(local)
    }
}

/// A match: top and bottom burning sticks with a gap between them
#[derive(Debug, Clone)]
pub struct Match {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Length of the top stick; the bottom stick starts at `top_height + gap`
    pub top_height: f32,
    pub gap: f32,
    pub passed: bool,
    pub flame_size: f32,
    pub flame_alpha: f32,
    pub bottom_flame_size: f32,
    pub bottom_flame_alpha: f32,
    /// Phase offset for the bottom flame wobble
    pub bottom_flame_offset: f32,
}

impl Match {
    pub fn new(x: f32, top_height: f32, bottom_flame_offset: f32) -> Self {
        Self {
            x,
            width: MATCH_WIDTH,
            top_height,
            gap: MATCH_GAP,
            passed: false,
            flame_size: 0.0,
            flame_alpha: 1.0,
            bottom_flame_size: 0.0,
            bottom_flame_alpha: 1.0,
            bottom_flame_offset,
        }
    }

    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Top of the bottom stick
    pub fn bottom_start(&self) -> f32 {
        self.top_height + self.gap
    }
}

/// A particle of explosion debris
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: [f32; 3],
    /// 0-1, decreases every tick
    pub life: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this session's generator started from
    pub seed: u64,
    pub rng: Pcg32,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation tick counter (drives flame animation)
    pub time_ticks: u64,
    /// Running-phase ticks since the last spawn attempt
    pub spawn_ticks: u32,
    pub bomb: Bomb,
    /// Active matches, oldest first
    pub matches: Vec<Match>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state before the welcome screen is dismissed
    pub fn new(seed: u64) -> Self {
        Self::with_viewport(seed, Viewport::default())
    }

    pub fn with_viewport(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            phase: GamePhase::Uninitialized,
            score: 0,
            time_ticks: 0,
            spawn_ticks: 0,
            bomb: Bomb::new(&viewport),
            matches: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Replace this session with a fresh one, waiting for the first flap
    pub fn reset(&mut self) {
        let seed = self.rng.random::<u64>();
        let events = std::mem::take(&mut self.events);
        *self = Self::with_viewport(seed, self.viewport);
        self.events = events;
        self.phase = GamePhase::WaitingForStart;
    }

    /// Milliseconds of simulated time
    pub fn time_ms(&self) -> f32 {
        self.time_ticks as f32 * TICK_MS
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_uninitialized() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Uninitialized);
        assert_eq!(state.score, 0);
        assert_eq!(state.bomb.pos, Vec2::new(BOMB_X, PLAYFIELD_HEIGHT / 2.0));
        assert!(state.matches.is_empty());
    }

    #[test]
    fn test_reset_replaces_session() {
        let mut state = GameState::new(7);
        state.phase = GamePhase::GameOver;
        state.score = 12;
        state.bomb.exploding = true;
        state.bomb.explosion_alpha = 0.0;
        state.bomb.pos.y = 590.0;
        state.matches.push(Match::new(100.0, 120.0, 3.0));
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 2.0,
            color: [1.0, 0.5, 0.0],
            life: 0.5,
        });

        state.reset();

        assert_eq!(state.phase, GamePhase::WaitingForStart);
        assert_eq!(state.score, 0);
        assert!(!state.bomb.exploding);
        assert_eq!(state.bomb.explosion_alpha, 1.0);
        assert_eq!(state.bomb.pos.y, 300.0);
        assert!(state.matches.is_empty());
        assert!(state.particles.is_empty());
        assert_ne!(state.seed, 7);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut bomb = Bomb::new(&Viewport::default());
        for i in 0..40 {
            bomb.pos.y = i as f32;
            bomb.record_trail();
        }
        assert_eq!(bomb.trail.len(), TRAIL_LENGTH);
        assert_eq!(bomb.trail[0], bomb.fuse_tip());
        // Oldest spark has drifted with the world
        let oldest = bomb.trail[TRAIL_LENGTH - 1];
        assert!((oldest.x - (bomb.fuse_tip().x - (TRAIL_LENGTH - 1) as f32 * MATCH_SPEED)).abs() < 1e-4);
    }

    #[test]
    fn test_fuse_tip_unrotated() {
        let bomb = Bomb::new(&Viewport::default());
        let tip = bomb.fuse_tip();
        assert!((tip.x - (BOMB_X + 20.0)).abs() < 1e-4);
        assert!((tip.y - (300.0 - BOMB_RADIUS - 5.0)).abs() < 1e-4);
    }
}
