//! Diwali Bomb - flap a lit bomb through a gauntlet of burning matches
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `runner`: Fixed-timestep frame driver around the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Background music and sound effects
//! - `platform`: Browser viewport helpers
//! - `settings`: Runtime configuration

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;

pub use runner::Runner;
pub use settings::Settings;

/// Game configuration constants
///
/// Speeds and accelerations are expressed per simulation tick.
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Milliseconds per simulation tick
    pub const TICK_MS: f32 = 1000.0 / SIM_HZ as f32;

    /// Logical playfield size (the canvas is scaled to fit the window)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Bomb defaults
    pub const BOMB_X: f32 = 50.0;
    pub const BOMB_RADIUS: f32 = 15.0;
    /// Half-width of the collision box (smaller than the drawn bomb on purpose)
    pub const HIT_BOX: f32 = 10.0;
    pub const GRAVITY: f32 = 0.5;
    pub const FLAP_SPEED: f32 = -8.0;
    /// Divisor for the banking angle: rotation = atan(velocity / ROTATION_DAMPING)
    pub const ROTATION_DAMPING: f32 = 8.0;

    /// Match (obstacle pair) defaults
    pub const MATCH_SPEED: f32 = 2.0;
    pub const MATCH_WIDTH: f32 = 20.0;
    pub const MATCH_GAP: f32 = 200.0;
    pub const MIN_MATCH_SPACING: f32 = 200.0;
    /// Smallest top/bottom segment length
    pub const MATCH_MARGIN: f32 = 50.0;
    pub const MATCH_SPAWN_INTERVAL_MS: u32 = 2000;
    /// Spawn interval in ticks (120 at 60 Hz)
    pub const MATCH_SPAWN_INTERVAL_TICKS: u32 = MATCH_SPAWN_INTERVAL_MS * SIM_HZ / 1000;
    /// Bottom flame wobble offset range
    pub const FLAME_OFFSET_RANGE: f32 = 10.0;
    /// Flame size amplitude
    pub const FLAME_AMPLITUDE: f32 = 5.0;

    /// Explosion
    pub const EXPLOSION_GROWTH: f32 = 5.0;
    pub const EXPLOSION_FADE: f32 = 0.05;
    pub const EXPLOSION_BURST: usize = 5;

    /// Particles
    pub const PARTICLE_DECAY: f32 = 0.02;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    pub const PARTICLE_MIN_SIZE: f32 = 1.0;
    pub const PARTICLE_MAX_SIZE: f32 = 4.0;
    /// Warm hue band (degrees)
    pub const PARTICLE_HUE_MIN: f32 = 30.0;
    pub const PARTICLE_HUE_MAX: f32 = 90.0;

    /// Fuse spark trail length
    pub const TRAIL_LENGTH: usize = 12;
}

/// Convert an HSL color (hue in degrees, s/l in 0-1) to RGB (0-1)
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(60.0, 1.0, 0.5), [1.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(30.0, 1.0, 0.5), [1.0, 0.5, 0.0]));
    }

    #[test]
    fn test_spawn_interval_ticks() {
        assert_eq!(consts::MATCH_SPAWN_INTERVAL_TICKS, 120);
    }
}
