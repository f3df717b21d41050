//! Per-frame GPU data
//!
//! Packs a snapshot of the game state into the uniform layouts the shader
//! reads. Pure data, no wgpu, so it is tested natively.

use bytemuck::{Pod, Zeroable};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Maximum matches drawn (at most three fit on screen)
pub const MAX_MATCHES: usize = 8;
/// Maximum particles drawn
pub const MAX_PARTICLES: usize = crate::settings::PARTICLE_CAP;
/// Maximum fuse sparks drawn
pub const MAX_TRAIL: usize = 16;

// ============================================================================
// GPU DATA STRUCTURES (must match shader, vec4-aligned for uniform arrays)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Globals {
    /// resolution.xy, playfield.zw
    pub view: [f32; 4],
    /// time (s), match gap, twinkle, game over
    pub params: [f32; 4],
    /// match count, particle count, trail count, unused
    pub counts: [u32; 4],
    /// pos.xy, radius, rotation
    pub bomb: [f32; 4],
    /// exploding, radius, alpha, unused
    pub explosion: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct MatchData {
    /// x, width, top height, gap
    pub body: [f32; 4],
    /// top size, top alpha, bottom size, bottom alpha
    pub flames: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
pub struct ParticleData {
    /// pos.xy, size, life
    pub shape: [f32; 4],
    /// rgb, unused
    pub color: [f32; 4],
}

/// Everything uploaded for one frame
pub struct FrameData {
    pub globals: Globals,
    pub matches: [MatchData; MAX_MATCHES],
    pub particles: [ParticleData; MAX_PARTICLES],
    /// pos.xy, alpha, size
    pub trail: [[f32; 4]; MAX_TRAIL],
}

/// Snapshot the state for drawing. `time` is host time in seconds.
pub fn pack(state: &GameState, settings: &Settings, resolution: (u32, u32), time: f32) -> FrameData {
    let time_ms = time * 1000.0;
    let wobble = settings.effective_flame_wobble();

    let mut matches = [MatchData::default(); MAX_MATCHES];
    let match_count = state.matches.len().min(MAX_MATCHES);
    for (slot, m) in matches.iter_mut().zip(state.matches.iter()) {
        let bottom_wobble = if wobble {
            (time_ms / 200.0 + m.bottom_flame_offset).sin() * FLAME_AMPLITUDE
        } else {
            0.0
        };
        *slot = MatchData {
            body: [m.x, m.width, m.top_height, m.gap],
            flames: [
                m.flame_size,
                m.flame_alpha,
                m.bottom_flame_size + bottom_wobble,
                m.bottom_flame_alpha,
            ],
        };
    }

    let mut particles = [ParticleData::default(); MAX_PARTICLES];
    let particle_count = state.particles.len().min(settings.max_particles()).min(MAX_PARTICLES);
    for (slot, p) in particles
        .iter_mut()
        .zip(state.particles.iter())
        .take(particle_count)
    {
        *slot = ParticleData {
            shape: [p.pos.x, p.pos.y, p.size, p.life],
            color: [p.color[0], p.color[1], p.color[2], 1.0],
        };
    }

    let mut trail = [[0.0; 4]; MAX_TRAIL];
    let bomb = &state.bomb;
    let trail_count = bomb.trail.len().min(MAX_TRAIL);
    for (i, (slot, spark)) in trail.iter_mut().zip(bomb.trail.iter()).enumerate() {
        let fade = 1.0 - i as f32 / trail_count as f32;
        *slot = [spark.x, spark.y, fade, 1.0 + 2.0 * fade];
    }

    let game_over = state.phase == GamePhase::GameOver;
    let globals = Globals {
        view: [
            resolution.0 as f32,
            resolution.1 as f32,
            state.viewport.width,
            state.viewport.height,
        ],
        params: [
            time,
            MATCH_GAP,
            if settings.effective_twinkle() { 1.0 } else { 0.0 },
            if game_over { 1.0 } else { 0.0 },
        ],
        counts: [match_count as u32, particle_count as u32, trail_count as u32, 0],
        bomb: [bomb.pos.x, bomb.pos.y, bomb.radius, bomb.rotation],
        explosion: [
            if bomb.exploding { 1.0 } else { 0.0 },
            bomb.explosion_radius,
            bomb.explosion_alpha.max(0.0),
            0.0,
        ],
    };

    FrameData {
        globals,
        matches,
        particles,
        trail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Match, Particle};
    use glam::Vec2;

    fn particle(life: f32) -> Particle {
        Particle {
            pos: Vec2::new(10.0, 20.0),
            vel: Vec2::ZERO,
            size: 2.0,
            color: [1.0, 0.5, 0.0],
            life,
        }
    }

    #[test]
    fn test_layout_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<Globals>(), 80);
        assert_eq!(std::mem::size_of::<MatchData>(), 32);
        assert_eq!(std::mem::size_of::<ParticleData>(), 32);
    }

    #[test]
    fn test_pack_counts_and_values() {
        let mut state = GameState::new(1);
        state.matches.push(Match::new(120.0, 80.0, 0.0));
        state.particles.push(particle(0.4));
        state.bomb.record_trail();

        let frame = pack(&state, &Settings::default(), (800, 1200), 1.0);
        assert_eq!(frame.globals.counts, [1, 1, 1, 0]);
        assert_eq!(frame.globals.view, [800.0, 1200.0, 400.0, 600.0]);
        assert_eq!(frame.matches[0].body, [120.0, MATCH_WIDTH, 80.0, MATCH_GAP]);
        assert_eq!(frame.particles[0].shape, [10.0, 20.0, 2.0, 0.4]);
        assert_eq!(frame.globals.params[3], 0.0);
        assert_eq!(frame.trail[0][2], 1.0);
    }

    #[test]
    fn test_particles_respect_settings() {
        let mut state = GameState::new(1);
        for _ in 0..10 {
            state.particles.push(particle(1.0));
        }
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let frame = pack(&state, &settings, (400, 600), 0.0);
        assert_eq!(frame.globals.counts[1], 0);
    }

    #[test]
    fn test_overflow_is_clamped() {
        let mut state = GameState::new(1);
        for i in 0..20 {
            state.matches.push(Match::new(i as f32 * 10.0, 100.0, 0.0));
        }
        for _ in 0..500 {
            state.particles.push(particle(1.0));
        }
        let frame = pack(&state, &Settings::default(), (400, 600), 0.0);
        assert_eq!(frame.globals.counts[0] as usize, MAX_MATCHES);
        assert_eq!(frame.globals.counts[1] as usize, MAX_PARTICLES);
    }

    #[test]
    fn test_game_over_overlay_and_explosion() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        state.bomb.exploding = true;
        state.bomb.explosion_radius = 100.0;
        state.bomb.explosion_alpha = -0.0001;

        let frame = pack(&state, &Settings::default(), (400, 600), 0.0);
        assert_eq!(frame.globals.params[3], 1.0);
        assert_eq!(frame.globals.explosion, [1.0, 100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reduced_motion_steadies_bottom_flame() {
        let mut state = GameState::new(1);
        let mut m = Match::new(100.0, 100.0, 3.0);
        m.bottom_flame_size = 2.0;
        state.matches.push(m);

        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let frame = pack(&state, &settings, (400, 600), 12.3);
        assert_eq!(frame.matches[0].flames[2], 2.0);
        assert_eq!(frame.globals.params[2], 0.0);
    }
}
