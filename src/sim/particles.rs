//! Explosion debris
//!
//! Particles are purely visual: they never feed back into gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::*;
use crate::hsl_to_rgb;

/// Spawn `count` particles at `origin` with random size, velocity and warm hue
pub fn emit(particles: &mut Vec<Particle>, rng: &mut impl Rng, origin: Vec2, count: usize) {
    particles.reserve(count);
    for _ in 0..count {
        let size = rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE);
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
        );
        let hue = rng.random_range(PARTICLE_HUE_MIN..PARTICLE_HUE_MAX);
        particles.push(Particle {
            pos: origin,
            vel,
            size,
            color: hsl_to_rgb(hue, 1.0, 0.5),
            life: 1.0,
        });
    }
}

/// Move every particle and burn down its life
pub fn advance_all(particles: &mut [Particle]) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
}

/// Drop particles whose life ran out
pub fn prune_expired(particles: &mut Vec<Particle>) {
    particles.retain(|p| p.life > 0.0);
}

/// One particle tick: advance, then prune so nothing dead is left to draw
pub fn update(particles: &mut Vec<Particle>) {
    advance_all(particles);
    prune_expired(particles);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_emit_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        emit(&mut particles, &mut rng, Vec2::new(50.0, 300.0), 200);
        assert_eq!(particles.len(), 200);

        for p in &particles {
            assert_eq!(p.pos, Vec2::new(50.0, 300.0));
            assert!(p.size >= 1.0 && p.size < 4.0);
            assert!(p.vel.x >= -3.0 && p.vel.x < 3.0);
            assert!(p.vel.y >= -3.0 && p.vel.y < 3.0);
            assert_eq!(p.life, 1.0);
            // Orange through yellow: saturated, no blue
            assert!((p.color[0].max(p.color[1]) - 1.0).abs() < 1e-4);
            assert!(p.color[2].abs() < 1e-4);
        }
    }

    #[test]
    fn test_lifespan_is_about_fifty_ticks() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = Vec::new();
        emit(&mut particles, &mut rng, Vec2::ZERO, 1);

        let mut ticks = 0;
        while !particles.is_empty() {
            update(&mut particles);
            ticks += 1;
            assert!(ticks <= 51);
        }
        assert!((49..=51).contains(&ticks));
    }

    #[test]
    fn test_advance_moves_by_velocity() {
        let mut particles = vec![Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::new(1.5, -2.0),
            size: 2.0,
            color: [1.0, 0.6, 0.0],
            life: 1.0,
        }];
        advance_all(&mut particles);
        assert_eq!(particles[0].pos, Vec2::new(11.5, 8.0));
        assert!((particles[0].life - 0.98).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_live_particles_have_positive_life(seed in any::<u64>(), ticks in 0usize..80) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut particles = Vec::new();
            for _ in 0..ticks {
                emit(&mut particles, &mut rng, Vec2::ZERO, 5);
                update(&mut particles);
                for p in &particles {
                    prop_assert!(p.life > 0.0 && p.life <= 1.0);
                }
            }
        }
    }
}
