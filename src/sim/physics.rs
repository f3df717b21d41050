//! Bomb motion and explosion

use rand::Rng;

use super::particles;
use super::state::{Bomb, Particle};
use crate::consts::*;

/// Apply one tick of gravity and derive the banking angle
pub fn advance(bomb: &mut Bomb) {
    bomb.velocity += GRAVITY;
    bomb.pos.y += bomb.velocity;
    bomb.rotation = (bomb.velocity / ROTATION_DAMPING).atan();
}

/// Kick the bomb upward. Ignored once it is exploding.
///
/// Returns true if the flap was applied.
pub fn apply_flap(bomb: &mut Bomb) -> bool {
    if bomb.exploding {
        return false;
    }
    bomb.velocity = FLAP_SPEED;
    true
}

/// Light the explosion. Returns true only on the first call.
pub fn trigger_explosion(bomb: &mut Bomb) -> bool {
    if bomb.exploding {
        return false;
    }
    bomb.exploding = true;
    bomb.explosion_ticks = 0;
    bomb.explosion_radius = 0.0;
    bomb.explosion_alpha = 1.0;
    true
}

/// Grow and fade the explosion, spraying debris.
///
/// Returns true once the explosion has fully faded.
pub fn advance_explosion(
    bomb: &mut Bomb,
    particles: &mut Vec<Particle>,
    rng: &mut impl Rng,
) -> bool {
    if !bomb.exploding {
        return false;
    }
    // Derived from the tick count so the fade lands on zero exactly
    bomb.explosion_ticks += 1;
    bomb.explosion_radius = bomb.explosion_ticks as f32 * EXPLOSION_GROWTH;
    bomb.explosion_alpha = 1.0 - bomb.explosion_ticks as f32 * EXPLOSION_FADE;

    particles::emit(particles, rng, bomb.pos, EXPLOSION_BURST);

    bomb.explosion_alpha <= 0.0
}
