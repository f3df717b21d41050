//! Collision detection between the bomb, the matches and the playfield edges
//!
//! The bomb collides as a square box of half-width `HIT_BOX`, smaller than its
//! drawn radius. Near misses that graze the sprite are part of the game feel.

use super::state::{Bomb, Match, Viewport};
use crate::consts::HIT_BOX;

/// What the bomb ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Top or bottom stick of a match
    Match,
    /// Left the playfield vertically
    Bounds,
}

/// Check the bomb's hit box against a single match
pub fn bomb_match_collision(bomb: &Bomb, m: &Match) -> bool {
    let overlaps_x = bomb.pos.x + HIT_BOX > m.x && bomb.pos.x - HIT_BOX < m.right_edge();
    if !overlaps_x {
        return false;
    }
    bomb.pos.y - HIT_BOX < m.top_height || bomb.pos.y + HIT_BOX > m.bottom_start()
}

/// Check the bomb against every match in play
pub fn check_collision(bomb: &Bomb, matches: &[Match]) -> bool {
    matches.iter().any(|m| bomb_match_collision(bomb, m))
}

/// The bomb's center has left the playfield (above the top or below the bottom)
pub fn out_of_bounds(bomb: &Bomb, viewport: &Viewport) -> bool {
    bomb.pos.y < 0.0 || bomb.pos.y > viewport.height
}

/// Find the first collision for this tick, if any
pub fn detect(bomb: &Bomb, matches: &[Match], viewport: &Viewport) -> Option<CollisionKind> {
    if check_collision(bomb, matches) {
        Some(CollisionKind::Match)
    } else if out_of_bounds(bomb, viewport) {
        Some(CollisionKind::Bounds)
    } else {
        None
    }
}
