//! Scoring: one point per match the bomb has fully cleared

use super::state::{Bomb, Match};

/// Award a point for every newly passed match. Returns the points awarded.
pub fn evaluate(bomb: &Bomb, matches: &mut [Match], score: &mut u32) -> u32 {
    let mut awarded = 0;
    for m in matches.iter_mut().filter(|m| !m.passed) {
        if m.right_edge() < bomb.pos.x {
            m.passed = true;
            awarded += 1;
        }
    }
    *score += awarded;
    awarded
}
