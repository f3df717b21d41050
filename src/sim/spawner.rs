//! Match spawning and scrolling

use rand::Rng;

use super::state::{Match, Viewport};
use crate::consts::*;

/// Spawn a new match at the right edge unless the last one is still too close.
///
/// Returns true if a match was created.
pub fn try_spawn(matches: &mut Vec<Match>, rng: &mut impl Rng, viewport: &Viewport) -> bool {
    if let Some(last) = matches.last() {
        if last.x > viewport.width - MIN_MATCH_SPACING {
            return false;
        }
    }

    // Leave room for the gap plus a minimum stick length above and below
    let span = (viewport.height - MATCH_GAP - 2.0 * MATCH_MARGIN).max(0.0);
    let top_height = MATCH_MARGIN + rng.random::<f32>() * span;
    let offset = rng.random::<f32>() * FLAME_OFFSET_RANGE;

    matches.push(Match::new(viewport.width, top_height, offset));
    log::debug!("Spawned match (top {:.0}, {} active)", top_height, matches.len());
    true
}

/// Scroll every match left and animate its flames
pub fn advance_all(matches: &mut [Match], speed: f32, time_ms: f32) {
    let top_flame = (time_ms / 200.0).sin() * FLAME_AMPLITUDE;
    let bottom_flame = (time_ms / 300.0).sin() * FLAME_AMPLITUDE;
    for m in matches.iter_mut() {
        m.x -= speed;
        m.flame_size = top_flame;
        m.bottom_flame_size = bottom_flame;
    }
}

/// Drop matches that have scrolled fully past the left edge
pub fn prune_offscreen(matches: &mut Vec<Match>) {
    matches.retain(|m| m.x > -m.width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_spawn_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut matches = Vec::new();
        let viewport = Viewport::default();

        assert!(try_spawn(&mut matches, &mut rng, &viewport));
        let m = &matches[0];
        assert_eq!(m.x, viewport.width);
        assert_eq!(m.gap, MATCH_GAP);
        assert!(!m.passed);
        assert!(m.top_height >= 50.0 && m.top_height < 350.0);
        assert!(m.bottom_start() <= viewport.height - MATCH_MARGIN);
        assert!(m.bottom_flame_offset >= 0.0 && m.bottom_flame_offset < 10.0);
    }

    #[test]
    fn test_spawn_guard() {
        let mut rng = Pcg32::seed_from_u64(4);
        let viewport = Viewport::default();
        let mut matches = vec![Match::new(201.0, 100.0, 0.0)];

        // 201 > 400 - 200: too close
        assert!(!try_spawn(&mut matches, &mut rng, &viewport));
        assert_eq!(matches.len(), 1);

        // Exactly at the threshold is allowed
        matches[0].x = 200.0;
        assert!(try_spawn(&mut matches, &mut rng, &viewport));
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_advance_and_prune() {
        let mut matches = vec![Match::new(-17.0, 100.0, 0.0), Match::new(300.0, 100.0, 0.0)];
        advance_all(&mut matches, MATCH_SPEED, 0.0);
        assert_eq!(matches[0].x, -19.0);
        assert_eq!(matches[1].x, 298.0);

        prune_offscreen(&mut matches);
        assert_eq!(matches.len(), 2);

        advance_all(&mut matches, MATCH_SPEED, 0.0);
        prune_offscreen(&mut matches);
        // x = -21 < -width
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].x, 296.0);
    }

    #[test]
    fn test_flames_are_bounded() {
        let mut matches = vec![Match::new(100.0, 100.0, 0.0)];
        for t in 0..500 {
            advance_all(&mut matches, 0.0, t as f32 * 16.7);
            assert!(matches[0].flame_size.abs() <= FLAME_AMPLITUDE);
            assert!(matches[0].bottom_flame_size.abs() <= FLAME_AMPLITUDE);
        }
    }

    proptest! {
        #[test]
        fn prop_consecutive_spawns_are_spaced(seed in any::<u64>(), attempts in 1usize..40, step in 1u32..400) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let viewport = Viewport::default();
            let mut matches: Vec<Match> = Vec::new();

            for _ in 0..attempts {
                let before = matches.last().map(|m| m.x);
                let spawned = try_spawn(&mut matches, &mut rng, &viewport);
                match before {
                    Some(x) if spawned => prop_assert!(viewport.width - x >= MIN_MATCH_SPACING),
                    Some(x) => prop_assert!(x > viewport.width - MIN_MATCH_SPACING),
                    None => prop_assert!(spawned),
                }
                advance_all(&mut matches, step as f32, 0.0);
                prune_offscreen(&mut matches);
            }
        }
    }
}
