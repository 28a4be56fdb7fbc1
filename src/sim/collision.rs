//! Collision and scoring
//!
//! The player square and every orb are compared by their axis-aligned
//! bounds. Touching edges count as contact.

use glam::Vec2;
use rand::Rng;

use super::state::{Hazard, HazardKind, Player};
use crate::tuning::Tuning;

/// A bonus orb picked up this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collected {
    pub id: u32,
    pub kind: HazardKind,
    pub points: i32,
}

/// Result of resolving one tick of contacts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Score after applying every pickup
    pub score: i32,
    pub collected: Vec<Collected>,
    /// Id of the hostile orb that ended the run, if any
    pub hostile_hit: Option<u32>,
}

/// Inclusive AABB overlap test
#[inline]
pub fn aabb_overlap(a_min: Vec2, a_max: Vec2, b_min: Vec2, b_max: Vec2) -> bool {
    a_min.x <= b_max.x && a_max.x >= b_min.x && a_min.y <= b_max.y && a_max.y >= b_min.y
}

/// Check whether the player touches a hazard
pub fn player_hits(player: &Player, hazard: &Hazard) -> bool {
    let (p_min, p_max) = player.bounds();
    let (h_min, h_max) = hazard.bounds();
    aabb_overlap(p_min, p_max, h_min, h_max)
}

/// Resolve every contact between the player and the live hazards.
///
/// Touched orbs are removed whatever their kind. A hostile contact stops
/// processing immediately; orbs after it are left for the next tick.
pub fn resolve(player: &Player, hazards: &mut Vec<Hazard>, score: i32, tuning: &Tuning) -> Resolution {
    let mut resolution = Resolution {
        score,
        ..Default::default()
    };

    let mut i = 0;
    while i < hazards.len() {
        if !player_hits(player, &hazards[i]) {
            i += 1;
            continue;
        }

        let hazard = hazards.remove(i);
        match hazard.kind {
            HazardKind::Hostile => {
                log::debug!("Player hit hostile orb {}", hazard.id);
                resolution.hostile_hit = Some(hazard.id);
                break;
            }
            HazardKind::BonusHigh | HazardKind::BonusLow => {
                let points = tuning.points_for(hazard.kind);
                resolution.score = resolution.score.saturating_add(points);
                resolution.collected.push(Collected {
                    id: hazard.id,
                    kind: hazard.kind,
                    points,
                });
                log::debug!("Collected {:?} orb {} (+{})", hazard.kind, hazard.id, points);
            }
        }
    }

    resolution
}

/// Roll the once-per-tick score decay. Returns true when a point was lost.
pub fn roll_decay<R: Rng + ?Sized>(rng: &mut R, score: &mut i32, tuning: &Tuning) -> bool {
    let roll = rng.random_range(tuning.decay_roll_min..=tuning.decay_roll_max);
    if roll < tuning.decay_chance {
        *score = score.saturating_sub(1);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), 30.0, 3.0).unwrap()
    }

    fn orb(id: u32, x: f32, y: f32, kind: HazardKind) -> Hazard {
        let mut h = Hazard::new(Vec2::new(x, y), Vec2::ZERO, kind, 20.0);
        h.id = id;
        h
    }

    #[test]
    fn test_aabb_overlap_touching_counts() {
        assert!(aabb_overlap(
            Vec2::ZERO,
            Vec2::splat(10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 10.0)
        ));
        assert!(!aabb_overlap(
            Vec2::ZERO,
            Vec2::splat(10.0),
            Vec2::new(10.1, 0.0),
            Vec2::new(20.0, 10.0)
        ));
    }

    #[test]
    fn test_player_hits_uses_orb_bounds() {
        let player = player_at(100.0, 100.0);
        // Orb bounds reach x = 100 exactly
        assert!(player_hits(&player, &orb(1, 80.0, 115.0, HazardKind::BonusLow)));
        assert!(!player_hits(&player, &orb(1, 79.0, 115.0, HazardKind::BonusLow)));
    }

    #[test]
    fn test_bonus_high_adds_reward_and_removes_orb() {
        let player = player_at(100.0, 100.0);
        let mut hazards = vec![
            orb(1, 115.0, 115.0, HazardKind::BonusHigh),
            orb(2, 500.0, 500.0, HazardKind::Hostile),
        ];
        let tuning = Tuning::default();

        let res = resolve(&player, &mut hazards, 10, &tuning);
        assert_eq!(res.score, 13);
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].id, 2);
        assert!(res.hostile_hit.is_none());
        assert_eq!(
            res.collected,
            vec![Collected {
                id: 1,
                kind: HazardKind::BonusHigh,
                points: 3
            }]
        );
    }

    #[test]
    fn test_multiple_bonuses_are_additive() {
        let player = player_at(100.0, 100.0);
        let mut hazards = vec![
            orb(1, 110.0, 110.0, HazardKind::BonusLow),
            orb(2, 120.0, 120.0, HazardKind::BonusHigh),
            orb(3, 125.0, 105.0, HazardKind::BonusLow),
        ];
        let res = resolve(&player, &mut hazards, 4, &Tuning::default());
        assert_eq!(res.score, 9);
        assert!(hazards.is_empty());
    }

    #[test]
    fn test_hostile_short_circuits() {
        let player = player_at(100.0, 100.0);
        let mut hazards = vec![
            orb(1, 110.0, 110.0, HazardKind::Hostile),
            orb(2, 120.0, 120.0, HazardKind::BonusHigh),
        ];
        let res = resolve(&player, &mut hazards, 10, &Tuning::default());
        assert_eq!(res.hostile_hit, Some(1));
        assert_eq!(res.score, 10);
        // The bonus behind the hostile is left untouched
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].id, 2);
    }

    #[test]
    fn test_decay_never_fires_at_zero_chance() {
        let mut rng = Pcg32::seed_from_u64(9);
        let tuning = Tuning {
            decay_chance: 0,
            ..Default::default()
        };
        let mut score = 10;
        for _ in 0..10_000 {
            assert!(!roll_decay(&mut rng, &mut score, &tuning));
        }
        assert_eq!(score, 10);
    }

    #[test]
    fn test_decay_always_fires_when_certain() {
        let mut rng = Pcg32::seed_from_u64(9);
        let tuning = Tuning {
            decay_chance: 1001,
            ..Default::default()
        };
        let mut score = 3;
        assert!(roll_decay(&mut rng, &mut score, &tuning));
        assert!(roll_decay(&mut rng, &mut score, &tuning));
        assert_eq!(score, 1);
    }

    #[test]
    fn test_default_decay_rate() {
        let mut rng = Pcg32::seed_from_u64(77);
        let tuning = Tuning::default();
        let mut score = 0;
        for _ in 0..100_000 {
            roll_decay(&mut rng, &mut score, &tuning);
        }
        // 9 of 1000 rolls land below 10
        assert!((-1_100..=-700).contains(&score), "score {}", score);
    }
}
