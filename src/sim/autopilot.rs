//! Idle/demo steering
//!
//! Picks movement flags for the player: run from the closest red orb when it
//! gets near, otherwise chase the closest bonus, otherwise drift home to the
//! middle of the arena.

use glam::Vec2;

use super::state::{HazardKind, Intent, SessionState};

/// Hostile orbs closer than this (centre to centre) trigger evasion
pub const DANGER_RADIUS: f32 = 110.0;
/// Dead zone so the player doesn't jitter around its target
const STEER_DEADBAND: f32 = 4.0;

/// Choose intent flags for the current state
pub fn steer(state: &SessionState) -> Intent {
    let me = state.player.center();

    let nearest = |want: fn(HazardKind) -> bool| {
        state
            .hazards
            .iter()
            .filter(|h| want(h.kind))
            .map(|h| (h.pos, h.pos.distance(me)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    };

    if let Some((threat, dist)) = nearest(|k| k == HazardKind::Hostile) {
        if dist < DANGER_RADIUS {
            // Flee directly away; mirror the target through the player
            return toward(me, me + (me - threat));
        }
    }

    if let Some((bonus, _)) = nearest(|k| k != HazardKind::Hostile) {
        return toward(me, bonus);
    }

    toward(me, state.arena.center())
}

fn toward(from: Vec2, to: Vec2) -> Intent {
    let d = to - from;
    Intent {
        left: d.x < -STEER_DEADBAND,
        right: d.x > STEER_DEADBAND,
        up: d.y < -STEER_DEADBAND,
        down: d.y > STEER_DEADBAND,
    }
}
