//! Hazard spawner
//!
//! Each tick there is a small chance of launching an orb from a random point
//! on one of the four arena edges. Orbs travel inward at a constant base
//! speed and drift toward the centre along the edge axis, so they converge
//! on the middle of the arena rather than crossing in straight lines.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Hazard, HazardKind};
use crate::consts::MAX_SPEED_MODIFIER_LIMIT;
use crate::error::SimError;
use crate::tuning::Tuning;

/// Arena edge an orb enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Length of the edge, i.e. the range of the free coordinate
    pub fn span(&self, arena: &Arena) -> f32 {
        match self {
            Edge::Top | Edge::Bottom => arena.width,
            Edge::Right | Edge::Left => arena.height,
        }
    }
}

/// Reject modifiers that are negative, non-finite or absurdly large
pub fn validate_speed_modifier(speed_modifier: f32) -> Result<(), SimError> {
    if speed_modifier.is_finite() && (0.0..=MAX_SPEED_MODIFIER_LIMIT).contains(&speed_modifier) {
        Ok(())
    } else {
        Err(SimError::InvalidSpeedModifier(speed_modifier))
    }
}

/// Roll for a spawn this tick.
///
/// Returns `Ok(None)` when the roll misses, which is the common case.
pub fn try_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    arena: &Arena,
    speed_modifier: f32,
    tuning: &Tuning,
) -> Result<Option<Hazard>, SimError> {
    validate_speed_modifier(speed_modifier)?;

    if rng.random_range(0..tuning.spawn_roll_max) >= tuning.spawn_chance {
        return Ok(None);
    }

    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along = rng.random_range(0.0..edge.span(arena));
    let kind = pick_kind(rng, &tuning.kind_table)
        .ok_or(SimError::InvalidTuning("kind_table must not be empty"))?;

    let hazard = spawn_from_edge(edge, along, arena, speed_modifier, tuning, kind);
    log::debug!(
        "Spawned {:?} from {:?} at ({:.1}, {:.1}) vel=({:.2}, {:.2})",
        hazard.kind,
        edge,
        hazard.pos.x,
        hazard.pos.y,
        hazard.vel.x,
        hazard.vel.y
    );
    Ok(Some(hazard))
}

/// Uniform draw over the category table
pub fn pick_kind<R: Rng + ?Sized>(rng: &mut R, table: &[HazardKind]) -> Option<HazardKind> {
    if table.is_empty() {
        return None;
    }
    Some(table[rng.random_range(0..table.len())])
}

/// Build an orb entering from `edge` at offset `along` on that edge
pub fn spawn_from_edge(
    edge: Edge,
    along: f32,
    arena: &Arena,
    speed_modifier: f32,
    tuning: &Tuning,
    kind: HazardKind,
) -> Hazard {
    let speed = tuning.hazard_base_speed;
    let center = arena.center();

    let (pos, vel) = match edge {
        Edge::Top => (
            Vec2::new(along, 0.0),
            Vec2::new((center.x - along) * speed / arena.width, speed),
        ),
        Edge::Right => (
            Vec2::new(arena.width, along),
            Vec2::new(-speed, (center.y - along) * speed / arena.height),
        ),
        Edge::Bottom => (
            Vec2::new(along, arena.height),
            Vec2::new((center.x - along) * speed / arena.width, -speed),
        ),
        Edge::Left => (
            Vec2::new(0.0, along),
            Vec2::new(speed, (center.y - along) * speed / arena.height),
        ),
    };

    Hazard::new(pos, vel * speed_modifier, kind, tuning.hazard_radius)
}
