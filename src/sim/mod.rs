//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick order
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Collected, Resolution, aabb_overlap, player_hits, resolve, roll_decay};
pub use difficulty::compute_modifier;
pub use spawner::{Edge, spawn_from_edge, try_spawn};
pub use state::{
    Arena, GameOverCause, Hazard, HazardKind, Intent, Player, SessionMode, SessionState,
};
pub use tick::{GameEvent, SessionSnapshot, TickInput, tick};
