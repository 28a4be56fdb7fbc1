//! ClockStorm - a bullet-hell survival arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring, difficulty)
//! - `session`: Run lifecycle (game over, restart, quit) around the simulation
//! - `ledger`: Append-only score history
//! - `platform`: Input sharing between the input source and the tick loop
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod ledger;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use ledger::{FileLedger, LedgerStats, MemoryLedger, ScoreLedger};
pub use session::{FinalScore, GameSummary, Session, start_session};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame rate the tick loop is designed for
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Largest speed modifier the spawner accepts
    pub const MAX_SPEED_MODIFIER_LIMIT: f32 = 1000.0;
}
