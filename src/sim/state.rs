//! Session state and core simulation types
//!
//! Everything the tick loop mutates lives in [`SessionState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::compute_modifier;
use crate::error::SimError;
use crate::tuning::Tuning;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    /// Active gameplay
    Running,
    /// Ticks are suspended; state is kept intact
    Paused,
    /// Run ended, waiting for restart or quit
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Player touched a hostile hazard
    HitHostile,
    /// Score dropped below the survival threshold
    ScoreDepleted,
}

impl GameOverCause {
    /// Message shown in the game-over prompt
    pub fn message(&self) -> &'static str {
        match self {
            GameOverCause::HitHostile => "Game over! You hit a red orb!",
            GameOverCause::ScoreDepleted => "You have no score left!",
        }
    }
}

/// Hazard categories (closed set, matched exhaustively by the collision engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Red orb: ends the run on contact
    Hostile,
    /// Green orb: large reward
    BonusHigh,
    /// Blue orb: small reward
    BonusLow,
}

/// A moving hazard (orb)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    /// Centre position, arena-local
    pub pos: Vec2,
    /// Units per tick, fixed at spawn (already scaled by the speed modifier)
    pub vel: Vec2,
    pub kind: HazardKind,
    pub radius: f32,
}

impl Hazard {
    /// Create an unregistered hazard (id is assigned when it joins a session)
    pub fn new(pos: Vec2, vel: Vec2, kind: HazardKind, radius: f32) -> Self {
        Self {
            id: 0,
            pos,
            vel,
            kind,
            radius,
        }
    }

    /// Advance by exactly one tick of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Axis-aligned bounds of the orb as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let r = Vec2::splat(self.radius);
        (self.pos - r, self.pos + r)
    }
}

/// Movement intent flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Rectangular playing field with the origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True once a circle has left the arena entirely
    pub fn circle_outside(&self, pos: Vec2, radius: f32) -> bool {
        pos.x + radius < 0.0
            || pos.y + radius < 0.0
            || pos.x - radius > self.width
            || pos.y - radius > self.height
    }
}

/// The player-controlled square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub intent: Intent,
}

impl Player {
    pub fn new(pos: Vec2, size: f32, speed: f32) -> Result<Self, SimError> {
        let valid = pos.is_finite()
            && pos.x >= 0.0
            && pos.y >= 0.0
            && size.is_finite()
            && size > 0.0
            && speed.is_finite()
            && speed >= 0.0;
        if !valid {
            return Err(SimError::InvalidPlayer { x: pos.x, y: pos.y, size, speed });
        }
        Ok(Self {
            pos,
            size,
            speed,
            intent: Intent::default(),
        })
    }

    /// Apply one tick of intent-driven motion, then hard-clamp into the arena
    pub fn advance(&mut self, arena: &Arena) {
        let max = self.max_corner(arena);

        if self.intent.left && self.pos.x > 0.0 {
            self.pos.x -= self.speed;
        }
        if self.intent.right && self.pos.x < max.x {
            self.pos.x += self.speed;
        }
        if self.intent.up && self.pos.y > 0.0 {
            self.pos.y -= self.speed;
        }
        if self.intent.down && self.pos.y < max.y {
            self.pos.y += self.speed;
        }

        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }

    /// Largest legal top-left corner
    #[inline]
    pub fn max_corner(&self, arena: &Arena) -> Vec2 {
        Vec2::new(
            (arena.width - self.size).max(0.0),
            (arena.height - self.size).max(0.0),
        )
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + Vec2::splat(self.size))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Complete session state, owned by the tick loop
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub tuning: Tuning,
    pub mode: SessionMode,
    /// May dip below zero for the rest of a tick before the survival check
    pub score: i32,
    /// Completed runs before the current one
    pub games_played: u32,
    pub speed_modifier: f32,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    /// Where the player returns to on restart
    pub player_start: Vec2,
    pub player: Player,
    /// Live hazards (sorted by id)
    pub hazards: Vec<Hazard>,
    /// Set when the current run ended
    pub game_over_cause: Option<GameOverCause>,
    next_id: u32,
}

impl SessionState {
    /// Create a running session in a validated arena
    pub fn new(arena: Arena, tuning: Tuning, seed: u64) -> Result<Self, SimError> {
        tuning.validate()?;
        if arena.width < tuning.player_size || arena.height < tuning.player_size {
            return Err(SimError::InvalidArena {
                width: arena.width,
                height: arena.height,
            });
        }

        let player_start = tuning.player_start(&arena);
        let player = Player::new(player_start, tuning.player_size, tuning.player_speed)?;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            mode: SessionMode::Running,
            score: tuning.start_score,
            games_played: 0,
            speed_modifier: 0.0,
            time_ticks: 0,
            player_start,
            player,
            hazards: Vec::new(),
            game_over_cause: None,
            next_id: 1,
            tuning,
        };
        state.refresh_modifier();
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a hazard, assigning its id
    pub fn push_hazard(&mut self, mut hazard: Hazard) -> u32 {
        hazard.id = self.next_entity_id();
        let id = hazard.id;
        self.hazards.push(hazard);
        id
    }

    /// Recompute the speed modifier from the current score
    pub fn refresh_modifier(&mut self) {
        let t = &self.tuning;
        self.speed_modifier = compute_modifier(
            self.score,
            t.start_score,
            t.base_modifier,
            t.modifier_change_rate,
            t.min_modifier,
            t.max_modifier,
        );
    }

    /// End the current run
    pub fn end_run(&mut self, cause: GameOverCause) {
        self.mode = SessionMode::GameOver;
        self.game_over_cause = Some(cause);
    }

    /// Reset the run in place (player, hazards, score, modifier)
    pub fn reset_run(&mut self) {
        self.games_played += 1;
        self.player.pos = self.player_start;
        self.player.intent = Intent::default();
        self.hazards.clear();
        self.score = self.tuning.start_score;
        self.time_ticks = 0;
        self.game_over_cause = None;
        self.mode = SessionMode::Running;
        self.refresh_modifier();
    }

    /// Ensure hazards are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.hazards.sort_by_key(|h| h.id);
    }
}
