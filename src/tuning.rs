//! Data-driven game balance
//!
//! Loaded from an optional JSON file; defaults reproduce the classic ClockStorm feel.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_SPEED_MODIFIER_LIMIT;
use crate::error::SimError;
use crate::sim::state::{Arena, HazardKind};

/// Errors raised while loading or saving tuning files
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to access tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SimError),
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Side length of the player square
    pub player_size: f32,
    /// Pixels moved per tick per active direction
    pub player_speed: f32,
    /// Start position is this far above the bottom edge, horizontally centred
    pub player_start_offset_y: f32,

    // === Hazards ===
    pub hazard_radius: f32,
    /// Inward speed before the modifier is applied
    pub hazard_base_speed: f32,
    /// A spawn happens when a roll in [0, spawn_roll_max) is below this
    pub spawn_chance: u32,
    pub spawn_roll_max: u32,
    /// Equally weighted slots; repeat a kind to make it more likely
    pub kind_table: Vec<HazardKind>,
    /// Remove hazards once they leave the arena
    pub cull_offscreen: bool,

    // === Scoring ===
    pub start_score: i32,
    /// Run ends when the score falls below this
    pub survival_threshold: i32,
    pub bonus_high_points: i32,
    pub bonus_low_points: i32,
    /// Decay roll is uniform in [decay_roll_min, decay_roll_max]
    pub decay_roll_min: u32,
    pub decay_roll_max: u32,
    /// Score drops by one when the decay roll is below this.
    /// `decay_roll_max + 1` makes every roll decay.
    pub decay_chance: u32,

    // === Difficulty ===
    pub base_modifier: f32,
    /// Score points per unit of modifier (lower = steeper)
    pub modifier_change_rate: f32,
    pub min_modifier: f32,
    pub max_modifier: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: 30.0,
            player_speed: 3.0,
            player_start_offset_y: 50.0,

            hazard_radius: 20.0,
            hazard_base_speed: 3.0,
            spawn_chance: 2,
            spawn_roll_max: 100,
            kind_table: vec![
                HazardKind::Hostile,
                HazardKind::BonusHigh,
                HazardKind::BonusLow,
                HazardKind::Hostile,
                HazardKind::Hostile,
            ],
            cull_offscreen: true,

            start_score: 10,
            survival_threshold: 1,
            bonus_high_points: 3,
            bonus_low_points: 1,
            decay_roll_min: 1,
            decay_roll_max: 1000,
            decay_chance: 10,

            base_modifier: 1.2,
            modifier_change_rate: 50.0,
            min_modifier: 1.0,
            max_modifier: 2.5,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.player_size) {
            return Err(SimError::InvalidTuning("player_size must be positive"));
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(SimError::InvalidTuning("player_speed must not be negative"));
        }
        if !(self.player_start_offset_y.is_finite() && self.player_start_offset_y >= 0.0) {
            return Err(SimError::InvalidTuning("player_start_offset_y must not be negative"));
        }
        if !positive(self.hazard_radius) {
            return Err(SimError::InvalidTuning("hazard_radius must be positive"));
        }
        if !positive(self.hazard_base_speed) {
            return Err(SimError::InvalidTuning("hazard_base_speed must be positive"));
        }
        if self.spawn_roll_max == 0 || self.spawn_chance > self.spawn_roll_max {
            return Err(SimError::InvalidTuning("spawn_chance must lie within spawn_roll_max"));
        }
        if self.kind_table.is_empty() {
            return Err(SimError::InvalidTuning("kind_table must not be empty"));
        }
        if self.decay_roll_min > self.decay_roll_max {
            return Err(SimError::InvalidTuning("decay_roll_min exceeds decay_roll_max"));
        }
        if self.decay_chance > self.decay_roll_max.saturating_add(1) {
            return Err(SimError::InvalidTuning("decay_chance must lie within decay_roll_max + 1"));
        }
        if !positive(self.modifier_change_rate) {
            return Err(SimError::InvalidTuning("modifier_change_rate must be positive"));
        }
        let in_limit = |v: f32| v.is_finite() && (0.0..=MAX_SPEED_MODIFIER_LIMIT).contains(&v);
        if !(in_limit(self.min_modifier) && in_limit(self.max_modifier)) {
            return Err(SimError::InvalidTuning("modifier bounds out of range"));
        }
        if self.min_modifier > self.max_modifier {
            return Err(SimError::InvalidTuning("min_modifier exceeds max_modifier"));
        }
        if !in_limit(self.base_modifier) {
            return Err(SimError::InvalidTuning("base_modifier out of range"));
        }
        if !(self.min_modifier..=self.max_modifier).contains(&self.base_modifier) {
            return Err(SimError::InvalidTuning(
                "base_modifier must lie within [min_modifier, max_modifier]",
            ));
        }
        Ok(())
    }

    /// Player spawn corner for an arena, kept inside its bounds
    pub fn player_start(&self, arena: &Arena) -> Vec2 {
        let max = Vec2::new(
            (arena.width - self.player_size).max(0.0),
            (arena.height - self.player_size).max(0.0),
        );
        Vec2::new(arena.width / 2.0, arena.height - self.player_start_offset_y)
            .clamp(Vec2::ZERO, max)
    }

    /// Points awarded for collecting a hazard (hostiles award nothing)
    pub fn points_for(&self, kind: HazardKind) -> i32 {
        match kind {
            HazardKind::Hostile => 0,
            HazardKind::BonusHigh => self.bonus_high_points,
            HazardKind::BonusLow => self.bonus_low_points,
        }
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load a tuning file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No tuning file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write the tuning as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), TuningError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Tuning saved to {}", path.display());
        Ok(())
    }
}
