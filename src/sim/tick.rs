//! Fixed-order simulation tick
//!
//! Order per tick: spawn, move player, move hazards (and cull), resolve
//! contacts, score decay, recompute difficulty, survival check.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision::{resolve, roll_decay};
use super::spawner::try_spawn;
use super::state::{GameOverCause, Hazard, HazardKind, Intent, Player, SessionMode, SessionState};
use crate::error::SimError;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement directions
    pub intent: Intent,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - steering replaces `intent`
    pub autopilot: bool,
}

/// Something that happened during a tick, for UI and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: HazardKind },
    Collected { id: u32, kind: HazardKind, points: i32 },
    ScoreDecayed { score: i32 },
    Culled { id: u32 },
    Paused,
    Resumed,
    GameOver { cause: GameOverCause },
}

/// Everything the rendering layer needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time_ticks: u64,
    pub mode: SessionMode,
    pub score: i32,
    pub speed_modifier: f32,
    pub games_played: u32,
    pub player: Player,
    pub hazards: Vec<Hazard>,
    pub game_over_cause: Option<GameOverCause>,
    pub events: Vec<GameEvent>,
}

impl SessionSnapshot {
    pub fn capture(state: &SessionState, events: Vec<GameEvent>) -> Self {
        Self {
            time_ticks: state.time_ticks,
            mode: state.mode,
            score: state.score,
            speed_modifier: state.speed_modifier,
            games_played: state.games_played,
            player: state.player.clone(),
            hazards: state.hazards.clone(),
            game_over_cause: state.game_over_cause,
            events,
        }
    }
}

/// Advance the session by one tick
pub fn tick(state: &mut SessionState, input: &TickInput) -> Result<SessionSnapshot, SimError> {
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match state.mode {
            SessionMode::Running => {
                state.mode = SessionMode::Paused;
                events.push(GameEvent::Paused);
                log::info!("Paused at tick {}", state.time_ticks);
                return Ok(SessionSnapshot::capture(state, events));
            }
            SessionMode::Paused => {
                state.mode = SessionMode::Running;
                events.push(GameEvent::Resumed);
                log::info!("Resumed at tick {}", state.time_ticks);
            }
            SessionMode::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.mode != SessionMode::Running {
        return Ok(SessionSnapshot::capture(state, events));
    }

    state.time_ticks += 1;

    state.player.intent = if input.autopilot {
        autopilot::steer(state)
    } else {
        input.intent
    };

    // 1. Spawn
    if let Some(hazard) = try_spawn(&mut state.rng, &state.arena, state.speed_modifier, &state.tuning)? {
        let kind = hazard.kind;
        let id = state.push_hazard(hazard);
        events.push(GameEvent::Spawned { id, kind });
    }

    // 2. Player
    state.player.advance(&state.arena);

    // 3. Hazards
    for hazard in &mut state.hazards {
        hazard.advance();
    }
    if state.tuning.cull_offscreen {
        let arena = state.arena;
        state.hazards.retain(|h| {
            let gone = arena.circle_outside(h.pos, h.radius);
            if gone {
                events.push(GameEvent::Culled { id: h.id });
            }
            !gone
        });
    }

    // 4. Contacts
    let resolution = resolve(&state.player, &mut state.hazards, state.score, &state.tuning);
    state.score = resolution.score;
    events.extend(resolution.collected.iter().map(|c| GameEvent::Collected {
        id: c.id,
        kind: c.kind,
        points: c.points,
    }));
    if resolution.hostile_hit.is_some() {
        state.refresh_modifier();
        return Ok(finish_run(state, GameOverCause::HitHostile, events));
    }

    // 5. Decay
    if roll_decay(&mut state.rng, &mut state.score, &state.tuning) {
        events.push(GameEvent::ScoreDecayed { score: state.score });
    }

    // 6. Difficulty
    state.refresh_modifier();

    // 7. Survival
    if state.score < state.tuning.survival_threshold {
        return Ok(finish_run(state, GameOverCause::ScoreDepleted, events));
    }

    // Ensure deterministic ordering
    state.normalize_order();

    Ok(SessionSnapshot::capture(state, events))
}

fn finish_run(
    state: &mut SessionState,
    cause: GameOverCause,
    mut events: Vec<GameEvent>,
) -> SessionSnapshot {
    state.end_run(cause);
    log::info!(
        "Game over after {} ticks: {} (score {})",
        state.time_ticks,
        cause.message(),
        state.score
    );
    events.push(GameEvent::GameOver { cause });
    state.normalize_order();
    SessionSnapshot::capture(state, events)
}
