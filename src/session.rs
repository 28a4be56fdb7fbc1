//! Session lifecycle
//!
//! Wraps the simulation state with the score ledger and owns the
//! Running -> GameOver -> (restart | quit) flow. Ledger I/O only happens here,
//! never inside a tick.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::ledger::{DEFAULT_LEDGER_PATH, FileLedger, LedgerError, LedgerStats, ScoreLedger};
use crate::sim::state::{Arena, GameOverCause, SessionMode, SessionState};
use crate::sim::tick::{SessionSnapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Shown in the game-over prompt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub cause: Option<GameOverCause>,
    pub final_score: u32,
    /// Best score on record, including this run
    pub high_score: u32,
    /// Average over every recorded run, including this one
    pub average_score: f64,
    pub new_high_score: bool,
}

/// Returned when the player quits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    /// Score of the last run, clamped at 0
    pub score: u32,
    /// Runs that reached game over in this session
    pub games_played: u32,
    /// The last run was still live and was not recorded
    pub abandoned: bool,
}

/// A play session: the simulation plus its score ledger
pub struct Session<L: ScoreLedger> {
    state: SessionState,
    ledger: L,
    /// Final score of the current run has been appended to the ledger
    recorded: bool,
    summary: Option<GameSummary>,
}

/// Start a session with default tuning and the default on-disk ledger
pub fn start_session(arena_width: f32, arena_height: f32) -> Result<Session<FileLedger>, SimError> {
    Session::start(
        arena_width,
        arena_height,
        Tuning::default(),
        FileLedger::new(DEFAULT_LEDGER_PATH),
        rand::random(),
    )
}

impl<L: ScoreLedger> Session<L> {
    pub fn start(
        arena_width: f32,
        arena_height: f32,
        tuning: Tuning,
        ledger: L,
        seed: u64,
    ) -> Result<Self, SimError> {
        let arena = Arena::new(arena_width, arena_height)?;
        let state = SessionState::new(arena, tuning, seed)?;
        log::info!(
            "Session started: arena {}x{}, seed {}",
            arena_width,
            arena_height,
            seed
        );
        Ok(Self {
            state,
            ledger,
            recorded: false,
            summary: None,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn mode(&self) -> SessionMode {
        self.state.mode
    }

    /// Current state without advancing
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state, Vec::new())
    }

    /// Advance one tick
    pub fn tick(&mut self, input: &TickInput) -> Result<SessionSnapshot, SimError> {
        tick(&mut self.state, input)
    }

    /// Score as stored in the ledger
    fn final_score(&self) -> u32 {
        self.state.score.max(0) as u32
    }

    /// Record the finished run (once) and report how it compares.
    ///
    /// Ledger failures are logged and degrade to zeroed history.
    pub fn summary(&mut self) -> Result<GameSummary, SimError> {
        if self.state.mode != SessionMode::GameOver {
            return Err(SimError::NotGameOver);
        }
        if let Some(summary) = self.summary {
            return Ok(summary);
        }

        let prior = self.ledger.stats().unwrap_or_else(|e| {
            log::warn!("Could not read score history: {}", e);
            LedgerStats::default()
        });

        let final_score = self.final_score();
        match self.ledger.append(final_score) {
            Ok(()) => self.recorded = true,
            Err(e) => log::warn!("Could not record score {}: {}", final_score, e),
        }

        let games = prior.games + 1;
        let summary = GameSummary {
            cause: self.state.game_over_cause,
            final_score,
            high_score: prior.high_score.max(final_score),
            average_score: (prior.average * prior.games as f64 + f64::from(final_score))
                / games as f64,
            new_high_score: final_score > prior.high_score,
        };
        self.summary = Some(summary);
        Ok(summary)
    }

    /// Start a fresh run after game over
    pub fn restart(&mut self) -> Result<(), SimError> {
        if self.state.mode != SessionMode::GameOver {
            return Err(SimError::NotGameOver);
        }
        if !self.recorded {
            self.summary()?;
        }

        self.state.reset_run();
        self.recorded = false;
        self.summary = None;
        log::info!("Restarted, game #{}", self.state.games_played + 1);
        Ok(())
    }

    /// End the session.
    ///
    /// A finished run is recorded if that hasn't happened yet. A run that is
    /// still live (running or paused) is abandoned and never reaches the ledger.
    pub fn quit(mut self) -> Result<FinalScore, LedgerError> {
        let score = self.final_score();
        let finished = self.state.mode == SessionMode::GameOver;
        if finished && !self.recorded {
            self.ledger.append(score)?;
        }
        let final_score = FinalScore {
            score,
            games_played: self.state.games_played + u32::from(finished),
            abandoned: !finished,
        };
        if final_score.abandoned {
            log::info!("Abandoned live run at score {}", score);
        }
        log::info!(
            "Quit with score {} after {} game(s)",
            final_score.score,
            final_score.games_played
        );
        Ok(final_score)
    }
}
