//! Session bookkeeping shared by every variant
//!
//! Score, lives, phase, the event queue and the in-memory high score board.
//! Game-over goes through `finish`, which only ever fires once per run.

use serde::Serialize;

use super::state::{EndCause, GameEvent, GameOverStats, GamePhase, ItemKind};
use crate::highscores::HighScores;

/// Lifecycle seam implemented by every simulation so one host loop can drive
/// any variant.
pub trait Simulation {
    type Snapshot: Serialize;

    /// Reset everything except the session high score board
    fn restart(&mut self);
    /// Advance by one frame of wall-clock time
    fn update(&mut self, dt_ms: f32);
    /// Desired avatar left edge; clamped before use
    fn set_target_x(&mut self, x: f32);
    /// Read-only render data
    fn snapshot(&self) -> Self::Snapshot;
    fn phase(&self) -> GamePhase;
    fn drain_events(&mut self) -> Vec<GameEvent>;
    /// Built-in steering for demo/headless play
    fn autopilot_target(&self) -> Option<f32>;
}

#[derive(Debug, Clone)]
pub struct Session {
    starting_lives: u32,
    score: u64,
    lives: u32,
    phase: GamePhase,
    items_caught: u32,
    items_missed: u32,
    elapsed_ms: f64,
    events: Vec<GameEvent>,
    result: Option<GameOverStats>,
    high_scores: HighScores,
}

impl Session {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            starting_lives,
            score: 0,
            lives: starting_lives,
            phase: GamePhase::Running,
            items_caught: 0,
            items_missed: 0,
            elapsed_ms: 0.0,
            events: Vec::new(),
            result: None,
            high_scores: HighScores::new(),
        }
    }

    /// Start a fresh run; the high score board is kept
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.starting_lives;
        self.phase = GamePhase::Running;
        self.items_caught = 0;
        self.items_missed = 0;
        self.elapsed_ms = 0.0;
        self.events.clear();
        self.result = None;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn result(&self) -> Option<&GameOverStats> {
        self.result.as_ref()
    }

    pub fn advance_clock(&mut self, dt_ms: f32) {
        self.elapsed_ms += f64::from(dt_ms);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Credit a caught item
    pub fn record_catch(&mut self, id: u32, kind: ItemKind, points: u64) {
        self.score += points;
        self.items_caught += 1;
        self.emit(GameEvent::ItemCaught { id, kind, points });
    }

    /// Record a landed stack entry; each one is worth a point
    pub fn record_landing(&mut self, id: u32, stack_len: u32) {
        self.score += 1;
        self.items_caught += 1;
        self.emit(GameEvent::ItemLanded { id, stack_len });
    }

    /// Record a miss. Returns true when this miss used up the last life.
    pub fn record_miss(&mut self, id: u32, kind: ItemKind, costs_life: bool) -> bool {
        self.items_missed += 1;
        if costs_life {
            self.lives = self.lives.saturating_sub(1);
        }
        self.emit(GameEvent::ItemMissed {
            id,
            kind,
            life_lost: costs_life,
        });
        costs_life && self.lives == 0
    }

    /// End the run. Only the first call has any effect; returns whether this
    /// call performed the transition.
    pub fn finish(&mut self, reached: u32, height_m: Option<f32>, cause: EndCause) -> bool {
        if self.phase == GamePhase::Ended {
            return false;
        }
        self.phase = GamePhase::Ended;

        let previous_best = self.high_scores.best();
        let rank = self.high_scores.add_score(self.score, reached, self.elapsed_ms);
        let stats = GameOverStats {
            final_score: self.score,
            reached,
            height_m,
            cause,
            items_caught: self.items_caught,
            items_missed: self.items_missed,
            elapsed_ms: self.elapsed_ms,
            best_score: self.high_scores.best(),
            rank,
            new_best: self.score > previous_best,
        };
        log::info!(
            "Game over ({:?}): score {}, best {}, rank {:?}",
            cause,
            stats.final_score,
            stats.best_score,
            stats.rank
        );
        self.result = Some(stats.clone());
        self.emit(GameEvent::GameOver(stats));
        true
    }
}
