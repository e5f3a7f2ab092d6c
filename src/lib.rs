//! Trash Arcade - simulation core for the raccoon arcade games
//!
//! Core modules:
//! - `sim`: Simulation (catch and stack variants, physics, collisions, spawning)
//! - `tuning`: Data-driven game balance, loadable from JSON
//! - `highscores`: In-memory session leaderboard
//! - `error`: Tuning load/validation errors
//!
//! Drawing, input wiring and screen transitions live in the host.

pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use highscores::HighScores;
pub use sim::{CatchSimulation, Simulation, StackSimulation};
pub use tuning::{CatchTuning, StackTuning};

/// Game-wide timing constants
pub mod consts {
    /// Reference tick all per-frame rates are expressed against (~60 Hz)
    pub const REFERENCE_TICK_MS: f32 = 16.0;
    /// Upper bound on the smoothing step, in reference ticks
    pub const MAX_SMOOTHING_TICKS: f32 = 2.0;
    /// Default starting lives for every variant
    pub const STARTING_LIVES: u32 = 3;
}

/// Convert a frame delta to reference ticks (`dt / 16`)
#[inline]
pub fn frame_ticks(dt_ms: f32) -> f32 {
    dt_ms / consts::REFERENCE_TICK_MS
}

/// Reference ticks used for smoothing, capped so long frames can't overshoot
#[inline]
pub fn smoothing_ticks(dt_ms: f32) -> f32 {
    frame_ticks(dt_ms).min(consts::MAX_SMOOTHING_TICKS)
}

/// Sanitize a host-supplied frame delta (negative or NaN becomes 0)
#[inline]
pub fn sanitize_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 }
}
