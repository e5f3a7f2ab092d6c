//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, reads
//! input devices or touches the clock:
//! - Variable timestep, normalized to 16 ms reference ticks
//! - Injected randomness only
//! - Items processed in spawn order

pub mod autopilot;
pub mod avatar;
pub mod catch;
pub mod geometry;
pub mod modifier;
pub mod random;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod stack;
pub mod state;

pub use avatar::Avatar;
pub use catch::{CatchSimulation, level_for_score};
pub use geometry::{CatchZone, Rect};
pub use modifier::{ModifierKind, ModifierSet, ModifierState};
pub use random::{RandomSource, ScriptedRandom, SeededRng};
pub use session::{Session, Simulation};
pub use snapshot::{BoxView, CatchSnapshot, ItemView, ModifierView, StackSnapshot};
pub use spawn::{SpawnClock, SpecialSchedule};
pub use stack::{Camera, StackEntry, StackSimulation, Wobble};
pub use state::{
    EndCause, FallingItem, GameEvent, GameOverStats, GamePhase, ItemKind, SpecialKind, TrashKind,
};
