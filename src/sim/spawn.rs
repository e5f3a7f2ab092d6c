//! Spawn timing, difficulty ramp and special-item scheduling

use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::state::{ItemKind, SpecialKind};
use crate::tuning::{DifficultyRamp, SpawnTuning, SpecialRule, TrashEntry};

/// Spawn timer plus the difficulty ramp that shortens its interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnClock {
    tuning: SpawnTuning,
    timer_ms: f32,
    interval_ms: f32,
    difficulty_ms: f32,
}

impl SpawnClock {
    pub fn new(tuning: SpawnTuning) -> Self {
        Self {
            tuning,
            timer_ms: -tuning.initial_delay_ms,
            interval_ms: tuning.interval_ms,
            difficulty_ms: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.tuning);
    }

    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    pub fn timer_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Advance by `dt_ms`; returns true when an item is due
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.timer_ms += dt_ms;
        let due = self.timer_ms >= self.interval_ms;
        if due {
            self.timer_ms = 0.0;
            if let DifficultyRamp::PerSpawn { step_ms } = self.tuning.ramp {
                self.shorten(step_ms);
            }
        }

        if let DifficultyRamp::Timed { every_ms, step_ms } = self.tuning.ramp {
            self.difficulty_ms += dt_ms;
            if self.difficulty_ms >= every_ms {
                self.shorten(step_ms);
                self.difficulty_ms = 0.0;
            }
        }
        due
    }

    fn shorten(&mut self, step_ms: f32) {
        self.interval_ms = (self.interval_ms - step_ms).max(self.tuning.min_interval_ms);
    }
}

/// Per-category record of when a special item last appeared and may next appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSchedule {
    pub kind: SpecialKind,
    pub last_spawn_level: u32,
    pub next_spawn_level: u32,
}

impl SpecialSchedule {
    pub fn new(rule: &SpecialRule, rng: &mut impl RandomSource) -> Self {
        Self {
            kind: rule.kind,
            last_spawn_level: 0,
            next_spawn_level: rule.min_level + rng.between(rule.first_delay.0, rule.first_delay.1),
        }
    }

    /// At most once per level, never before `next_spawn_level`
    pub fn is_due(&self, level: u32) -> bool {
        level >= self.next_spawn_level && self.last_spawn_level != level
    }

    pub fn mark_spawned(&mut self, level: u32, rule: &SpecialRule, rng: &mut impl RandomSource) {
        self.last_spawn_level = level;
        self.next_spawn_level = level + rng.between(rule.respawn_gap.0, rule.respawn_gap.1);
    }
}

/// Build fresh schedules for every rule, in rule order
pub fn schedules_for(rules: &[SpecialRule], rng: &mut impl RandomSource) -> Vec<SpecialSchedule> {
    rules.iter().map(|r| SpecialSchedule::new(r, rng)).collect()
}

/// Pick the kind of the next item: the first due special in priority order,
/// otherwise a uniformly random trash entry. Returns the kind and its points.
pub fn choose_kind(
    level: u32,
    rules: &[SpecialRule],
    schedules: &mut [SpecialSchedule],
    trash: &[TrashEntry],
    rng: &mut impl RandomSource,
) -> (ItemKind, u64) {
    for (rule, schedule) in rules.iter().zip(schedules.iter_mut()) {
        if schedule.is_due(level) {
            schedule.mark_spawned(level, rule, rng);
            log::debug!(
                "Special {:?} at level {}, next at {}",
                rule.kind,
                level,
                schedule.next_spawn_level
            );
            return (ItemKind::Special(rule.kind), rule.points);
        }
    }
    let entry = trash[rng.index(trash.len())];
    (ItemKind::Trash(entry.kind), entry.points)
}
