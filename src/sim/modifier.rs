//! Timed player modifiers (speed boost, growth, shrink)
//!
//! Each modifier is a two-state machine. Growth and shrink exclude each other.

use serde::{Deserialize, Serialize};

/// Kinds of timed modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Faster tracking, and misses cost no life while active
    SpeedBoost,
    /// Oversized avatar
    Grow,
    /// Tiny avatar
    Shrink,
}

impl ModifierKind {
    /// The modifier cancelled when this one activates
    pub fn excludes(self) -> Option<ModifierKind> {
        match self {
            ModifierKind::Grow => Some(ModifierKind::Shrink),
            ModifierKind::Shrink => Some(ModifierKind::Grow),
            ModifierKind::SpeedBoost => None,
        }
    }

    /// Whether this modifier scales the avatar's size (vs. its speed)
    pub fn affects_size(self) -> bool {
        !matches!(self, ModifierKind::SpeedBoost)
    }
}

/// Duration and strength of a modifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModifierTuning {
    pub kind: ModifierKind,
    pub duration_ms: f32,
    pub multiplier: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModifierState {
    Inactive,
    Active { remaining_ms: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    pub tuning: ModifierTuning,
    pub state: ModifierState,
}

impl Modifier {
    pub fn is_active(&self) -> bool {
        matches!(self.state, ModifierState::Active { .. })
    }

    pub fn remaining_ms(&self) -> f32 {
        match self.state {
            ModifierState::Active { remaining_ms } => remaining_ms,
            ModifierState::Inactive => 0.0,
        }
    }
}

/// The modifiers a variant supports, and their current state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierSet {
    slots: Vec<Modifier>,
}

impl ModifierSet {
    pub fn new(tunings: &[ModifierTuning]) -> Self {
        Self {
            slots: tunings
                .iter()
                .map(|&tuning| Modifier {
                    tuning,
                    state: ModifierState::Inactive,
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.slots.iter()
    }

    fn slot(&self, kind: ModifierKind) -> Option<&Modifier> {
        self.slots.iter().find(|m| m.tuning.kind == kind)
    }

    pub fn is_active(&self, kind: ModifierKind) -> bool {
        self.slot(kind).is_some_and(Modifier::is_active)
    }

    pub fn remaining_ms(&self, kind: ModifierKind) -> f32 {
        self.slot(kind).map_or(0.0, Modifier::remaining_ms)
    }

    /// Start (or restart) a modifier, cancelling its exclusive partner.
    /// Returns false if this variant has no such modifier.
    pub fn activate(&mut self, kind: ModifierKind) -> bool {
        if self.slot(kind).is_none() {
            return false;
        }
        let excluded = kind.excludes();
        for m in &mut self.slots {
            if m.tuning.kind == kind {
                m.state = ModifierState::Active {
                    remaining_ms: m.tuning.duration_ms,
                };
            } else if Some(m.tuning.kind) == excluded {
                m.state = ModifierState::Inactive;
            }
        }
        true
    }

    /// Count down active timers; returns the modifiers that just expired
    pub fn tick(&mut self, dt_ms: f32) -> Vec<ModifierKind> {
        let mut expired = Vec::new();
        for m in &mut self.slots {
            if let ModifierState::Active { remaining_ms } = m.state {
                let left = remaining_ms - dt_ms;
                if left <= 0.0 {
                    m.state = ModifierState::Inactive;
                    expired.push(m.tuning.kind);
                } else {
                    m.state = ModifierState::Active { remaining_ms: left };
                }
            }
        }
        expired
    }

    pub fn clear(&mut self) {
        for m in &mut self.slots {
            m.state = ModifierState::Inactive;
        }
    }

    /// Product of active speed multipliers
    pub fn speed_multiplier(&self) -> f32 {
        self.active_product(|k| !k.affects_size())
    }

    /// Product of active size multipliers
    pub fn size_multiplier(&self) -> f32 {
        self.active_product(ModifierKind::affects_size)
    }

    fn active_product(&self, filter: impl Fn(ModifierKind) -> bool) -> f32 {
        self.slots
            .iter()
            .filter(|m| m.is_active() && filter(m.tuning.kind))
            .map(|m| m.tuning.multiplier)
            .product()
    }
}
