//! Shared simulation types
//!
//! Items, phases and the events a simulation reports to its host.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::modifier::ModifierKind;

/// Session phase. A fresh simulation is already `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Run ended; state is frozen until restart
    Ended,
}

/// Ordinary trash, worth points and nothing else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrashKind {
    Can,
    Bottle,
    Box,
    Newspaper,
    Bag,
    Tire,
    Battery,
    Shoe,
    Sock,
    Paper,
}

impl TrashKind {
    pub const ALL: [TrashKind; 10] = [
        TrashKind::Can,
        TrashKind::Bottle,
        TrashKind::Box,
        TrashKind::Newspaper,
        TrashKind::Bag,
        TrashKind::Tire,
        TrashKind::Battery,
        TrashKind::Shoe,
        TrashKind::Sock,
        TrashKind::Paper,
    ];

    /// Default point value
    pub fn points(self) -> u64 {
        match self {
            TrashKind::Can | TrashKind::Newspaper | TrashKind::Shoe | TrashKind::Sock => 10,
            TrashKind::Bottle | TrashKind::Bag | TrashKind::Battery | TrashKind::Paper => 15,
            TrashKind::Box | TrashKind::Tire => 20,
        }
    }
}

/// Power-up items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    GoldenSneaker,
    RedBerry,
    GreenFish,
}

impl SpecialKind {
    /// Modifier started when this item is caught
    pub fn effect(self) -> ModifierKind {
        match self {
            SpecialKind::GoldenSneaker => ModifierKind::SpeedBoost,
            SpecialKind::RedBerry => ModifierKind::Grow,
            SpecialKind::GreenFish => ModifierKind::Shrink,
        }
    }
}

/// Category tag of a falling item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Trash(TrashKind),
    Special(SpecialKind),
    /// A falling raccoon in the stack game
    Critter,
}

impl ItemKind {
    pub fn is_special(self) -> bool {
        matches!(self, ItemKind::Special(_))
    }
}

/// Something falling through the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    /// Top-left corner, world space
    pub pos: Vec2,
    pub size: Vec2,
    /// Downward speed per reference tick
    pub vy: f32,
    /// Cosmetic rotation (radians)
    pub rotation: f32,
    /// Cosmetic spin per reference tick
    pub spin: f32,
    pub kind: ItemKind,
    pub points: u64,
}

impl FallingItem {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Advance fall and spin by `ticks` reference ticks
    pub fn advance(&mut self, ticks: f32) {
        self.pos.y += self.vy * ticks;
        self.rotation = (self.rotation + self.spin * ticks).rem_euclid(std::f32::consts::TAU);
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCause {
    OutOfLives,
    StackCollapsed,
}

/// Final numbers reported once when a run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverStats {
    pub final_score: u64,
    /// Catch: level reached. Stack: entries stacked.
    pub reached: u32,
    /// Stack only: height in meters
    pub height_m: Option<f32>,
    pub cause: EndCause,
    pub items_caught: u32,
    pub items_missed: u32,
    pub elapsed_ms: f64,
    /// Session best after this run
    pub best_score: u64,
    /// Place on the session board (1-based), if the score made it
    pub rank: Option<usize>,
    pub new_best: bool,
}

/// Notifications drained by the host after each update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemCaught { id: u32, kind: ItemKind, points: u64 },
    ItemMissed { id: u32, kind: ItemKind, life_lost: bool },
    ItemLanded { id: u32, stack_len: u32 },
    LevelUp { level: u32 },
    ModifierStarted(ModifierKind),
    ModifierExpired(ModifierKind),
    GameOver(GameOverStats),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trash_points_table() {
        let total: u64 = TrashKind::ALL.iter().map(|k| k.points()).sum();
        assert_eq!(total, 140);
    }

    #[test]
    fn test_special_effects() {
        assert_eq!(SpecialKind::GoldenSneaker.effect(), ModifierKind::SpeedBoost);
        assert_eq!(SpecialKind::RedBerry.effect(), ModifierKind::Grow);
        assert_eq!(SpecialKind::GreenFish.effect(), ModifierKind::Shrink);
        assert!(ItemKind::Special(SpecialKind::RedBerry).is_special());
        assert!(!ItemKind::Critter.is_special());
    }

    #[test]
    fn test_item_advance() {
        let mut item = FallingItem {
            id: 1,
            pos: Vec2::new(0.0, 0.0),
            size: Vec2::splat(40.0),
            vy: 2.0,
            rotation: 0.0,
            spin: 0.05,
            kind: ItemKind::Trash(TrashKind::Can),
            points: 10,
        };
        item.advance(1.5);
        assert!((item.pos.y - 3.0).abs() < 1e-6);
        assert!((item.rotation - 0.075).abs() < 1e-6);
        assert_eq!(item.bottom(), item.pos.y + 40.0);
    }
}
