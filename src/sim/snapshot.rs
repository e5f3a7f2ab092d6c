//! Read-only render data handed to the host each frame

use serde::Serialize;

use super::avatar::Avatar;
use super::modifier::ModifierKind;
use super::state::{FallingItem, GamePhase, ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Avatar> for BoxView {
    fn from(a: &Avatar) -> Self {
        Self {
            x: a.pos.x,
            y: a.pos.y,
            width: a.size.x,
            height: a.size.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: u32,
    pub bounds: BoxView,
    pub rotation: f32,
    pub kind: ItemKind,
}

impl From<&FallingItem> for ItemView {
    fn from(item: &FallingItem) -> Self {
        Self {
            id: item.id,
            bounds: BoxView {
                x: item.pos.x,
                y: item.pos.y,
                width: item.size.x,
                height: item.size.y,
            },
            rotation: item.rotation,
            kind: item.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModifierView {
    pub kind: ModifierKind,
    pub remaining_ms: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchSnapshot {
    pub phase: GamePhase,
    pub avatar: BoxView,
    /// Active modifiers only
    pub modifiers: Vec<ModifierView>,
    pub items: Vec<ItemView>,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub high_score: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSnapshot {
    pub phase: GamePhase,
    pub avatar: BoxView,
    /// Bottom entry first
    pub stack: Vec<BoxView>,
    pub falling: Vec<ItemView>,
    pub stacked: u32,
    pub height_m: f32,
    pub lives: u32,
    pub wobble: f32,
    /// Current collapse chance factor; collapse is possible above 1.0
    pub collapse_risk: f32,
    /// Vertical scroll applied by the renderer
    pub camera_y: f32,
    pub high_score: u64,
}
