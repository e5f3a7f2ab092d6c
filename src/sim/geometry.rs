//! Axis-aligned boxes and catch zones
//!
//! All collision in the game is box-vs-box. The avatar exposes its full
//! sprite box; a `CatchZone` carves the part of it that actually catches.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.min.x + self.size.x / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Which part of the avatar catches falling items
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "region", rename_all = "snake_case")]
pub enum CatchZone {
    /// The whole sprite box
    #[default]
    FullBody,
    /// Top `fraction` of the sprite (e.g. the head)
    TopBand { fraction: f32 },
    /// Bottom `fraction` of the sprite (e.g. the trash can it carries)
    BottomBand { fraction: f32 },
}

impl CatchZone {
    /// Resolve the zone against the avatar's current box
    pub fn resolve(&self, body: Rect) -> Rect {
        match *self {
            CatchZone::FullBody => body,
            CatchZone::TopBand { fraction } => {
                let h = body.size.y * fraction.clamp(0.0, 1.0);
                Rect::new(body.min.x, body.min.y, body.size.x, h)
            }
            CatchZone::BottomBand { fraction } => {
                let h = body.size.y * fraction.clamp(0.0, 1.0);
                Rect::new(body.min.x, body.bottom() - h, body.size.x, h)
            }
        }
    }
}
