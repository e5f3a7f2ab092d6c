//! The player-controlled avatar
//!
//! The avatar never jumps to the input target; it closes a fraction of the
//! remaining distance each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::smoothing_ticks;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Desired left edge, set from input
    pub target_x: f32,
    /// Fraction of the remaining distance covered per reference tick
    pub speed: f32,
}

impl Avatar {
    pub fn new(size: Vec2, speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            target_x: 0.0,
            speed,
        }
    }

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

    /// Rightmost legal left edge for a playfield of `field_width`
    #[inline]
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.size.x).max(0.0)
    }

    /// Place the avatar horizontally centered, target included
    pub fn center_in(&mut self, field_width: f32) {
        self.pos.x = self.max_x(field_width) / 2.0;
        self.target_x = self.pos.x;
    }

    /// Move toward `target` by `speed * min(dt/16, 2)` of the remaining gap
    pub fn steer_toward(&mut self, target: f32, dt_ms: f32) {
        let dx = target - self.pos.x;
        self.pos.x += dx * self.speed * smoothing_ticks(dt_ms);
    }

    /// Keep both the position and the target inside the playfield
    pub fn clamp_to(&mut self, field_width: f32) {
        let max_x = self.max_x(field_width);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
        self.target_x = self.target_x.clamp(0.0, max_x);
    }
}
