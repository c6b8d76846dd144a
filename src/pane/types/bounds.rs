//! `Rect`: pixel-space rectangle used for pane placement and hit testing.

use super::common::DropSide;
use serde::{Deserialize, Serialize};

/// Rectangle in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position in pixels from left edge of content area
    pub x: f64,
    /// Y position in pixels from top of content area
    pub y: f64,
    /// Width in pixels
    pub w: f64,
    /// Height in pixels
    pub h: f64,
}

impl Rect {
    /// Create a new rect, clamping negative extents to zero
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Check if a point is inside this rect (right/bottom edges exclusive)
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Get the center point of the rect
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// The half of this rect lying on `side`
    pub fn half(&self, side: DropSide) -> Rect {
        let half_w = self.w / 2.0;
        let half_h = self.h / 2.0;
        match side {
            DropSide::Left => Rect::new(self.x, self.y, half_w, self.h),
            DropSide::Right => Rect::new(self.x + half_w, self.y, half_w, self.h),
            DropSide::Top => Rect::new(self.x, self.y, self.w, half_h),
            DropSide::Bottom => Rect::new(self.x, self.y + half_h, self.w, half_h),
        }
    }
}
