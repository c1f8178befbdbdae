use serde::{Deserialize, Serialize};

use crate::marker::{ColoredRect, FillColor};

/// Image-to-physical scale, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactor {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactor {
    /// Map a rectangle from image units into physical units.
    ///
    /// Both corners are scaled on their own, so rectangles sharing an edge in
    /// the image share the exact same physical coordinate.
    pub fn apply(&self, rect: &ColoredRect) -> PhysicalRect {
        let (x0, y0) = (rect.x * self.x, rect.y * self.y);
        let x1 = (rect.x + rect.width) * self.x;
        let y1 = (rect.y + rect.height) * self.y;
        PhysicalRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
            color: rect.color.clone(),
        }
    }
}

/// A marker rectangle after scaling, in physical units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: FillColor,
}

impl PhysicalRect {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Intersect with the plate footprint `[0, w] x [0, h]`.
    /// Returns `None` when nothing of the rectangle lies on the plate.
    pub fn clip_to(&self, w: f64, h: f64) -> Option<PhysicalRect> {
        let x0 = self.x.max(0.0);
        let y0 = self.y.max(0.0);
        let x1 = (self.x + self.width).min(w);
        let y1 = (self.y + self.height).min(h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PhysicalRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
            color: self.color.clone(),
        })
    }
}
