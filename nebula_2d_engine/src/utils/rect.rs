/// Axis-aligned rectangle in 2D, used for texture-coordinate areas

use glam::Vec2;

/// A 2D rectangle as (min, max) corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// The unit square [0, 1] x [0, 1]
    pub const UNIT: Rect = Rect {
        min: Vec2::ZERO,
        max: Vec2::ONE,
    };

    /// Create a rectangle from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle size (max - min)
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True if the rectangle has no area
    pub fn is_degenerate(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Both corners clamped to the unit square
    pub fn clamped_to_unit(&self) -> Rect {
        Rect {
            min: self.min.clamp(Vec2::ZERO, Vec2::ONE),
            max: self.max.clamp(Vec2::ZERO, Vec2::ONE),
        }
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}
