/// Oriented bounding box in 2D

use glam::{Mat4, Vec2};

use super::aabb::Aabb;

/// An oriented 2D bounding box as four corners.
///
/// Corner order is (min, min), (max, min), (max, max), (min, max) of the
/// source AABB before transformation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Obb {
    pub corners: [Vec2; 4],
}

impl Obb {
    /// Build an OBB by transforming an AABB's xy corners
    pub fn from_aabb(aabb: &Aabb, matrix: &Mat4) -> Self {
        if aabb.is_empty() {
            return Self::default();
        }

        let corners = [
            Vec2::new(aabb.min.x, aabb.min.y),
            Vec2::new(aabb.max.x, aabb.min.y),
            Vec2::new(aabb.max.x, aabb.max.y),
            Vec2::new(aabb.min.x, aabb.max.y),
        ];

        Self {
            corners: corners.map(|c| matrix.transform_point3(c.extend(0.0)).truncate()),
        }
    }

    /// Center of the box
    pub fn center(&self) -> Vec2 {
        (self.corners[0] + self.corners[1] + self.corners[2] + self.corners[3]) * 0.25
    }
}
