/// 2D ray for scene queries

use glam::Vec2;

use super::aabb::Aabb;

/// A 2D ray as origin + direction (direction need not be normalized)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    pub direction: Vec2,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self { origin, direction }
    }

    /// Slab test against the xy extents of an AABB.
    ///
    /// Returns the parametric distance along the ray to the nearest hit,
    /// or None on a miss. A ray starting inside returns 0.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<f32> {
        if aabb.is_empty() {
            return None;
        }

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..2 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let min = aabb.min[axis];
            let max = aabb.max[axis];

            if dir.abs() < f32::EPSILON {
                // Parallel to the slab; miss unless origin lies within it
                if origin < min || origin > max {
                    return None;
                }
            } else {
                let inv = 1.0 / dir;
                let (t0, t1) = {
                    let a = (min - origin) * inv;
                    let b = (max - origin) * inv;
                    if a <= b { (a, b) } else { (b, a) }
                };
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return None;
                }
            }
        }

        if t_max < 0.0 {
            None
        } else {
            Some(t_min.max(0.0))
        }
    }
}
