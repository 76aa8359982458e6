/// Bounding sphere

use glam::Vec3;

use super::aabb::Aabb;

/// A bounding sphere as center + radius
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere from center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere enclosing an AABB
    pub fn from_aabb(aabb: &Aabb) -> Self {
        if aabb.is_empty() {
            return Self::default();
        }
        Self {
            center: aabb.center(),
            radius: aabb.half_size().length(),
        }
    }

    /// Test if two spheres overlap or touch
    pub fn intersects(&self, other: &Sphere) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }
}
