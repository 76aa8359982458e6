/// Camera attachable
///
/// Owns a frustum producing the projection matrix; the view matrix derives
/// from the scene node the camera is attached to.

use glam::{Mat4, Vec3};

use crate::render::Frustum;

/// A camera attachable to a scene node
#[derive(Debug, Clone)]
pub struct Camera {
    name: String,
    frustum: Frustum,
}

impl Camera {
    /// Camera with a default orthographic frustum
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frustum: Frustum::default(),
        }
    }

    /// Camera with a custom frustum
    pub fn with_frustum(name: impl Into<String>, frustum: Frustum) -> Self {
        Self {
            name: name.into(),
            frustum,
        }
    }

    /// Camera name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The frustum
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Replace the frustum
    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }

    /// View matrix for a camera at the given derived position/rotation:
    /// the inverse of the node's world transform
    pub fn view_matrix(position: Vec3, rotation: f32) -> Mat4 {
        Mat4::from_rotation_z(-rotation) * Mat4::from_translation(-position)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
