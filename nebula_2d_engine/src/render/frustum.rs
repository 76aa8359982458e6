/// Frustum: produces the projection matrix for a camera
///
/// Supports orthographic and perspective projection over a 2D clip plane.
/// A degenerate depth range (far == near) is a caller bug; asserted in
/// debug builds and treated as a no-op (identity) in release.

use glam::{Mat4, Vec2};

/// Projection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    Orthographic,
    Perspective,
}

/// A view frustum over a 2D clip plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    projection: ProjectionType,
    /// Clip plane corners as (left, bottom) and (right, top)
    lower_left: Vec2,
    upper_right: Vec2,
    near_clip_distance: f32,
    far_clip_distance: f32,
    /// Vertical field of view in radians (perspective only)
    field_of_view: f32,
}

impl Frustum {
    /// Orthographic frustum over the given clip plane
    pub fn orthographic(
        lower_left: Vec2,
        upper_right: Vec2,
        near_clip_distance: f32,
        far_clip_distance: f32,
    ) -> Self {
        Self {
            projection: ProjectionType::Orthographic,
            lower_left,
            upper_right,
            near_clip_distance,
            far_clip_distance,
            field_of_view: std::f32::consts::FRAC_PI_2,
        }
    }

    /// Perspective frustum with the given vertical field of view
    pub fn perspective(
        field_of_view: f32,
        near_clip_distance: f32,
        far_clip_distance: f32,
    ) -> Self {
        Self {
            projection: ProjectionType::Perspective,
            lower_left: Vec2::new(-1.0, -1.0),
            upper_right: Vec2::new(1.0, 1.0),
            near_clip_distance,
            far_clip_distance,
            field_of_view,
        }
    }

    // ===== OBSERVERS =====

    /// Projection kind
    pub fn projection(&self) -> ProjectionType {
        self.projection
    }

    /// Clip plane corners as (lower left, upper right)
    pub fn clip_plane(&self) -> (Vec2, Vec2) {
        (self.lower_left, self.upper_right)
    }

    /// Near clip distance
    pub fn near_clip_distance(&self) -> f32 {
        self.near_clip_distance
    }

    /// Far clip distance
    pub fn far_clip_distance(&self) -> f32 {
        self.far_clip_distance
    }

    /// Vertical field of view in radians
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    // ===== MATRICES =====

    /// Projection matrix for the given viewport aspect ratio
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let depth = self.far_clip_distance - self.near_clip_distance;
        debug_assert!(depth != 0.0, "degenerate frustum: far == near");
        if depth == 0.0 {
            return Mat4::IDENTITY;
        }

        match self.projection {
            ProjectionType::Orthographic => Mat4::orthographic_rh_gl(
                self.lower_left.x,
                self.upper_right.x,
                self.lower_left.y,
                self.upper_right.y,
                self.near_clip_distance,
                self.far_clip_distance,
            ),
            ProjectionType::Perspective => Mat4::perspective_rh_gl(
                self.field_of_view,
                if aspect_ratio > 0.0 { aspect_ratio } else { 1.0 },
                self.near_clip_distance,
                self.far_clip_distance,
            ),
        }
    }
}

impl Default for Frustum {
    /// Orthographic over [-1, 1] x [-1, 1] with depth [-1, 1]
    fn default() -> Self {
        Self::orthographic(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0), -1.0, 1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
