/// Rectangle shape: two triangles around a center position

use glam::{Vec2, Vec3};

use crate::graphics_device::DrawMode;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::Color;

use super::shape::{push_mesh_vertex, rotate_point, Shape};

/// Generate a rotated quad as two triangles (6 vertices) with the given
/// texture-coordinate corners
pub(crate) fn quad_vertices(
    position: Vec3,
    rotation: f32,
    size: Vec2,
    color: Color,
    lower_left_tex: Vec2,
    upper_right_tex: Vec2,
) -> Vec<f32> {
    let half = size * 0.5;
    let center = Vec2::new(position.x, position.y);

    let corner = |dx: f32, dy: f32| {
        let p = rotate_point(center + Vec2::new(dx, dy), center, rotation);
        Vec3::new(p.x, p.y, position.z)
    };

    let v1 = corner(-half.x, half.y);
    let v2 = corner(-half.x, -half.y);
    let v3 = corner(half.x, -half.y);
    let v4 = corner(half.x, half.y);

    let (ll, ur) = (lower_left_tex, upper_right_tex);
    let mut out = Vec::with_capacity(6 * super::shape::MESH_VERTEX_COMPONENTS);
    push_mesh_vertex(&mut out, v1, color, Vec2::new(ll.x, ur.y));
    push_mesh_vertex(&mut out, v2, color, Vec2::new(ll.x, ll.y));
    push_mesh_vertex(&mut out, v3, color, Vec2::new(ur.x, ll.y));
    push_mesh_vertex(&mut out, v3, color, Vec2::new(ur.x, ll.y));
    push_mesh_vertex(&mut out, v4, color, Vec2::new(ur.x, ur.y));
    push_mesh_vertex(&mut out, v1, color, Vec2::new(ll.x, ur.y));
    out
}

/// An axis-alignable filled rectangle
pub struct Rectangle {
    shape: Shape,
    position: Vec3,
    rotation: f32,
    size: Vec2,
}

impl Rectangle {
    /// Rectangle at the origin
    pub fn new(size: Vec2, color: Color) -> Self {
        Self::with_position(Vec3::ZERO, size, color)
    }

    /// Rectangle at the given center position
    pub fn with_position(position: Vec3, size: Vec2, color: Color) -> Self {
        Self {
            shape: Shape::new(DrawMode::Triangles, color),
            position,
            rotation: 0.0,
            size,
        }
    }

    // ===== MODIFIERS =====

    /// Set the center position
    pub fn set_position(&mut self, position: Vec3) {
        if self.position != position {
            self.position = position;
            self.shape.refresh();
        }
    }

    /// Set the rotation in radians
    pub fn set_rotation(&mut self, rotation: f32) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.shape.refresh();
        }
    }

    /// Set the size
    pub fn set_size(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.shape.refresh();
        }
    }

    // ===== OBSERVERS =====

    /// Center position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Shape core (color, material, visibility, primitive key)
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Shape core, mutably
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    // ===== PREPARE =====

    pub(crate) fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        let (position, rotation, size, color) =
            (self.position, self.rotation, self.size, self.shape.fill_color());
        self.shape.sync(
            || quad_vertices(position, rotation, size, color, Vec2::ZERO, Vec2::ONE),
            ctx,
            renderer,
        );
    }

    pub(crate) fn detach(&mut self, renderer: &mut Renderer) {
        self.shape.detach(renderer);
    }
}
