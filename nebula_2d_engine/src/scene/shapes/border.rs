/// Border shape: a rectangular frame of the given thickness

use glam::{Vec2, Vec3};

use crate::graphics_device::DrawMode;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::Color;

use super::shape::{push_mesh_vertex, Shape, MESH_VERTEX_COMPONENTS};

/// A hollow rectangle: four side quads plus four corner quads
pub struct Border {
    shape: Shape,
    position: Vec3,
    /// Outer size of the frame
    size: Vec2,
    /// Thickness of the left/right and top/bottom sides
    border_size: Vec2,
}

impl Border {
    /// Border at the origin
    pub fn new(size: Vec2, border_size: Vec2, color: Color) -> Self {
        Self::with_position(Vec3::ZERO, size, border_size, color)
    }

    /// Border at the given center position
    pub fn with_position(position: Vec3, size: Vec2, border_size: Vec2, color: Color) -> Self {
        Self {
            shape: Shape::new(DrawMode::Triangles, color),
            position,
            size,
            border_size,
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

    /// Set the outer size
    pub fn set_size(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.shape.refresh();
        }
    }

    /// Set the side thicknesses
    pub fn set_border_size(&mut self, border_size: Vec2) {
        if self.border_size != border_size {
            self.border_size = border_size;
            self.shape.refresh();
        }
    }

    // ===== OBSERVERS =====

    /// Center position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Outer size
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Side thicknesses
    pub fn border_size(&self) -> Vec2 {
        self.border_size
    }

    /// Shape core
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Shape core, mutably
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    // ===== PREPARE =====

    pub(crate) fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        let (position, size, border, color) =
            (self.position, self.size, self.border_size, self.shape.fill_color());

        self.shape.sync(
            || {
                // Outer and inner rectangle corners around the center
                let outer_half = size * 0.5;
                let inner_half = (size * 0.5 - border).max(Vec2::ZERO);
                let center = Vec2::new(position.x, position.y);
                let z = position.z;

                let quad = |out: &mut Vec<f32>, min: Vec2, max: Vec2| {
                    let v1 = Vec3::new(min.x, max.y, z);
                    let v2 = Vec3::new(min.x, min.y, z);
                    let v3 = Vec3::new(max.x, min.y, z);
                    let v4 = Vec3::new(max.x, max.y, z);
                    push_mesh_vertex(out, v1, color, Vec2::new(0.0, 1.0));
                    push_mesh_vertex(out, v2, color, Vec2::new(0.0, 0.0));
                    push_mesh_vertex(out, v3, color, Vec2::new(1.0, 0.0));
                    push_mesh_vertex(out, v3, color, Vec2::new(1.0, 0.0));
                    push_mesh_vertex(out, v4, color, Vec2::new(1.0, 1.0));
                    push_mesh_vertex(out, v1, color, Vec2::new(0.0, 1.0));
                };

                let mut out = Vec::with_capacity(8 * 6 * MESH_VERTEX_COMPONENTS);

                // Sides: left, right, bottom, top (between the inner corners)
                quad(
                    &mut out,
                    center + Vec2::new(-outer_half.x, -inner_half.y),
                    center + Vec2::new(-inner_half.x, inner_half.y),
                );
                quad(
                    &mut out,
                    center + Vec2::new(inner_half.x, -inner_half.y),
                    center + Vec2::new(outer_half.x, inner_half.y),
                );
                quad(
                    &mut out,
                    center + Vec2::new(-inner_half.x, -outer_half.y),
                    center + Vec2::new(inner_half.x, -inner_half.y),
                );
                quad(
                    &mut out,
                    center + Vec2::new(-inner_half.x, inner_half.y),
                    center + Vec2::new(inner_half.x, outer_half.y),
                );

                // Corners: bottom-left, bottom-right, top-left, top-right
                quad(
                    &mut out,
                    center + Vec2::new(-outer_half.x, -outer_half.y),
                    center + Vec2::new(-inner_half.x, -inner_half.y),
                );
                quad(
                    &mut out,
                    center + Vec2::new(inner_half.x, -outer_half.y),
                    center + Vec2::new(outer_half.x, -inner_half.y),
                );
                quad(
                    &mut out,
                    center + Vec2::new(-outer_half.x, inner_half.y),
                    center + Vec2::new(-inner_half.x, outer_half.y),
                );
                quad(
                    &mut out,
                    center + Vec2::new(inner_half.x, inner_half.y),
                    center + Vec2::new(outer_half.x, outer_half.y),
                );

                out
            },
            ctx,
            renderer,
        );
    }

    pub(crate) fn detach(&mut self, renderer: &mut Renderer) {
        self.shape.detach(renderer);
    }
}
