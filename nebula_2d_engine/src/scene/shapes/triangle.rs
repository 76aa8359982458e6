/// Triangle shape

use glam::{Vec2, Vec3};

use crate::graphics_device::DrawMode;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::Color;

use super::shape::{push_mesh_vertex, Shape};

/// A filled triangle over three points
pub struct Triangle {
    shape: Shape,
    a: Vec3,
    b: Vec3,
    c: Vec3,
}

impl Triangle {
    /// Triangle over three points
    pub fn new(a: Vec3, b: Vec3, c: Vec3, color: Color) -> Self {
        Self {
            shape: Shape::new(DrawMode::Triangles, color),
            a,
            b,
            c,
        }
    }

    // ===== MODIFIERS =====

    /// Set the first point
    pub fn set_a(&mut self, a: Vec3) {
        if self.a != a {
            self.a = a;
            self.shape.refresh();
        }
    }

    /// Set the second point
    pub fn set_b(&mut self, b: Vec3) {
        if self.b != b {
            self.b = b;
            self.shape.refresh();
        }
    }

    /// Set the third point
    pub fn set_c(&mut self, c: Vec3) {
        if self.c != c {
            self.c = c;
            self.shape.refresh();
        }
    }

    // ===== OBSERVERS =====

    /// First point
    pub fn a(&self) -> Vec3 {
        self.a
    }

    /// Second point
    pub fn b(&self) -> Vec3 {
        self.b
    }

    /// Third point
    pub fn c(&self) -> Vec3 {
        self.c
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
        let (a, b, c, color) = (self.a, self.b, self.c, self.shape.fill_color());
        self.shape.sync(
            || {
                let mut out = Vec::with_capacity(3 * super::shape::MESH_VERTEX_COMPONENTS);
                push_mesh_vertex(&mut out, a, color, Vec2::new(0.0, 0.0));
                push_mesh_vertex(&mut out, b, color, Vec2::new(1.0, 0.0));
                push_mesh_vertex(&mut out, c, color, Vec2::new(0.5, 1.0));
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
