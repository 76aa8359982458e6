/// Line shape: a single segment

use glam::{Vec2, Vec3};

use crate::graphics_device::DrawMode;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::Color;

use super::shape::{push_mesh_vertex, Shape};

/// A line segment between two points
pub struct Line {
    shape: Shape,
    a: Vec3,
    b: Vec3,
}

impl Line {
    /// Line between two points
    pub fn new(a: Vec3, b: Vec3, color: Color) -> Self {
        Self {
            shape: Shape::new(DrawMode::Lines, color),
            a,
            b,
        }
    }

    /// Line with an explicit thickness
    pub fn with_thickness(a: Vec3, b: Vec3, color: Color, thickness: f32) -> Self {
        let mut line = Self::new(a, b, color);
        line.shape.set_line_thickness(thickness);
        line
    }

    // ===== MODIFIERS =====

    /// Set the first endpoint
    pub fn set_a(&mut self, a: Vec3) {
        if self.a != a {
            self.a = a;
            self.shape.refresh();
        }
    }

    /// Set the second endpoint
    pub fn set_b(&mut self, b: Vec3) {
        if self.b != b {
            self.b = b;
            self.shape.refresh();
        }
    }

    /// Set the line thickness
    pub fn set_thickness(&mut self, thickness: f32) {
        self.shape.set_line_thickness(thickness);
    }

    // ===== OBSERVERS =====

    /// First endpoint
    pub fn a(&self) -> Vec3 {
        self.a
    }

    /// Second endpoint
    pub fn b(&self) -> Vec3 {
        self.b
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
        let (a, b, color) = (self.a, self.b, self.shape.fill_color());
        self.shape.sync(
            || {
                let mut out = Vec::with_capacity(2 * super::shape::MESH_VERTEX_COMPONENTS);
                push_mesh_vertex(&mut out, a, color, Vec2::ZERO);
                push_mesh_vertex(&mut out, b, color, Vec2::ONE);
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
