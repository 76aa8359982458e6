/// Ellipse shape: a triangle fan around the center

use glam::{Vec2, Vec3};

use crate::graphics_device::DrawMode;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::Color;

use super::shape::{push_mesh_vertex, rotate_point, Shape};

const DEFAULT_SIDES: usize = 36;

/// A filled ellipse approximated by a triangle fan
pub struct Ellipse {
    shape: Shape,
    position: Vec3,
    rotation: f32,
    /// Full diameters on x and y
    size: Vec2,
    sides: usize,
}

impl Ellipse {
    /// Ellipse at the origin
    pub fn new(size: Vec2, color: Color) -> Self {
        Self::with_position(Vec3::ZERO, size, color)
    }

    /// Ellipse at the given center position
    pub fn with_position(position: Vec3, size: Vec2, color: Color) -> Self {
        Self {
            shape: Shape::new(DrawMode::TriangleFan, color),
            position,
            rotation: 0.0,
            size,
            sides: DEFAULT_SIDES,
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

    /// Set the diameters
    pub fn set_size(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.shape.refresh();
        }
    }

    /// Set the number of perimeter segments (minimum 3)
    pub fn set_sides(&mut self, sides: usize) {
        let sides = sides.max(3);
        if self.sides != sides {
            self.sides = sides;
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

    /// Diameters
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Perimeter segment count
    pub fn sides(&self) -> usize {
        self.sides
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
        let (position, rotation, size, sides, color) = (
            self.position,
            self.rotation,
            self.size,
            self.sides,
            self.shape.fill_color(),
        );

        self.shape.sync(
            || {
                let center = Vec2::new(position.x, position.y);
                let radius = size * 0.5;
                let mut out = Vec::with_capacity((sides + 2) * super::shape::MESH_VERTEX_COMPONENTS);

                // Fan center, tex coord at the middle
                push_mesh_vertex(&mut out, position, color, Vec2::new(0.5, 0.5));

                for i in 0..=sides {
                    let angle = i as f32 / sides as f32 * std::f32::consts::TAU;
                    let (sin, cos) = angle.sin_cos();
                    let point = rotate_point(
                        center + Vec2::new(cos * radius.x, sin * radius.y),
                        center,
                        rotation,
                    );
                    push_mesh_vertex(
                        &mut out,
                        Vec3::new(point.x, point.y, position.z),
                        color,
                        Vec2::new(0.5 + cos * 0.5, 0.5 + sin * 0.5),
                    );
                }

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
