/// Curve shape: a Bezier curve sampled into a line strip

use glam::{Vec2, Vec3};

use crate::graphics_device::DrawMode;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::Color;

use super::shape::{push_mesh_vertex, Shape};

const DEFAULT_SMOOTHNESS: usize = 32;

/// De Casteljau evaluation at parameter t
fn bezier_point(control_points: &[Vec3], t: f32) -> Vec3 {
    let mut points = control_points.to_vec();
    let mut count = points.len();

    while count > 1 {
        for i in 0..count - 1 {
            points[i] = points[i].lerp(points[i + 1], t);
        }
        count -= 1;
    }

    points[0]
}

/// A Bezier curve of arbitrary order drawn as a line strip
pub struct Curve {
    shape: Shape,
    control_points: Vec<Vec3>,
    /// Number of sampled segments
    smoothness: usize,
}

impl Curve {
    /// Curve over the given control points
    pub fn new(control_points: Vec<Vec3>, color: Color) -> Self {
        Self {
            shape: Shape::new(DrawMode::LineStrip, color),
            control_points,
            smoothness: DEFAULT_SMOOTHNESS,
        }
    }

    // ===== MODIFIERS =====

    /// Replace the control points
    pub fn set_control_points(&mut self, control_points: Vec<Vec3>) {
        self.control_points = control_points;
        self.shape.refresh();
    }

    /// Set the number of sampled segments (minimum 1)
    pub fn set_smoothness(&mut self, smoothness: usize) {
        let smoothness = smoothness.max(1);
        if self.smoothness != smoothness {
            self.smoothness = smoothness;
            self.shape.refresh();
        }
    }

    /// Set the line thickness
    pub fn set_thickness(&mut self, thickness: f32) {
        self.shape.set_line_thickness(thickness);
    }

    // ===== OBSERVERS =====

    /// Control points
    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Sampled segment count
    pub fn smoothness(&self) -> usize {
        self.smoothness
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
        let (control_points, smoothness, color) = (
            self.control_points.clone(),
            self.smoothness,
            self.shape.fill_color(),
        );

        self.shape.sync(
            || {
                if control_points.len() < 2 {
                    return Vec::new();
                }

                let mut out =
                    Vec::with_capacity((smoothness + 1) * super::shape::MESH_VERTEX_COMPONENTS);
                for i in 0..=smoothness {
                    let t = i as f32 / smoothness as f32;
                    push_mesh_vertex(
                        &mut out,
                        bezier_point(&control_points, t),
                        color,
                        Vec2::new(t, 0.0),
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
