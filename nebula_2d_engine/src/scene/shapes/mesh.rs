/// Mesh shape: raw user-supplied geometry in the standard vertex layout

use crate::graphics_device::DrawMode;
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::Color;

use super::shape::{Shape, MESH_VERTEX_COMPONENTS};

/// Arbitrary geometry supplied as raw interleaved vertex data
/// (position, normal, color, tex coord per vertex)
pub struct Mesh {
    shape: Shape,
    vertex_data: Vec<f32>,
}

impl Mesh {
    /// Mesh from raw vertex data; the length must be a multiple of the
    /// standard vertex layout
    pub fn new(draw_mode: DrawMode, vertex_data: Vec<f32>) -> Self {
        debug_assert!(
            vertex_data.len() % MESH_VERTEX_COMPONENTS == 0,
            "mesh data must be whole vertices"
        );
        Self {
            shape: Shape::new(draw_mode, Color::WHITE),
            vertex_data,
        }
    }

    // ===== MODIFIERS =====

    /// Replace the vertex data
    pub fn set_vertex_data(&mut self, vertex_data: Vec<f32>) {
        self.vertex_data = vertex_data;
        self.shape.refresh();
    }

    // ===== OBSERVERS =====

    /// Raw vertex data
    pub fn vertex_data(&self) -> &[f32] {
        &self.vertex_data
    }

    /// Vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len() / MESH_VERTEX_COMPONENTS
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
        let data = self.vertex_data.clone();
        self.shape.sync(|| data, ctx, renderer);
    }

    pub(crate) fn detach(&mut self, renderer: &mut Renderer) {
        self.shape.detach(renderer);
    }
}
