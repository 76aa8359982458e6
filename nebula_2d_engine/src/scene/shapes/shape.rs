/// Shape core: state and primitive bookkeeping shared by all shapes
///
/// A shape owns exactly one render primitive inside the renderer, created
/// lazily on first prepare. Mutators only set flags; geometry is
/// regenerated and pushed to the primitive during prepare.

use std::sync::{Arc, Mutex};

use glam::{Vec2, Vec3};

use crate::graphics_device::{DrawMode, TextureHandle};
use crate::materials::Material;
use crate::render::pass::RenderPass;
use crate::render::renderer::{PrimitiveKey, Renderer};
use crate::render::vertex::{AttributeSemantic, VertexDeclaration, VertexElementType};
use crate::render::RenderPrimitive;
use crate::scene::movable_object::NodeContext;
use crate::utils::Color;

// ===== MESH VERTEX LAYOUT =====

pub(crate) const POSITION_COMPONENTS: usize = 3;
pub(crate) const NORMAL_COMPONENTS: usize = 3;
pub(crate) const COLOR_COMPONENTS: usize = 4;
pub(crate) const TEX_COORD_COMPONENTS: usize = 3;

/// Floats per mesh vertex: position + normal + color + tex coord
pub const MESH_VERTEX_COMPONENTS: usize =
    POSITION_COMPONENTS + NORMAL_COMPONENTS + COLOR_COMPONENTS + TEX_COORD_COMPONENTS;

/// The interleaved declaration used by all shape geometry
pub fn mesh_vertex_declaration() -> VertexDeclaration {
    let float_size = std::mem::size_of::<f32>();
    let stride = MESH_VERTEX_COMPONENTS * float_size;

    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, stride);
    declaration.add_element(
        AttributeSemantic::Normal,
        VertexElementType::Float3,
        POSITION_COMPONENTS * float_size,
        stride,
    );
    declaration.add_element(
        AttributeSemantic::Color,
        VertexElementType::Float4,
        (POSITION_COMPONENTS + NORMAL_COMPONENTS) * float_size,
        stride,
    );
    declaration.add_element(
        AttributeSemantic::TexCoord,
        VertexElementType::Float3,
        (POSITION_COMPONENTS + NORMAL_COMPONENTS + COLOR_COMPONENTS) * float_size,
        stride,
    );
    declaration
}

/// Append one mesh vertex to the stream
pub fn push_mesh_vertex(out: &mut Vec<f32>, position: Vec3, color: Color, tex_coord: Vec2) {
    out.extend_from_slice(&[
        position.x, position.y, position.z,
        0.0, 0.0, 1.0,
        color.r, color.g, color.b, color.a,
        tex_coord.x, tex_coord.y, 0.0,
    ]);
}

/// Rotate a point about an origin in the xy plane
pub fn rotate_point(point: Vec2, origin: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - origin;
    origin + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

// ===== SHAPE CORE =====

/// Render state shared by every shape
pub struct Shape {
    draw_mode: DrawMode,
    color: Color,
    material: Option<Arc<Mutex<Material>>>,
    texture_handle: Option<TextureHandle>,
    passes: Vec<RenderPass>,
    visible: bool,
    line_thickness: f32,
    wire_frame: bool,

    primitive: Option<PrimitiveKey>,
    update_vertices: bool,
    update_colors: bool,
}

impl Shape {
    /// Shape core with the given draw mode and fill color
    pub fn new(draw_mode: DrawMode, color: Color) -> Self {
        Self {
            draw_mode,
            color,
            material: None,
            texture_handle: None,
            passes: vec![RenderPass::new()],
            visible: true,
            line_thickness: 1.0,
            wire_frame: false,
            primitive: None,
            update_vertices: true,
            update_colors: false,
        }
    }

    // ===== MODIFIERS =====

    /// Set the fill color
    pub fn set_fill_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.update_colors = true;
        }
    }

    /// Set the fill opacity (the color's alpha)
    pub fn set_fill_opacity(&mut self, opacity: f32) {
        if self.color.a != opacity {
            self.color.a = opacity;
            self.update_colors = true;
        }
    }

    /// Set the surface material
    pub fn set_material(&mut self, material: Option<Arc<Mutex<Material>>>) {
        self.material = material;
    }

    /// Set an explicit texture handle (overrides the material's diffuse map)
    pub fn set_texture(&mut self, texture_handle: Option<TextureHandle>) {
        self.texture_handle = texture_handle;
    }

    /// Set the render pass list
    pub fn set_passes(&mut self, passes: Vec<RenderPass>) {
        self.passes = passes;
    }

    /// Set own visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Set the line thickness (line shapes)
    pub fn set_line_thickness(&mut self, thickness: f32) {
        self.line_thickness = thickness;
    }

    /// Enable/disable wireframe rendering
    pub fn set_wire_frame(&mut self, enable: bool) {
        self.wire_frame = enable;
    }

    /// Force vertex regeneration on the next prepare
    pub fn refresh(&mut self) {
        self.update_vertices = true;
    }

    // ===== OBSERVERS =====

    /// Fill color
    pub fn fill_color(&self) -> Color {
        self.color
    }

    /// Fill opacity
    pub fn fill_opacity(&self) -> f32 {
        self.color.a
    }

    /// Surface material, if any
    pub fn material(&self) -> Option<&Arc<Mutex<Material>>> {
        self.material.as_ref()
    }

    /// Explicit texture handle, if any
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture_handle
    }

    /// Own visibility flag
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Key of the backing primitive; None before the first prepare
    pub fn primitive_key(&self) -> Option<PrimitiveKey> {
        self.primitive
    }

    // ===== PREPARE =====

    /// Sync this shape's primitive with the renderer, regenerating vertex
    /// data through `vertices` when flagged
    pub(crate) fn sync<F>(&mut self, vertices: F, ctx: &NodeContext, renderer: &mut Renderer)
    where
        F: FnOnce() -> Vec<f32>,
    {
        let key = match self.primitive {
            Some(key) if renderer.contains_primitive(key) => key,
            _ => {
                let primitive =
                    RenderPrimitive::new(self.draw_mode, mesh_vertex_declaration(), self.visible);
                let key = renderer.add_primitive(primitive);
                self.primitive = Some(key);
                self.update_vertices = true;
                key
            }
        };

        let primitive = renderer
            .primitive_mut(key)
            .expect("shape primitive disappeared");

        if self.update_vertices {
            primitive.set_vertex_data(vertices());
            self.update_vertices = false;
            self.update_colors = false;
        } else if self.update_colors {
            primitive.set_base_color(self.color);
            self.update_colors = false;
        }

        primitive.set_material(self.material.clone());
        primitive.set_texture(self.texture_handle);
        primitive.set_render_passes(self.passes.clone());
        primitive.set_line_thickness(self.line_thickness);
        primitive.set_wire_frame(self.wire_frame);
        primitive.set_model_matrix(ctx.full_transformation);
        primitive.set_visible(self.visible);
        primitive.set_world_visible(ctx.world_visible && self.visible);
    }

    /// Remove the backing primitive from the renderer
    pub(crate) fn detach(&mut self, renderer: &mut Renderer) {
        if let Some(key) = self.primitive.take() {
            renderer.remove_primitive(key);
        }
        self.update_vertices = true;
    }
}
