/// Render primitive: per-drawable vertex data and render properties
///
/// The properties determine what other primitives it can be grouped with
/// and how it is drawn. Vertex data is kept twice: in local space as
/// authored, and in world space as last transformed by the model matrix.

use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec3};

use crate::graphics_device::{DrawMode, TextureHandle};
use crate::materials::Material;
use crate::utils::{Aabb, Color};

use super::pass::{all_passes_equal, RenderPass};
use super::vertex::{AttributeSemantic, BatchTexture, VertexBatch, VertexDeclaration};

// ===== VERTEX METRICS =====

/// Cached position/color layout of a declaration, in float units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexMetrics {
    pub position_components: usize,
    pub position_offset: usize,
    pub position_stride: usize,

    pub color_components: usize,
    pub color_offset: usize,
    pub color_stride: usize,
}

/// Extract position/color metrics from a declaration
pub fn vertex_metrics(declaration: &VertexDeclaration) -> VertexMetrics {
    let float_size = std::mem::size_of::<f32>();
    let mut metrics = VertexMetrics::default();

    for element in declaration.elements() {
        match element.semantic {
            AttributeSemantic::Position => {
                metrics.position_components = element.components();
                metrics.position_offset = element.offset / float_size;
                metrics.position_stride = element.stride / float_size;
            }
            AttributeSemantic::Color => {
                metrics.color_components = element.components();
                metrics.color_offset = element.offset / float_size;
                metrics.color_stride = element.stride / float_size;
            }
            _ => {}
        }
    }

    metrics
}

/// Multiply every position in the data by the model matrix.
///
/// Two-component positions transform as (x, y, 0); four-component positions
/// leave w untouched.
pub fn transform_positions(metrics: &VertexMetrics, model_matrix: &Mat4, data: &mut [f32]) {
    let stride = metrics.position_stride.max(metrics.position_components);
    if stride == 0 {
        return;
    }

    match metrics.position_components {
        2 => {
            let mut off = metrics.position_offset;
            while off + 2 <= data.len() {
                let v = model_matrix.transform_point3(Vec3::new(data[off], data[off + 1], 0.0));
                data[off] = v.x;
                data[off + 1] = v.y;
                off += stride;
            }
        }
        3 | 4 => {
            let mut off = metrics.position_offset;
            while off + 3 <= data.len() {
                let v =
                    model_matrix.transform_point3(Vec3::new(data[off], data[off + 1], data[off + 2]));
                data[off] = v.x;
                data[off + 1] = v.y;
                data[off + 2] = v.z;
                off += stride;
            }
        }
        _ => {}
    }
}

/// Z coordinate of the first position in the data
pub fn position_z(metrics: &VertexMetrics, data: &[f32]) -> f32 {
    match metrics.position_components {
        3 | 4 if metrics.position_offset + 2 < data.len() => data[metrics.position_offset + 2],
        _ => 0.0,
    }
}

/// Overwrite every color attribute in the data
pub fn apply_color(metrics: &VertexMetrics, color: Color, data: &mut [f32]) {
    let stride = metrics.color_stride.max(metrics.color_components);
    if stride == 0 || metrics.color_components < 4 {
        return;
    }

    let channels = color.to_array();
    let mut off = metrics.color_offset;
    while off + 4 <= data.len() {
        data[off..off + 4].copy_from_slice(&channels);
        off += stride;
    }
}

/// Multiply the alpha channel of every color attribute by the given opacity
pub fn apply_opacity(metrics: &VertexMetrics, opacity: f32, data: &mut [f32]) {
    let stride = metrics.color_stride.max(metrics.color_components);
    if stride == 0 || metrics.color_components < 4 {
        return;
    }

    let mut off = metrics.color_offset;
    while off + 4 <= data.len() {
        data[off + 3] *= opacity;
        off += stride;
    }
}

/// Write `source` alpha scaled by opacity into `data`'s color attributes
pub fn apply_opacity_from(metrics: &VertexMetrics, opacity: f32, source: &[f32], data: &mut [f32]) {
    let stride = metrics.color_stride.max(metrics.color_components);
    if stride == 0 || metrics.color_components < 4 {
        return;
    }

    let mut off = metrics.color_offset;
    while off + 4 <= data.len().min(source.len()) {
        data[off + 3] = source[off + 3] * opacity;
        off += stride;
    }
}

/// Color of the first vertex
pub fn first_color(metrics: &VertexMetrics, data: &[f32]) -> Color {
    if metrics.color_components >= 4 && metrics.color_offset + 4 <= data.len() {
        let off = metrics.color_offset;
        Color::new(data[off], data[off + 1], data[off + 2], data[off + 3])
    } else {
        Color::WHITE
    }
}

/// Bounding box of all positions in the data
pub fn position_aabb(metrics: &VertexMetrics, data: &[f32]) -> Aabb {
    let stride = metrics.position_stride.max(metrics.position_components);
    if stride == 0 {
        return Aabb::EMPTY;
    }

    let mut aabb = Aabb::EMPTY;
    let mut off = metrics.position_offset;

    match metrics.position_components {
        2 => {
            while off + 2 <= data.len() {
                let p = Vec3::new(data[off], data[off + 1], 0.0);
                aabb.merge(&Aabb::new(p, p));
                off += stride;
            }
        }
        3 | 4 => {
            while off + 3 <= data.len() {
                let p = Vec3::new(data[off], data[off + 1], data[off + 2]);
                aabb.merge(&Aabb::new(p, p));
                off += stride;
            }
        }
        _ => {}
    }

    aabb
}

// ===== RENDER PRIMITIVE =====

/// A primitive with vertex data and render properties
pub struct RenderPrimitive {
    draw_mode: DrawMode,
    declaration: VertexDeclaration,
    metrics: VertexMetrics,

    /// Local-space vertex data
    local_vertex_data: Vec<f32>,
    /// World-space vertex data (local transformed by the applied matrix)
    world_vertex_data: Vec<f32>,
    current_model_matrix: Mat4,
    applied_model_matrix: Mat4,
    world_z: f32,
    world_aabb: Aabb,

    passes: Vec<RenderPass>,
    material: Option<Arc<Mutex<Material>>>,
    /// Material identity last seen by refresh; detects swaps
    applied_material: usize,
    texture_handle: Option<TextureHandle>,

    opacity: f32,
    point_size: f32,
    line_thickness: f32,
    wire_frame: bool,
    point_sprite: bool,
    visible: bool,
    world_visible: bool,

    local_data_changed: bool,
    world_data_changed: bool,
    opacity_changed: bool,
    need_refresh: bool,
}

fn material_identity(material: &Option<Arc<Mutex<Material>>>) -> usize {
    material
        .as_ref()
        .map(|m| Arc::as_ptr(m) as usize)
        .unwrap_or(0)
}

impl RenderPrimitive {
    /// Construct a new render primitive with the given draw mode,
    /// declaration and visibility
    pub fn new(draw_mode: DrawMode, declaration: VertexDeclaration, visible: bool) -> Self {
        let metrics = vertex_metrics(&declaration);
        Self {
            draw_mode,
            declaration,
            metrics,
            local_vertex_data: Vec::new(),
            world_vertex_data: Vec::new(),
            current_model_matrix: Mat4::IDENTITY,
            applied_model_matrix: Mat4::IDENTITY,
            world_z: 0.0,
            world_aabb: Aabb::EMPTY,
            passes: vec![RenderPass::new()],
            material: None,
            applied_material: 0,
            texture_handle: None,
            opacity: 1.0,
            point_size: 1.0,
            line_thickness: 1.0,
            wire_frame: false,
            point_sprite: false,
            visible,
            world_visible: false,
            local_data_changed: false,
            world_data_changed: false,
            opacity_changed: false,
            need_refresh: false,
        }
    }

    // ===== MODIFIERS =====

    /// Replace the local vertex data
    pub fn set_vertex_data(&mut self, data: Vec<f32>) {
        let size_changed = data.len() != self.local_vertex_data.len();
        self.local_vertex_data = data;
        self.local_data_changed = true;

        // A size change moves the primitive to a differently sized slot
        if size_changed {
            self.need_refresh |= self.world_visible;
        }
    }

    /// Append local vertex data
    pub fn append_vertex_data(&mut self, data: &[f32]) {
        if !data.is_empty() {
            self.local_vertex_data.extend_from_slice(data);
            self.local_data_changed = true;
            self.need_refresh |= self.world_visible;
        }
    }

    /// Set the model matrix
    pub fn set_model_matrix(&mut self, model_matrix: Mat4) {
        self.current_model_matrix = model_matrix;
    }

    /// Set the render pass list
    pub fn set_render_passes(&mut self, passes: Vec<RenderPass>) {
        if !all_passes_equal(&self.passes, &passes) {
            self.passes = passes;
            self.need_refresh |= self.world_visible;
        }
    }

    /// Set the material (shared, non-owning)
    pub fn set_material(&mut self, material: Option<Arc<Mutex<Material>>>) {
        if material_identity(&self.material) != material_identity(&material) {
            self.applied_material = material_identity(&material);
            self.material = material;
            self.need_refresh |= self.world_visible;
        }
    }

    /// Set the texture handle; takes precedence over the material's diffuse
    /// map when present
    pub fn set_texture(&mut self, texture_handle: Option<TextureHandle>) {
        if self.texture_handle != texture_handle {
            self.texture_handle = texture_handle;
            self.need_refresh |= self.world_visible;
        }
    }

    /// Overwrite every vertex color in the local data
    pub fn set_base_color(&mut self, color: Color) {
        apply_color(&self.metrics, color, &mut self.local_vertex_data);
        self.local_data_changed = true;
    }

    /// Scale every vertex alpha in the local data
    pub fn set_base_opacity(&mut self, opacity: f32) {
        apply_opacity(&self.metrics, opacity, &mut self.local_vertex_data);
        self.local_data_changed = true;
    }

    /// Set the primitive opacity applied on top of the vertex colors
    pub fn set_opacity(&mut self, opacity: f32) {
        if self.opacity != opacity {
            self.opacity = opacity;
            self.opacity_changed = true;
        }
    }

    /// Set the point size
    pub fn set_point_size(&mut self, size: f32) {
        if self.point_size != size {
            self.point_size = size;
            self.need_refresh |= self.world_visible;
        }
    }

    /// Set the line thickness
    pub fn set_line_thickness(&mut self, thickness: f32) {
        if self.line_thickness != thickness {
            self.line_thickness = thickness;
            self.need_refresh |= self.world_visible;
        }
    }

    /// Enable/disable wireframe rendering
    pub fn set_wire_frame(&mut self, enable: bool) {
        if self.wire_frame != enable {
            self.wire_frame = enable;
            self.need_refresh |= self.world_visible;
        }
    }

    /// Enable/disable point sprite rendering
    pub fn set_point_sprite(&mut self, enable: bool) {
        if self.point_sprite != enable {
            self.point_sprite = enable;
            self.need_refresh |= self.world_visible;
        }
    }

    /// Set own visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Set world visibility (own flag combined with the owning node's)
    pub fn set_world_visible(&mut self, visible: bool) {
        if self.world_visible != visible {
            self.world_visible = visible;
            self.need_refresh = true;
        }
    }

    // ===== OBSERVERS =====

    /// Draw mode
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Vertex declaration
    pub fn declaration(&self) -> &VertexDeclaration {
        &self.declaration
    }

    /// Local-space vertex data
    pub fn vertex_data(&self) -> &[f32] {
        &self.local_vertex_data
    }

    /// World-space vertex data
    pub fn world_vertex_data(&self) -> &[f32] {
        &self.world_vertex_data
    }

    /// Current model matrix
    pub fn model_matrix(&self) -> &Mat4 {
        &self.current_model_matrix
    }

    /// Vertex count of the local data
    pub fn vertex_count(&self) -> usize {
        let vertex_size = self.declaration.vertex_size() / std::mem::size_of::<f32>();
        if vertex_size > 0 {
            self.local_vertex_data.len() / vertex_size
        } else {
            0
        }
    }

    /// Local data length in floats
    pub fn vertex_data_size(&self) -> usize {
        self.local_vertex_data.len()
    }

    /// Z of the first local vertex
    pub fn z(&self) -> f32 {
        position_z(&self.metrics, &self.local_vertex_data)
    }

    /// Z of the first world vertex (the painter-order key)
    pub fn world_z(&self) -> f32 {
        self.world_z
    }

    /// World-space bounding box
    pub fn world_aabb(&self) -> &Aabb {
        &self.world_aabb
    }

    /// Render pass list
    pub fn render_passes(&self) -> &[RenderPass] {
        &self.passes
    }

    /// Material, if any
    pub fn material(&self) -> Option<&Arc<Mutex<Material>>> {
        self.material.as_ref()
    }

    /// Texture handle override, if any
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture_handle
    }

    /// Color of the first local vertex
    pub fn base_color(&self) -> Color {
        first_color(&self.metrics, &self.local_vertex_data)
    }

    /// Primitive opacity
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Point size
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Line thickness
    pub fn line_thickness(&self) -> f32 {
        self.line_thickness
    }

    /// True if wireframe rendering is enabled
    pub fn wire_frame(&self) -> bool {
        self.wire_frame
    }

    /// True if point sprite rendering is enabled
    pub fn point_sprite(&self) -> bool {
        self.point_sprite
    }

    /// Own visibility flag
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// World visibility flag
    pub fn world_visible(&self) -> bool {
        self.world_visible
    }

    /// Layout metrics of this primitive's declaration
    pub fn metrics(&self) -> &VertexMetrics {
        &self.metrics
    }

    // ===== GROUPING =====

    /// True if this primitive can share a batch with the given primitive
    pub fn is_groupable(&self, other: &RenderPrimitive) -> bool {
        self.draw_mode == other.draw_mode
            && self.declaration == other.declaration
            && all_passes_equal(&self.passes, &other.passes)
            && material_identity(&self.material) == material_identity(&other.material)
            && self.texture_handle == other.texture_handle
            && self.point_size == other.point_size
            && self.line_thickness == other.line_thickness
            && self.wire_frame == other.wire_frame
            && self.point_sprite == other.point_sprite
            && self.world_visible
            && other.world_visible
    }

    /// Build a vertex batch that can render this primitive
    pub fn make_vertex_batch(&self) -> VertexBatch {
        let mut batch = VertexBatch::new(self.draw_mode, self.declaration.clone());
        batch.set_material(self.material.clone());

        if let Some(handle) = self.texture_handle {
            batch.set_texture(BatchTexture::Handle(handle));
        }

        batch
    }

    // ===== REFRESHING / PREPARING =====

    /// Refresh bookkeeping that affects batch membership.
    ///
    /// Recomputes the world z from the first vertex under the current model
    /// matrix and detects material swaps. Returns true when the owning
    /// renderer must re-evaluate this primitive's batch membership; the
    /// pending flag is consumed. Typically called each frame.
    pub fn refresh(&mut self) -> bool {
        if self.local_data_changed || self.current_model_matrix != self.applied_model_matrix {
            let local_z = position_z(&self.metrics, &self.local_vertex_data);
            let z = self
                .current_model_matrix
                .transform_point3(Vec3::new(0.0, 0.0, local_z))
                .z;

            if z != self.world_z {
                self.world_z = z;
                self.need_refresh = true;
            }
        }

        let current = material_identity(&self.material);
        if current != self.applied_material {
            self.applied_material = current;
            self.need_refresh |= self.visible;
        }

        std::mem::take(&mut self.need_refresh)
    }

    /// Update world vertex data from local data and the model matrix.
    ///
    /// Returns true if the world data changed (the flag is consumed).
    /// Typically called each frame.
    pub fn prepare(&mut self) -> bool {
        if self.local_data_changed || self.current_model_matrix != self.applied_model_matrix {
            self.world_vertex_data.clear();
            self.world_vertex_data.extend_from_slice(&self.local_vertex_data);
            transform_positions(
                &self.metrics,
                &self.current_model_matrix,
                &mut self.world_vertex_data,
            );

            self.applied_model_matrix = self.current_model_matrix;
            self.local_data_changed = false;
            self.world_data_changed = true;
            // The fresh copy holds local alpha; re-scale it below
            self.opacity_changed = true;
            self.world_aabb = position_aabb(&self.metrics, &self.world_vertex_data);
        }

        if self.opacity_changed {
            apply_opacity_from(
                &self.metrics,
                self.opacity,
                &self.local_vertex_data,
                &mut self.world_vertex_data,
            );
            self.opacity_changed = false;
            self.world_data_changed = true;
        }

        std::mem::take(&mut self.world_data_changed)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "primitive_tests.rs"]
mod tests;
