/// Mock graphics device for tests and headless use (no GPU required)
///
/// Buffers are backed by plain byte vectors, binds and uniforms are
/// recorded, and every call bumps a counter. The draw-mode mapping is
/// total over all nine modes.

use rustc_hash::FxHashMap;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::engine_err;
use crate::error::Result;

use super::graphics_device::{
    BlendFactor, BufferHandle, BufferUsage, DrawMode, GraphicsDevice, GraphicsDeviceStats,
    ShaderProgramHandle, TextureHandle, VertexArrayHandle,
};

/// A recorded uniform assignment
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Byte-backed mock buffer
#[derive(Debug, Clone)]
struct MockBuffer {
    data: Vec<u8>,
    usage: BufferUsage,
}

/// Map a draw mode to the mock backend's enumeration.
///
/// The mapping must be total; a new draw mode that falls through here is a
/// compile error, exactly as intended.
pub fn draw_mode_to_mock_mode(mode: DrawMode) -> u32 {
    match mode {
        DrawMode::Points => 0,
        DrawMode::Lines => 1,
        DrawMode::LineLoop => 2,
        DrawMode::LineStrip => 3,
        DrawMode::Triangles => 4,
        DrawMode::TriangleFan => 5,
        DrawMode::TriangleStrip => 6,
        DrawMode::Quads => 7,
        DrawMode::Polygon => 8,
    }
}

/// GPU-free graphics device
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use nebula_2d_engine::graphics_device::{GraphicsDevice, MockGraphicsDevice};
///
/// let device = Arc::new(Mutex::new(MockGraphicsDevice::new()));
/// let handle = device.lock().unwrap().create_buffer().unwrap();
/// assert_eq!(device.lock().unwrap().stats().buffers_created, 1);
/// # let _ = handle;
/// ```
pub struct MockGraphicsDevice {
    buffers: FxHashMap<BufferHandle, MockBuffer>,
    vertex_arrays: Vec<VertexArrayHandle>,
    next_buffer_id: u32,
    next_vertex_array_id: u32,

    bound_buffer: Option<BufferHandle>,
    bound_vertex_array: Option<VertexArrayHandle>,
    bound_textures: FxHashMap<u32, TextureHandle>,
    active_program: Option<ShaderProgramHandle>,

    point_size: f32,
    line_width: f32,
    wireframe: bool,
    point_sprite: bool,
    blend: (BlendFactor, BlendFactor),
    viewport: (i32, i32, u32, u32),

    uniforms: Vec<(ShaderProgramHandle, String, UniformValue)>,
    draws: Vec<(DrawMode, u32, u32)>,

    fail_next_buffer_create: bool,
    stats: GraphicsDeviceStats,
}

impl MockGraphicsDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self {
            buffers: FxHashMap::default(),
            vertex_arrays: Vec::new(),
            next_buffer_id: 1,
            next_vertex_array_id: 1,
            bound_buffer: None,
            bound_vertex_array: None,
            bound_textures: FxHashMap::default(),
            active_program: None,
            point_size: 1.0,
            line_width: 1.0,
            wireframe: false,
            point_sprite: false,
            blend: (BlendFactor::SourceAlpha, BlendFactor::OneMinusSourceAlpha),
            viewport: (0, 0, 0, 0),
            uniforms: Vec::new(),
            draws: Vec::new(),
            fail_next_buffer_create: false,
            stats: GraphicsDeviceStats::default(),
        }
    }

    /// Make the next `create_buffer` call fail, simulating exhaustion
    pub fn fail_next_buffer_create(&mut self) {
        self.fail_next_buffer_create = true;
    }

    // ===== INSPECTION (test helpers) =====

    /// Get a buffer's current byte contents
    pub fn buffer_contents(&self, handle: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(&handle).map(|b| b.data.as_slice())
    }

    /// Get a buffer's usage hint
    pub fn buffer_usage(&self, handle: BufferHandle) -> Option<BufferUsage> {
        self.buffers.get(&handle).map(|b| b.usage)
    }

    /// Number of live buffers
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Texture bound at the given unit, if any
    pub fn bound_texture_at(&self, unit: u32) -> Option<TextureHandle> {
        self.bound_textures.get(&unit).copied()
    }

    /// All recorded uniform assignments
    pub fn uniforms(&self) -> &[(ShaderProgramHandle, String, UniformValue)] {
        &self.uniforms
    }

    /// All recorded draw calls as (mode, first, count)
    pub fn draws(&self) -> &[(DrawMode, u32, u32)] {
        &self.draws
    }

    /// Current fixed state as (point size, line width, wireframe, point sprite)
    pub fn fixed_state(&self) -> (f32, f32, bool, bool) {
        (self.point_size, self.line_width, self.wireframe, self.point_sprite)
    }

    /// Currently active shader program
    pub fn active_program(&self) -> Option<ShaderProgramHandle> {
        self.active_program
    }

    /// Current blend factors as (source, destination)
    pub fn blend(&self) -> (BlendFactor, BlendFactor) {
        self.blend
    }

    /// Current viewport rectangle
    pub fn viewport(&self) -> (i32, i32, u32, u32) {
        self.viewport
    }

    /// Clear recorded uniforms and draws (counters are separate; see reset_stats)
    pub fn clear_recordings(&mut self) {
        self.uniforms.clear();
        self.draws.clear();
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    // ===== BUFFERS =====

    fn create_buffer(&mut self) -> Option<BufferHandle> {
        if self.fail_next_buffer_create {
            self.fail_next_buffer_create = false;
            return None;
        }

        let handle = BufferHandle(self.next_buffer_id);
        self.next_buffer_id += 1;
        self.buffers.insert(
            handle,
            MockBuffer {
                data: Vec::new(),
                usage: BufferUsage::Static,
            },
        );
        self.stats.buffers_created += 1;
        Some(handle)
    }

    fn delete_buffer(&mut self, handle: BufferHandle) {
        self.buffers.remove(&handle);
        if self.bound_buffer == Some(handle) {
            self.bound_buffer = None;
        }
    }

    fn bind_buffer(&mut self, handle: Option<BufferHandle>) {
        self.bound_buffer = handle;
    }

    fn buffer_data(&mut self, handle: BufferHandle, data: &[u8], usage: BufferUsage) -> Result<()> {
        let buffer = self
            .buffers
            .get_mut(&handle)
            .ok_or_else(|| engine_err!("nebula2d::MockGraphicsDevice", "unknown buffer {:?}", handle))?;

        buffer.data = data.to_vec();
        buffer.usage = usage;
        self.stats.buffer_uploads += 1;
        Ok(())
    }

    fn buffer_reserve(&mut self, handle: BufferHandle, size: usize, usage: BufferUsage) -> Result<()> {
        let buffer = self
            .buffers
            .get_mut(&handle)
            .ok_or_else(|| engine_err!("nebula2d::MockGraphicsDevice", "unknown buffer {:?}", handle))?;

        buffer.data = vec![0; size];
        buffer.usage = usage;
        self.stats.buffer_uploads += 1;
        Ok(())
    }

    fn buffer_sub_data(&mut self, handle: BufferHandle, offset: usize, data: &[u8]) -> Result<()> {
        let buffer = self
            .buffers
            .get_mut(&handle)
            .ok_or_else(|| engine_err!("nebula2d::MockGraphicsDevice", "unknown buffer {:?}", handle))?;

        if offset + data.len() > buffer.data.len() {
            return Err(engine_err!(
                "nebula2d::MockGraphicsDevice",
                "sub-data range {}..{} exceeds buffer size {}",
                offset,
                offset + data.len(),
                buffer.data.len()
            ));
        }

        buffer.data[offset..offset + data.len()].copy_from_slice(data);
        self.stats.buffer_sub_uploads += 1;
        Ok(())
    }

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&mut self) -> Option<VertexArrayHandle> {
        let handle = VertexArrayHandle(self.next_vertex_array_id);
        self.next_vertex_array_id += 1;
        self.vertex_arrays.push(handle);
        self.stats.vertex_arrays_created += 1;
        Some(handle)
    }

    fn delete_vertex_array(&mut self, handle: VertexArrayHandle) {
        self.vertex_arrays.retain(|&h| h != handle);
        if self.bound_vertex_array == Some(handle) {
            self.bound_vertex_array = None;
        }
    }

    fn bind_vertex_array(&mut self, handle: Option<VertexArrayHandle>) {
        self.bound_vertex_array = handle;
    }

    // ===== VERTEX ATTRIBUTES =====

    fn set_attribute_pointer(&mut self, _location: u32, _components: u32, _offset: usize, _stride: usize) {}

    fn enable_attribute(&mut self, _location: u32) {}

    fn disable_attribute(&mut self, _location: u32) {}

    // ===== TEXTURES =====

    fn bind_texture(&mut self, handle: TextureHandle) {
        self.bound_textures.insert(0, handle);
    }

    fn bind_texture_at(&mut self, handle: TextureHandle, unit: u32) {
        self.bound_textures.insert(unit, handle);
    }

    // ===== FIXED STATE =====

    fn set_point_size(&mut self, size: f32) {
        self.point_size = size;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn set_wireframe(&mut self, enable: bool) {
        self.wireframe = enable;
    }

    fn set_point_sprite(&mut self, enable: bool) {
        self.point_sprite = enable;
    }

    fn set_blend(&mut self, source: BlendFactor, destination: BlendFactor) {
        self.blend = (source, destination);
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.viewport = (x, y, width, height);
    }

    // ===== SHADER PROGRAMS =====

    fn use_program(&mut self, handle: Option<ShaderProgramHandle>) {
        self.active_program = handle;
    }

    fn set_uniform_f32(&mut self, program: ShaderProgramHandle, name: &str, value: f32) {
        self.uniforms.push((program, name.to_string(), UniformValue::Float(value)));
    }

    fn set_uniform_i32(&mut self, program: ShaderProgramHandle, name: &str, value: i32) {
        self.uniforms.push((program, name.to_string(), UniformValue::Int(value)));
    }

    fn set_uniform_vec2(&mut self, program: ShaderProgramHandle, name: &str, value: Vec2) {
        self.uniforms.push((program, name.to_string(), UniformValue::Vec2(value)));
    }

    fn set_uniform_vec3(&mut self, program: ShaderProgramHandle, name: &str, value: Vec3) {
        self.uniforms.push((program, name.to_string(), UniformValue::Vec3(value)));
    }

    fn set_uniform_vec4(&mut self, program: ShaderProgramHandle, name: &str, value: Vec4) {
        self.uniforms.push((program, name.to_string(), UniformValue::Vec4(value)));
    }

    fn set_uniform_mat4(&mut self, program: ShaderProgramHandle, name: &str, value: Mat4) {
        self.uniforms.push((program, name.to_string(), UniformValue::Mat4(value)));
    }

    // ===== DRAWS =====

    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32) {
        let _ = draw_mode_to_mock_mode(mode);
        self.draws.push((mode, first, count));
        self.stats.draw_calls += 1;
    }

    // ===== STATISTICS =====

    fn stats(&self) -> GraphicsDeviceStats {
        self.stats
    }

    fn reset_stats(&mut self) {
        self.stats = GraphicsDeviceStats::default();
        self.draws.clear();
        self.uniforms.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
