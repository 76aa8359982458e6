/// GraphicsDevice trait - the side-effectful graphics API surface
///
/// A deliberately small set of calls: buffer lifecycle and uploads, vertex
/// array and attribute setup, texture binding, fixed-function state, shader
/// uniform assignment and array draws. Everything the renderer does to the
/// GPU goes through this trait.

use std::sync::{Arc, Mutex};

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::error::Result;

// ============================================================================
// Handles
// ============================================================================

/// Opaque handle to a GPU buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Opaque handle to a vertex array (attribute binding cache)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u32);

/// Opaque handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderProgramHandle(pub u32);

/// Texture target kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Tex1d,
    Tex2d,
    ArrayTex1d,
    ArrayTex2d,
}

/// Opaque handle to a GPU texture, with its target kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub id: u32,
    pub kind: TextureKind,
}

impl TextureHandle {
    /// Create a 2D texture handle
    pub fn tex_2d(id: u32) -> Self {
        Self {
            id,
            kind: TextureKind::Tex2d,
        }
    }

    /// Create a 2D array texture handle (e.g. a font glyph atlas)
    pub fn array_tex_2d(id: u32) -> Self {
        Self {
            id,
            kind: TextureKind::ArrayTex2d,
        }
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// Buffer usage hint, determines GPU driver placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Load/modify vertex data once
    Static,
    /// Load/modify vertex data occasionally
    Dynamic,
    /// Load/modify vertex data often (every frame)
    Stream,
}

/// How a sequence of vertices is assembled into geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleFan,
    TriangleStrip,
    Quads,
    Polygon,
}

/// Blend factor for source/destination blending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SourceAlpha,
    OneMinusSourceAlpha,
    DestinationAlpha,
    OneMinusDestinationAlpha,
}

// ============================================================================
// Statistics
// ============================================================================

/// Per-device counters, reset on demand
///
/// These exist so callers (and tests) can observe how many draws and
/// uploads a frame actually produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphicsDeviceStats {
    /// Number of draw calls issued
    pub draw_calls: u32,
    /// Number of full buffer (re)allocations/uploads
    pub buffer_uploads: u32,
    /// Number of sub-range buffer uploads
    pub buffer_sub_uploads: u32,
    /// Number of buffers created
    pub buffers_created: u32,
    /// Number of vertex arrays created
    pub vertex_arrays_created: u32,
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Shared, thread-safe graphics device
pub type SharedGraphicsDevice = Arc<Mutex<dyn GraphicsDevice>>;

/// The graphics API shim
///
/// Implemented by backend-specific devices. All calls are issued from the
/// render thread; implementations are free to assume single-threaded use
/// behind the shared mutex.
pub trait GraphicsDevice: Send + Sync {
    // ===== BUFFERS =====

    /// Create a buffer. Returns None when the device is out of memory.
    fn create_buffer(&mut self) -> Option<BufferHandle>;

    /// Delete a buffer
    fn delete_buffer(&mut self, handle: BufferHandle);

    /// Bind a buffer (None unbinds)
    fn bind_buffer(&mut self, handle: Option<BufferHandle>);

    /// Replace the whole buffer store with the given bytes
    fn buffer_data(&mut self, handle: BufferHandle, data: &[u8], usage: BufferUsage) -> Result<()>;

    /// Reserve (orphan) the buffer store at the given size without writing
    fn buffer_reserve(&mut self, handle: BufferHandle, size: usize, usage: BufferUsage) -> Result<()>;

    /// Write bytes into a sub-range of the buffer store
    fn buffer_sub_data(&mut self, handle: BufferHandle, offset: usize, data: &[u8]) -> Result<()>;

    // ===== VERTEX ARRAYS =====

    /// Create a vertex array. Returns None when the device is out of memory.
    fn create_vertex_array(&mut self) -> Option<VertexArrayHandle>;

    /// Delete a vertex array
    fn delete_vertex_array(&mut self, handle: VertexArrayHandle);

    /// Bind a vertex array (None unbinds)
    fn bind_vertex_array(&mut self, handle: Option<VertexArrayHandle>);

    // ===== VERTEX ATTRIBUTES =====

    /// Point an attribute location at interleaved float data in the bound buffer
    fn set_attribute_pointer(&mut self, location: u32, components: u32, offset: usize, stride: usize);

    /// Enable an attribute location
    fn enable_attribute(&mut self, location: u32);

    /// Disable an attribute location
    fn disable_attribute(&mut self, location: u32);

    // ===== TEXTURES =====

    /// Bind a texture to the active unit
    fn bind_texture(&mut self, handle: TextureHandle);

    /// Bind a texture to a specific unit
    fn bind_texture_at(&mut self, handle: TextureHandle, unit: u32);

    // ===== FIXED STATE =====

    /// Set the rasterized point size
    fn set_point_size(&mut self, size: f32);

    /// Set the rasterized line width
    fn set_line_width(&mut self, width: f32);

    /// Enable/disable wireframe polygon mode
    fn set_wireframe(&mut self, enable: bool);

    /// Enable/disable point sprite mode
    fn set_point_sprite(&mut self, enable: bool);

    /// Set source/destination blend factors
    fn set_blend(&mut self, source: BlendFactor, destination: BlendFactor);

    /// Set the viewport rectangle in pixels
    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    // ===== SHADER PROGRAMS =====

    /// Use a shader program (None returns to fixed-function-equivalent state)
    fn use_program(&mut self, handle: Option<ShaderProgramHandle>);

    /// Set a float uniform by name
    fn set_uniform_f32(&mut self, program: ShaderProgramHandle, name: &str, value: f32);

    /// Set an integer uniform by name
    fn set_uniform_i32(&mut self, program: ShaderProgramHandle, name: &str, value: i32);

    /// Set a vec2 uniform by name
    fn set_uniform_vec2(&mut self, program: ShaderProgramHandle, name: &str, value: Vec2);

    /// Set a vec3 uniform by name
    fn set_uniform_vec3(&mut self, program: ShaderProgramHandle, name: &str, value: Vec3);

    /// Set a vec4 uniform by name
    fn set_uniform_vec4(&mut self, program: ShaderProgramHandle, name: &str, value: Vec4);

    /// Set a mat4 uniform by name
    fn set_uniform_mat4(&mut self, program: ShaderProgramHandle, name: &str, value: Mat4);

    // ===== DRAWS =====

    /// Draw `count` vertices starting at `first` from the bound buffer/array
    fn draw_arrays(&mut self, mode: DrawMode, first: u32, count: u32);

    // ===== STATISTICS =====

    /// Get the device counters
    fn stats(&self) -> GraphicsDeviceStats;

    /// Reset the device counters
    fn reset_stats(&mut self);
}
