/// Vertex batch: a group of vertices drawn in a single call
///
/// Vertices are drawn from a vertex buffer sub-range with or without a
/// shader program. The batch resolves its material/animation textures
/// against its own accumulated clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::graphics_device::{DrawMode, SharedGraphicsDevice, TextureHandle, VertexArrayHandle};
use crate::materials::Material;
use crate::render::shader::{uniform_name, ShaderProgram};
use crate::textures::{Animation, Texture};

use super::buffer::VertexBufferView;
use super::data_view::VertexDataView;
use super::declaration::{AttributeSemantic, VertexDeclaration};

/// Texture attachment of a batch
#[derive(Debug, Clone, Default)]
pub enum BatchTexture {
    #[default]
    None,
    Animation(Arc<Animation>),
    Texture(Arc<Texture>),
    Handle(TextureHandle),
}

impl BatchTexture {
    /// Resolve the texture handle shown at the given clock value
    pub fn handle_at(&self, time: Duration) -> Option<TextureHandle> {
        match self {
            BatchTexture::None => None,
            BatchTexture::Animation(animation) => {
                animation.frame_at(time).map(|frame| frame.handle())
            }
            BatchTexture::Texture(texture) => Some(texture.handle()),
            BatchTexture::Handle(handle) => Some(*handle),
        }
    }
}

/// A batch of vertices that can be drawn in a single call
pub struct VertexBatch {
    draw_mode: DrawMode,
    declaration: VertexDeclaration,
    vertex_data: VertexDataView,
    material: Option<Arc<Mutex<Material>>>,
    texture: BatchTexture,
    vertex_count: usize,

    use_vertex_array: bool,
    vertex_array: Option<VertexArrayHandle>,
    vertex_buffer: Option<VertexBufferView>,

    time: Duration,
    reload_vertex_data: bool,
    rebind_attributes: bool,
}

impl VertexBatch {
    /// Construct a new vertex batch with the given draw mode and declaration
    pub fn new(draw_mode: DrawMode, declaration: VertexDeclaration) -> Self {
        Self {
            draw_mode,
            declaration,
            vertex_data: VertexDataView::default(),
            material: None,
            texture: BatchTexture::None,
            vertex_count: 0,
            use_vertex_array: true,
            vertex_array: None,
            vertex_buffer: None,
            time: Duration::ZERO,
            reload_vertex_data: false,
            rebind_attributes: false,
        }
    }

    /// Construct a batch with initial data and an optional material
    pub fn with_data(
        draw_mode: DrawMode,
        declaration: VertexDeclaration,
        vertex_data: VertexDataView,
        material: Option<Arc<Mutex<Material>>>,
    ) -> Self {
        let mut batch = Self::new(draw_mode, declaration);
        batch.set_vertex_data(vertex_data, true);
        batch.material = material;
        batch
    }

    fn vertex_count_of(declaration: &VertexDeclaration, data: &VertexDataView) -> usize {
        let vertex_size = declaration.vertex_size();
        if vertex_size > 0 {
            data.size() / vertex_size
        } else {
            0
        }
    }

    // ===== MODIFIERS =====

    /// Set the draw mode
    pub fn set_draw_mode(&mut self, draw_mode: DrawMode) {
        self.draw_mode = draw_mode;
    }

    /// Set the vertex declaration
    pub fn set_declaration(&mut self, declaration: VertexDeclaration) {
        self.declaration = declaration;
        self.vertex_count = Self::vertex_count_of(&self.declaration, &self.vertex_data);
        self.rebind_attributes = self.use_vertex_array;
    }

    /// Set the vertex data view. `reload_data` forces a push to the buffer
    /// on the next prepare.
    pub fn set_vertex_data(&mut self, vertex_data: VertexDataView, reload_data: bool) {
        if self.vertex_data != vertex_data {
            self.vertex_data = vertex_data;
            self.vertex_count = Self::vertex_count_of(&self.declaration, &vertex_data);
        }

        self.reload_vertex_data |= reload_data;
    }

    /// Set the material
    pub fn set_material(&mut self, material: Option<Arc<Mutex<Material>>>) {
        self.material = material;
    }

    /// Set the texture attachment
    pub fn set_texture(&mut self, texture: BatchTexture) {
        self.texture = texture;
    }

    /// Use (or stop using) a vertex array for attribute bindings
    pub fn set_use_vertex_array(&mut self, use_vertex_array: bool, device: &SharedGraphicsDevice) {
        if self.use_vertex_array != use_vertex_array {
            self.use_vertex_array = use_vertex_array;
            self.rebind_attributes = use_vertex_array;

            if !use_vertex_array {
                if let Some(vao) = self.vertex_array.take() {
                    device.lock().unwrap().delete_vertex_array(vao);
                }
            }
        }
    }

    /// Bind this batch to a buffer sub-range
    pub fn set_vertex_buffer(&mut self, vertex_buffer: Option<VertexBufferView>, reload_data: bool) {
        if self.vertex_buffer != vertex_buffer {
            self.vertex_buffer = vertex_buffer;
            self.rebind_attributes = self.use_vertex_array;
        }

        self.reload_vertex_data |= reload_data;
    }

    /// Force reloading of vertex data from RAM to VRAM on the next prepare
    pub fn reload_data(&mut self) {
        self.reload_vertex_data = true;
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

    /// Vertex data view
    pub fn vertex_data(&self) -> VertexDataView {
        self.vertex_data
    }

    /// Material, if any
    pub fn material(&self) -> Option<&Arc<Mutex<Material>>> {
        self.material.as_ref()
    }

    /// Texture attachment
    pub fn texture(&self) -> &BatchTexture {
        &self.texture
    }

    /// Vertex count derived from data size and declaration stride
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Bound buffer view, if any
    pub fn vertex_buffer(&self) -> Option<VertexBufferView> {
        self.vertex_buffer
    }

    /// Accumulated animation clock
    pub fn time(&self) -> Duration {
        self.time
    }

    // ===== PREPARING / DRAWING =====

    /// Push pending vertex data to the bound buffer and (re)bind attribute
    /// pointers. Typically called once per frame.
    pub fn prepare(&mut self, device: &SharedGraphicsDevice, backing: &[f32]) {
        let Some(buffer) = self.vertex_buffer else {
            return;
        };

        if self.reload_vertex_data && !self.vertex_data.is_empty() {
            let bytes: &[u8] = bytemuck::cast_slice(self.vertex_data.slice(backing));
            let mut device = device.lock().unwrap();
            if device
                .buffer_sub_data(buffer.handle(), buffer.offset(), bytes)
                .is_ok()
            {
                self.reload_vertex_data = false;
            }
        } else {
            self.reload_vertex_data = false;
        }

        if self.use_vertex_array && self.rebind_attributes {
            let mut device = device.lock().unwrap();

            if self.vertex_array.is_none() {
                self.vertex_array = device.create_vertex_array();
            }

            if let Some(vao) = self.vertex_array {
                device.bind_vertex_array(Some(vao));
                device.bind_buffer(Some(buffer.handle()));
                Self::bind_attribute_pointers(&mut *device, &self.declaration, buffer.offset());
                device.bind_vertex_array(None);
                device.bind_buffer(None);
                self.rebind_attributes = false;
            }
        }
    }

    /// Draw all vertices of this batch, optionally through a shader program.
    /// Called once per render pass.
    pub fn draw(&self, device: &SharedGraphicsDevice, shader_program: Option<&ShaderProgram>) {
        // A batch without a position attribute draws nothing
        if self.vertex_count == 0 || self.declaration.find(AttributeSemantic::Position).is_none() {
            return;
        }

        let Some(buffer) = self.vertex_buffer else {
            return;
        };

        let mut device = device.lock().unwrap();

        if let Some(program) = shader_program {
            device.use_program(Some(program.handle()));
            self.apply_material_uniforms(&mut *device, program);
        } else {
            device.use_program(None);
        }

        self.bind_textures(&mut *device, shader_program);

        if self.use_vertex_array {
            if let Some(vao) = self.vertex_array {
                device.bind_vertex_array(Some(vao));
            }
        } else {
            device.bind_buffer(Some(buffer.handle()));
            Self::bind_attribute_pointers(&mut *device, &self.declaration, buffer.offset());
        }

        device.draw_arrays(self.draw_mode, 0, self.vertex_count as u32);

        if self.use_vertex_array {
            device.bind_vertex_array(None);
        } else {
            for element in self.declaration.elements() {
                device.disable_attribute(element.semantic.location());
            }
            device.bind_buffer(None);
        }
    }

    /// Advance the animation clock. Typically called once per frame with the
    /// time since the last frame.
    pub fn elapse(&mut self, time: Duration) {
        self.time += time;
    }

    // ===== INTERNALS =====

    fn bind_attribute_pointers(
        device: &mut dyn crate::graphics_device::GraphicsDevice,
        declaration: &VertexDeclaration,
        base_offset: usize,
    ) {
        let stride = declaration.vertex_size();
        for element in declaration.elements() {
            let location = element.semantic.location();
            device.enable_attribute(location);
            device.set_attribute_pointer(
                location,
                element.components() as u32,
                base_offset + element.offset,
                if element.stride > 0 { element.stride } else { stride },
            );
        }
    }

    fn apply_material_uniforms(
        &self,
        device: &mut dyn crate::graphics_device::GraphicsDevice,
        program: &ShaderProgram,
    ) {
        let Some(material) = self.material.as_ref() else {
            return;
        };
        let material = material.lock().unwrap();
        let handle = program.handle();

        device.set_uniform_vec4(handle, uniform_name::MATERIAL_AMBIENT, material.ambient_color().to_vec4());
        device.set_uniform_vec4(handle, uniform_name::MATERIAL_DIFFUSE, material.diffuse_color().to_vec4());
        device.set_uniform_vec4(handle, uniform_name::MATERIAL_SPECULAR, material.specular_color().to_vec4());
        device.set_uniform_vec4(handle, uniform_name::MATERIAL_EMISSIVE, material.emissive_color().to_vec4());
        device.set_uniform_f32(handle, uniform_name::MATERIAL_SHININESS, material.shininess());
        device.set_uniform_i32(
            handle,
            uniform_name::MATERIAL_LIGHTING_ENABLED,
            material.lighting_enabled() as i32,
        );
        device.set_uniform_i32(handle, uniform_name::MATERIAL_DIFFUSE_MAP, 0);
        device.set_uniform_i32(handle, uniform_name::MATERIAL_NORMAL_MAP, 1);
        device.set_uniform_i32(handle, uniform_name::MATERIAL_SPECULAR_MAP, 2);
        device.set_uniform_i32(handle, uniform_name::MATERIAL_EMISSIVE_MAP, 3);
    }

    fn bind_textures(
        &self,
        device: &mut dyn crate::graphics_device::GraphicsDevice,
        shader_program: Option<&ShaderProgram>,
    ) {
        // An explicit batch texture takes precedence over the material's
        // diffuse map
        let diffuse = self.texture.handle_at(self.time).or_else(|| {
            self.material
                .as_ref()
                .and_then(|m| m.lock().unwrap().diffuse_map_at(self.time))
                .map(|t| t.handle())
        });

        if let Some(handle) = diffuse {
            device.bind_texture_at(handle, 0);
        }

        // The remaining maps only matter to shader-driven passes
        if shader_program.is_some() {
            if let Some(material) = self.material.as_ref() {
                let material = material.lock().unwrap();
                if let Some(normal) = material.normal_map_at(self.time) {
                    device.bind_texture_at(normal.handle(), 1);
                }
                if let Some(specular) = material.specular_map_at(self.time) {
                    device.bind_texture_at(specular.handle(), 2);
                }
                if let Some(emissive) = material.emissive_map_at(self.time) {
                    device.bind_texture_at(emissive.handle(), 3);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
