/// Tests for VertexBatch against the mock device.

use super::*;
use crate::graphics_device::{BufferUsage, GraphicsDevice, MockGraphicsDevice};
use crate::render::vertex::buffer::VertexBufferObject;
use crate::render::vertex::declaration::VertexElementType;

use std::sync::{Arc, Mutex};

fn mock_device() -> (SharedGraphicsDevice, Arc<Mutex<MockGraphicsDevice>>) {
    let concrete = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    let shared: SharedGraphicsDevice = concrete.clone();
    (shared, concrete)
}

/// Position-only declaration: 3 floats per vertex
fn position_declaration() -> VertexDeclaration {
    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, 12);
    declaration
}

/// Declaration without a position attribute
fn color_only_declaration() -> VertexDeclaration {
    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Color, VertexElementType::Float4, 0, 16);
    declaration
}

#[test]
fn test_vertex_count_from_view() {
    let mut batch = VertexBatch::new(DrawMode::Triangles, position_declaration());
    assert_eq!(batch.vertex_count(), 0);

    batch.set_vertex_data(VertexDataView::from_floats(0, 9), true);
    assert_eq!(batch.vertex_count(), 3);

    batch.set_vertex_data(VertexDataView::from_floats(0, 18), true);
    assert_eq!(batch.vertex_count(), 6);
}

#[test]
fn test_prepare_uploads_pending_data() {
    let (device, concrete) = mock_device();

    let backing: Vec<f32> = (0..9).map(|i| i as f32).collect();
    let mut vbo = VertexBufferObject::new(device.clone(), BufferUsage::Stream);
    vbo.reserve(backing.len() * 4, BufferUsage::Stream).unwrap();

    let mut batch = VertexBatch::new(DrawMode::Triangles, position_declaration());
    batch.set_vertex_buffer(vbo.sub_buffer(0, 36), true);
    batch.set_vertex_data(VertexDataView::from_floats(0, 9), true);

    batch.prepare(&device, &backing);

    let guard = concrete.lock().unwrap();
    let contents = guard.buffer_contents(vbo.handle().unwrap()).unwrap();
    let floats: &[f32] = bytemuck::cast_slice(contents);
    assert_eq!(floats, backing.as_slice());
    // Vertex array was created and bound once
    assert_eq!(guard.stats().vertex_arrays_created, 1);
}

#[test]
fn test_prepare_is_idempotent_without_changes() {
    let (device, concrete) = mock_device();

    let backing: Vec<f32> = vec![0.0; 9];
    let mut vbo = VertexBufferObject::new(device.clone(), BufferUsage::Stream);
    vbo.reserve(36, BufferUsage::Stream).unwrap();

    let mut batch = VertexBatch::new(DrawMode::Triangles, position_declaration());
    batch.set_vertex_buffer(vbo.sub_buffer(0, 36), true);
    batch.set_vertex_data(VertexDataView::from_floats(0, 9), true);

    batch.prepare(&device, &backing);
    let uploads_after_first = concrete.lock().unwrap().stats().buffer_sub_uploads;

    batch.prepare(&device, &backing);
    assert_eq!(
        concrete.lock().unwrap().stats().buffer_sub_uploads,
        uploads_after_first
    );
}

#[test]
fn test_draw_issues_one_call() {
    let (device, concrete) = mock_device();

    let backing: Vec<f32> = vec![0.0; 18];
    let mut vbo = VertexBufferObject::new(device.clone(), BufferUsage::Stream);
    vbo.reserve(72, BufferUsage::Stream).unwrap();

    let mut batch = VertexBatch::new(DrawMode::Triangles, position_declaration());
    batch.set_vertex_buffer(vbo.sub_buffer(0, 72), true);
    batch.set_vertex_data(VertexDataView::from_floats(0, 18), true);
    batch.prepare(&device, &backing);

    batch.draw(&device, None);

    let guard = concrete.lock().unwrap();
    assert_eq!(guard.stats().draw_calls, 1);
    assert_eq!(guard.draws()[0], (DrawMode::Triangles, 0, 6));
}

#[test]
fn test_missing_position_attribute_is_noop_draw() {
    let (device, concrete) = mock_device();

    let backing: Vec<f32> = vec![0.0; 8];
    let mut vbo = VertexBufferObject::new(device.clone(), BufferUsage::Stream);
    vbo.reserve(32, BufferUsage::Stream).unwrap();

    let mut batch = VertexBatch::new(DrawMode::Triangles, color_only_declaration());
    batch.set_vertex_buffer(vbo.sub_buffer(0, 32), true);
    batch.set_vertex_data(VertexDataView::from_floats(0, 8), true);
    batch.prepare(&device, &backing);

    batch.draw(&device, None);
    assert_eq!(concrete.lock().unwrap().stats().draw_calls, 0);
}

#[test]
fn test_explicit_texture_takes_precedence_over_material() {
    use crate::graphics_device::TextureHandle;
    use crate::textures::Texture;

    let (device, concrete) = mock_device();

    let material_texture = Arc::new(Texture::new(TextureHandle::tex_2d(1), 32, 32));
    let material = Arc::new(Mutex::new(Material::with_diffuse_map("m", material_texture)));

    let backing: Vec<f32> = vec![0.0; 9];
    let mut vbo = VertexBufferObject::new(device.clone(), BufferUsage::Stream);
    vbo.reserve(36, BufferUsage::Stream).unwrap();

    let mut batch = VertexBatch::new(DrawMode::Triangles, position_declaration());
    batch.set_vertex_buffer(vbo.sub_buffer(0, 36), true);
    batch.set_vertex_data(VertexDataView::from_floats(0, 9), true);
    batch.set_material(Some(material));
    batch.set_texture(BatchTexture::Handle(TextureHandle::tex_2d(9)));
    batch.prepare(&device, &backing);

    batch.draw(&device, None);
    assert_eq!(
        concrete.lock().unwrap().bound_texture_at(0).unwrap().id,
        9
    );
}

#[test]
fn test_elapse_resolves_animation_frame() {
    use crate::graphics_device::TextureHandle;
    use crate::textures::{Animation, Texture};

    let frames = vec![
        Arc::new(Texture::new(TextureHandle::tex_2d(1), 16, 16)),
        Arc::new(Texture::new(TextureHandle::tex_2d(2), 16, 16)),
    ];
    let animation = Arc::new(Animation::new(frames, Duration::from_millis(100)));

    let mut batch = VertexBatch::new(DrawMode::Triangles, position_declaration());
    batch.set_texture(BatchTexture::Animation(animation));

    assert_eq!(batch.texture().handle_at(batch.time()).unwrap().id, 1);
    batch.elapse(Duration::from_millis(150));
    assert_eq!(batch.texture().handle_at(batch.time()).unwrap().id, 2);
}
