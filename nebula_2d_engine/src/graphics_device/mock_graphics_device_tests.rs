/// Unit tests for MockGraphicsDevice.

use super::*;

#[test]
fn test_create_and_delete_buffer() {
    let mut device = MockGraphicsDevice::new();

    let a = device.create_buffer().unwrap();
    let b = device.create_buffer().unwrap();
    assert_ne!(a, b);
    assert_eq!(device.buffer_count(), 2);
    assert_eq!(device.stats().buffers_created, 2);

    device.delete_buffer(a);
    assert_eq!(device.buffer_count(), 1);
    assert!(device.buffer_contents(a).is_none());
}

#[test]
fn test_buffer_create_failure() {
    let mut device = MockGraphicsDevice::new();

    device.fail_next_buffer_create();
    assert!(device.create_buffer().is_none());

    // Only the next call fails
    assert!(device.create_buffer().is_some());
}

#[test]
fn test_buffer_data_and_sub_data() {
    let mut device = MockGraphicsDevice::new();
    let handle = device.create_buffer().unwrap();

    device
        .buffer_data(handle, &[1, 2, 3, 4, 5, 6, 7, 8], BufferUsage::Stream)
        .unwrap();
    assert_eq!(device.buffer_contents(handle).unwrap(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(device.buffer_usage(handle), Some(BufferUsage::Stream));

    device.buffer_sub_data(handle, 2, &[9, 9]).unwrap();
    assert_eq!(device.buffer_contents(handle).unwrap(), &[1, 2, 9, 9, 5, 6, 7, 8]);

    assert_eq!(device.stats().buffer_uploads, 1);
    assert_eq!(device.stats().buffer_sub_uploads, 1);
}

#[test]
fn test_buffer_sub_data_out_of_range() {
    let mut device = MockGraphicsDevice::new();
    let handle = device.create_buffer().unwrap();

    device.buffer_reserve(handle, 4, BufferUsage::Stream).unwrap();
    assert!(device.buffer_sub_data(handle, 2, &[0, 0, 0]).is_err());
}

#[test]
fn test_buffer_reserve_zero_fills() {
    let mut device = MockGraphicsDevice::new();
    let handle = device.create_buffer().unwrap();

    device.buffer_reserve(handle, 16, BufferUsage::Stream).unwrap();
    assert_eq!(device.buffer_contents(handle).unwrap().len(), 16);
    assert!(device.buffer_contents(handle).unwrap().iter().all(|&b| b == 0));
}

#[test]
fn test_texture_binding() {
    let mut device = MockGraphicsDevice::new();

    let tex = TextureHandle::tex_2d(7);
    device.bind_texture(tex);
    assert_eq!(device.bound_texture_at(0), Some(tex));

    let atlas = TextureHandle::array_tex_2d(8);
    device.bind_texture_at(atlas, 1);
    assert_eq!(device.bound_texture_at(1), Some(atlas));
}

#[test]
fn test_draw_recording_and_stats() {
    let mut device = MockGraphicsDevice::new();

    device.draw_arrays(DrawMode::Triangles, 0, 6);
    device.draw_arrays(DrawMode::Points, 0, 100);

    assert_eq!(device.stats().draw_calls, 2);
    assert_eq!(device.draws()[0], (DrawMode::Triangles, 0, 6));
    assert_eq!(device.draws()[1], (DrawMode::Points, 0, 100));

    device.reset_stats();
    assert_eq!(device.stats(), GraphicsDeviceStats::default());
    assert!(device.draws().is_empty());
}

#[test]
fn test_draw_mode_mapping_is_total() {
    let modes = [
        DrawMode::Points,
        DrawMode::Lines,
        DrawMode::LineLoop,
        DrawMode::LineStrip,
        DrawMode::Triangles,
        DrawMode::TriangleFan,
        DrawMode::TriangleStrip,
        DrawMode::Quads,
        DrawMode::Polygon,
    ];

    let mut mapped: Vec<u32> = modes.iter().map(|&m| draw_mode_to_mock_mode(m)).collect();
    mapped.sort_unstable();
    mapped.dedup();
    assert_eq!(mapped.len(), modes.len());
}

#[test]
fn test_uniform_recording() {
    let mut device = MockGraphicsDevice::new();
    let program = ShaderProgramHandle(3);

    device.set_uniform_f32(program, "scene.gamma", 1.0);
    device.set_uniform_mat4(program, "matrix.projection", Mat4::IDENTITY);

    let uniforms = device.uniforms();
    assert_eq!(uniforms.len(), 2);
    assert_eq!(uniforms[0].1, "scene.gamma");
    assert_eq!(uniforms[1].2, UniformValue::Mat4(Mat4::IDENTITY));
}

#[test]
fn test_fixed_state() {
    let mut device = MockGraphicsDevice::new();

    device.set_point_size(4.0);
    device.set_line_width(2.0);
    device.set_wireframe(true);
    device.set_point_sprite(true);
    device.set_viewport(0, 0, 800, 600);

    assert_eq!(device.fixed_state(), (4.0, 2.0, true, true));
    assert_eq!(device.viewport(), (0, 0, 800, 600));
}
