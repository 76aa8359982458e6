/// Tests for VertexBufferObject against the mock device.

use super::*;
use crate::graphics_device::{GraphicsDevice, MockGraphicsDevice};
use std::sync::{Arc, Mutex};

fn mock_device() -> (SharedGraphicsDevice, Arc<Mutex<MockGraphicsDevice>>) {
    let concrete = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    let shared: SharedGraphicsDevice = concrete.clone();
    (shared, concrete)
}

#[test]
fn test_lazy_handle_allocation() {
    let (device, _concrete) = mock_device();
    let mut vbo = VertexBufferObject::new(device, BufferUsage::Stream);

    assert!(vbo.handle().is_none());
    assert!(vbo.ensure_handle().is_some());
    assert!(vbo.handle().is_some());
}

#[test]
fn test_reserve_and_data() {
    let (device, concrete) = mock_device();
    let mut vbo = VertexBufferObject::new(device, BufferUsage::Stream);

    vbo.reserve(64, BufferUsage::Stream).unwrap();
    assert_eq!(vbo.size(), 64);

    let backing: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0];
    vbo.data_at(VertexDataView::from_floats(0, 4), &backing, 16).unwrap();

    let handle = vbo.handle().unwrap();
    let guard = concrete.lock().unwrap();
    let contents = guard.buffer_contents(handle).unwrap();
    let floats: &[f32] = bytemuck::cast_slice(&contents[16..32]);
    assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_full_data_sets_size() {
    let (device, _concrete) = mock_device();
    let mut vbo = VertexBufferObject::new(device, BufferUsage::Dynamic);

    let backing: Vec<f32> = vec![0.5; 8];
    vbo.data(VertexDataView::from_floats(0, 8), &backing).unwrap();
    assert_eq!(vbo.size(), 32);
}

#[test]
fn test_exhaustion_reports_out_of_memory() {
    let (device, concrete) = mock_device();
    concrete.lock().unwrap().fail_next_buffer_create();

    let mut vbo = VertexBufferObject::new(device, BufferUsage::Stream);
    assert!(matches!(
        vbo.reserve(16, BufferUsage::Stream),
        Err(crate::error::Nebula2dError::OutOfMemory)
    ));

    // The device recovered; a later attempt succeeds
    assert!(vbo.reserve(16, BufferUsage::Stream).is_ok());
}

#[test]
fn test_sub_buffer_view() {
    let (device, _concrete) = mock_device();
    let mut vbo = VertexBufferObject::new(device, BufferUsage::Stream);

    assert!(vbo.sub_buffer(0, 16).is_none());

    vbo.reserve(64, BufferUsage::Stream).unwrap();
    let view = vbo.sub_buffer(16, 32).unwrap();
    assert_eq!(view.offset(), 16);
    assert_eq!(view.size(), 32);
    assert_eq!(Some(view.handle()), vbo.handle());
}

#[test]
fn test_drop_deletes_handle() {
    let (device, concrete) = mock_device();
    {
        let mut vbo = VertexBufferObject::new(device, BufferUsage::Stream);
        vbo.reserve(16, BufferUsage::Stream).unwrap();
        assert_eq!(concrete.lock().unwrap().buffer_count(), 1);
    }
    assert_eq!(concrete.lock().unwrap().buffer_count(), 0);
}
