/// Vertex buffer object: a GPU buffer handle plus usage and size
///
/// Thin wrapper over the GraphicsDevice buffer calls. The handle is created
/// lazily so an exhausted device can be retried on a later frame.

use crate::error::Result;
use crate::graphics_device::{BufferHandle, BufferUsage, SharedGraphicsDevice};

use super::data_view::VertexDataView;

/// A view into a sub-range of a vertex buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferView {
    handle: BufferHandle,
    /// Byte offset into the buffer
    offset: usize,
    /// Byte size of the viewed range
    size: usize,
}

impl VertexBufferView {
    /// Underlying buffer handle
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Byte offset into the buffer
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte size of the viewed range
    pub fn size(&self) -> usize {
        self.size
    }
}

/// A GPU vertex buffer
pub struct VertexBufferObject {
    device: SharedGraphicsDevice,
    handle: Option<BufferHandle>,
    usage: BufferUsage,
    size: usize,
}

impl VertexBufferObject {
    /// Create a new vertex buffer with the given usage hint.
    ///
    /// The device handle is allocated on first use.
    pub fn new(device: SharedGraphicsDevice, usage: BufferUsage) -> Self {
        Self {
            device,
            handle: None,
            usage,
            size: 0,
        }
    }

    /// Device handle; None while unallocated
    pub fn handle(&self) -> Option<BufferHandle> {
        self.handle
    }

    /// Usage hint
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// Size in bytes of the GPU store
    pub fn size(&self) -> usize {
        self.size
    }

    /// Ensure the device handle exists. Returns None when the device is out
    /// of memory; the caller is expected to retry next frame.
    pub fn ensure_handle(&mut self) -> Option<BufferHandle> {
        if self.handle.is_none() {
            self.handle = self.device.lock().unwrap().create_buffer();
        }
        self.handle
    }

    /// Reserve (orphan) the GPU store at the given size
    pub fn reserve(&mut self, size: usize, usage: BufferUsage) -> Result<()> {
        let handle = self
            .ensure_handle()
            .ok_or(crate::error::Nebula2dError::OutOfMemory)?;

        self.device
            .lock()
            .unwrap()
            .buffer_reserve(handle, size, usage)?;
        self.usage = usage;
        self.size = size;
        Ok(())
    }

    /// Replace the whole GPU store with the viewed data
    pub fn data(&mut self, view: VertexDataView, backing: &[f32]) -> Result<()> {
        let handle = self
            .ensure_handle()
            .ok_or(crate::error::Nebula2dError::OutOfMemory)?;

        let bytes: &[u8] = bytemuck::cast_slice(view.slice(backing));
        self.device
            .lock()
            .unwrap()
            .buffer_data(handle, bytes, self.usage)?;
        self.size = bytes.len();
        Ok(())
    }

    /// Write the viewed data into the GPU store at the given byte offset
    pub fn data_at(&mut self, view: VertexDataView, backing: &[f32], offset: usize) -> Result<()> {
        let handle = self
            .ensure_handle()
            .ok_or(crate::error::Nebula2dError::OutOfMemory)?;

        let bytes: &[u8] = bytemuck::cast_slice(view.slice(backing));
        self.device
            .lock()
            .unwrap()
            .buffer_sub_data(handle, offset, bytes)
    }

    /// A view of this buffer in range [offset, offset + size)
    pub fn sub_buffer(&self, offset: usize, size: usize) -> Option<VertexBufferView> {
        self.handle.map(|handle| VertexBufferView {
            handle,
            offset,
            size,
        })
    }
}

impl PartialEq for VertexBufferObject {
    /// Value equality by handle
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Drop for VertexBufferObject {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Ok(mut device) = self.device.lock() {
                device.delete_buffer(handle);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
