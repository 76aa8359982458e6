/// Graphics device module - the platform abstraction consumed by the renderer
///
/// Backend implementations (OpenGL, Vulkan, ...) live outside this crate and
/// implement the GraphicsDevice trait. The in-crate MockGraphicsDevice runs
/// the whole pipeline without a GPU and backs the test suite.

pub mod graphics_device;

// Mock graphics device (no GPU required); compiled unconditionally so
// integration tests and headless users can drive the full pipeline.
pub mod mock_graphics_device;

pub use graphics_device::*;
pub use mock_graphics_device::{MockGraphicsDevice, UniformValue};
