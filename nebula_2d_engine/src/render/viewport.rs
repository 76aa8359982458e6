/// Viewport: the pixel rectangle rendered into

use glam::Vec2;

use crate::graphics_device::GraphicsDevice;

/// A viewport rectangle with an optional base (design) size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    /// Design-time size used to scale viewport-space metrics into camera
    /// space; defaults to the pixel size
    base_size: Option<Vec2>,
}

impl Viewport {
    /// Viewport at the origin with the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            base_size: None,
        }
    }

    /// Viewport with explicit bounds
    pub fn with_bounds(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            base_size: None,
        }
    }

    /// Set the design-time base size
    pub fn with_base_size(mut self, base_size: Vec2) -> Self {
        self.base_size = Some(base_size);
        self
    }

    /// Resize the pixel rectangle
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    // ===== OBSERVERS =====

    /// Origin x in pixels
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Origin y in pixels
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Width / height; 1 for a degenerate viewport
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0 {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }

    /// Ratio between the current pixel size and the base size, per axis.
    ///
    /// Used to scale viewport-space metrics (e.g. texture pixel sizes) into
    /// camera space when the window has been resized away from its design
    /// size.
    pub fn viewport_to_camera_ratio(&self) -> Vec2 {
        match self.base_size {
            Some(base) if base.x > 0.0 && base.y > 0.0 => self.size() / base,
            _ => Vec2::ONE,
        }
    }

    /// Apply this viewport to the device
    pub fn apply(&self, device: &mut dyn GraphicsDevice) {
        device.set_viewport(self.x, self.y, self.width, self.height);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
