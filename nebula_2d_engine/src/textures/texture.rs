/// Texture resource description
///
/// A texture is a device handle plus extents and sampler parameters. The
/// pixel data itself lives on the GPU; this type only describes it.

use glam::Vec2;

use crate::graphics_device::TextureHandle;

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Clamp,
    Repeat,
}

/// A texture already resident on the graphics device
#[derive(Debug, Clone)]
pub struct Texture {
    handle: TextureHandle,
    width: u32,
    height: u32,
    min_filter: TextureFilter,
    mag_filter: TextureFilter,
    s_wrap: TextureWrap,
    t_wrap: TextureWrap,
    /// Sub-region of the underlying image this texture maps to,
    /// (lower left, upper right) in normalized coordinates.
    /// (0,0)-(1,1) for a whole texture; narrower for an atlas region.
    lower_left: Vec2,
    upper_right: Vec2,
}

impl Texture {
    /// Create a texture covering its whole image, with linear filtering and
    /// clamped wrap on both axes
    pub fn new(handle: TextureHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
            min_filter: TextureFilter::Linear,
            mag_filter: TextureFilter::Linear,
            s_wrap: TextureWrap::Clamp,
            t_wrap: TextureWrap::Clamp,
            lower_left: Vec2::ZERO,
            upper_right: Vec2::ONE,
        }
    }

    // ===== BUILDER-STYLE MODIFIERS =====

    /// Set min/mag filters
    pub fn with_filters(mut self, min: TextureFilter, mag: TextureFilter) -> Self {
        self.min_filter = min;
        self.mag_filter = mag;
        self
    }

    /// Set s/t wrap modes
    pub fn with_wrap(mut self, s: TextureWrap, t: TextureWrap) -> Self {
        self.s_wrap = s;
        self.t_wrap = t;
        self
    }

    /// Set the normalized sub-region this texture maps to (atlas region)
    pub fn with_tex_coords(mut self, lower_left: Vec2, upper_right: Vec2) -> Self {
        self.lower_left = lower_left;
        self.upper_right = upper_right;
        self
    }

    // ===== OBSERVERS =====

    /// Device handle
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Extents in pixels as (width, height)
    pub fn extents(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Min filter
    pub fn min_filter(&self) -> TextureFilter {
        self.min_filter
    }

    /// Mag filter
    pub fn mag_filter(&self) -> TextureFilter {
        self.mag_filter
    }

    /// Wrap mode on s
    pub fn s_wrap(&self) -> TextureWrap {
        self.s_wrap
    }

    /// Wrap mode on t
    pub fn t_wrap(&self) -> TextureWrap {
        self.t_wrap
    }

    /// Normalized sub-region as (lower left, upper right)
    pub fn tex_coords(&self) -> (Vec2, Vec2) {
        (self.lower_left, self.upper_right)
    }

    /// Per-axis repeatability.
    ///
    /// A texture can repeat on an axis when it wraps on that axis and
    /// covers its whole image (an atlas region cannot repeat).
    pub fn is_repeatable(&self) -> (bool, bool) {
        let whole_s = self.lower_left.x == 0.0 && self.upper_right.x == 1.0;
        let whole_t = self.lower_left.y == 0.0 && self.upper_right.y == 1.0;
        (
            self.s_wrap == TextureWrap::Repeat && whole_s,
            self.t_wrap == TextureWrap::Repeat && whole_t,
        )
    }
}
