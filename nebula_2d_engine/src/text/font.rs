/// Font atlas: per-glyph metrics over an array texture

use rustc_hash::FxHashMap;

use crate::graphics_device::TextureHandle;

/// Metrics of one glyph in the atlas
#[derive(Debug, Clone, Copy)]
pub struct Glyph {
    /// Horizontal advance to the next glyph origin
    pub advance: f32,
    /// Glyph quad width
    pub width: f32,
    /// Glyph quad height
    pub height: f32,
    /// Left bearing from the pen position
    pub left: f32,
    /// Top bearing above the baseline
    pub top: f32,
    /// Array-texture layer holding this glyph
    pub layer: u32,
}

/// A glyph atlas resident on the device
pub struct FontAtlas {
    name: String,
    handle: TextureHandle,
    glyphs: FxHashMap<char, Glyph>,
    line_height: f32,
}

impl FontAtlas {
    /// Create an atlas over the given array texture
    pub fn new(name: impl Into<String>, handle: TextureHandle, line_height: f32) -> Self {
        Self {
            name: name.into(),
            handle,
            glyphs: FxHashMap::default(),
            line_height,
        }
    }

    /// Register a glyph
    pub fn add_glyph(&mut self, character: char, glyph: Glyph) {
        self.glyphs.insert(character, glyph);
    }

    /// Atlas name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device handle of the atlas array texture
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Baseline-to-baseline distance
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Metrics for a character; None for characters outside the atlas
    pub fn glyph(&self, character: char) -> Option<&Glyph> {
        self.glyphs.get(&character)
    }

    /// Advance-sum width of a string (characters outside the atlas are
    /// skipped)
    pub fn measure(&self, content: &str) -> f32 {
        content
            .chars()
            .filter_map(|c| self.glyph(c))
            .map(|glyph| glyph.advance)
            .sum()
    }
}
