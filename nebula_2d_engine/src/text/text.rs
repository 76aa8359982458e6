/// Text content and layout
///
/// A text is an ordered list of styled blocks laid out against a font
/// atlas: line breaking (explicit newlines plus greedy word wrap inside an
/// optional area), horizontal/vertical alignment and padding. Layout output
/// is consumed by the text drawable to emit glyph quads.

use glam::Vec2;

use crate::utils::Color;

use super::font::{FontAtlas, Glyph};

/// Horizontal alignment of each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment of the whole text within its area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Decoration drawn across a block's glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoration {
    Underline,
    Strikethrough,
}

/// A run of characters sharing one style
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub content: String,
    /// None inherits the text's default color
    pub color: Option<Color>,
    pub decoration: Option<TextDecoration>,
    /// None inherits the block (or default) color
    pub decoration_color: Option<Color>,
}

impl TextBlock {
    /// Plain block in the inherited color
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: None,
            decoration: None,
            decoration_color: None,
        }
    }

    /// Block with an explicit color
    pub fn colored(content: impl Into<String>, color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::plain(content)
        }
    }

    /// Add a decoration
    pub fn with_decoration(mut self, decoration: TextDecoration) -> Self {
        self.decoration = Some(decoration);
        self
    }
}

/// One glyph placed by layout
#[derive(Debug, Clone, Copy)]
pub struct PlacedGlyph {
    /// Pen position (baseline origin) of the glyph
    pub pen: Vec2,
    pub glyph: Glyph,
    pub color: Color,
}

/// One decoration run placed by layout
#[derive(Debug, Clone, Copy)]
pub struct PlacedDecoration {
    /// Left end of the run on the baseline
    pub start: Vec2,
    pub width: f32,
    pub decoration: TextDecoration,
    pub color: Color,
}

/// Full layout result
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    pub decorations: Vec<PlacedDecoration>,
    /// Number of laid out lines
    pub line_count: usize,
}

/// Text content plus layout parameters
#[derive(Debug, Clone)]
pub struct Text {
    blocks: Vec<TextBlock>,
    default_color: Color,
    alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    /// Wrapping/alignment area; None lays out unbounded
    area_size: Option<Vec2>,
    padding: Vec2,
    /// Multiplier on the font's line height
    line_height_factor: f32,
}

impl Text {
    /// Single plain block
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            blocks: vec![TextBlock::plain(content)],
            default_color: Color::WHITE,
            alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            area_size: None,
            padding: Vec2::ZERO,
            line_height_factor: 1.0,
        }
    }

    /// Text from styled blocks
    pub fn with_blocks(blocks: Vec<TextBlock>) -> Self {
        Self {
            blocks,
            ..Self::new("")
        }
    }

    // ===== MODIFIERS =====

    /// Replace the content with a single plain block
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.blocks = vec![TextBlock::plain(content)];
    }

    /// Replace all blocks
    pub fn set_blocks(&mut self, blocks: Vec<TextBlock>) {
        self.blocks = blocks;
    }

    /// Set the default color inherited by unstyled blocks
    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    /// Set the horizontal alignment
    pub fn set_alignment(&mut self, alignment: HorizontalAlignment) {
        self.alignment = alignment;
    }

    /// Set the vertical alignment
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.vertical_alignment = alignment;
    }

    /// Set (or clear) the wrapping/alignment area
    pub fn set_area_size(&mut self, area_size: Option<Vec2>) {
        self.area_size = area_size;
    }

    /// Set the padding inside the area
    pub fn set_padding(&mut self, padding: Vec2) {
        self.padding = padding;
    }

    /// Set the line height multiplier
    pub fn set_line_height_factor(&mut self, factor: f32) {
        self.line_height_factor = factor;
    }

    // ===== OBSERVERS =====

    /// Blocks in order
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// Default color
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Horizontal alignment
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Vertical alignment
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Area size, if any
    pub fn area_size(&self) -> Option<Vec2> {
        self.area_size
    }

    /// Padding
    pub fn padding(&self) -> Vec2 {
        self.padding
    }

    /// Line height multiplier
    pub fn line_height_factor(&self) -> f32 {
        self.line_height_factor
    }

    // ===== LAYOUT =====

    /// Lay this text out against a font atlas.
    ///
    /// The origin is the top-left corner of the text (or of the area when
    /// one is set); y grows upward, so baselines descend into negative y.
    pub fn layout(&self, font: &FontAtlas) -> TextLayout {
        let line_height = font.line_height() * self.line_height_factor;
        let wrap_width = self
            .area_size
            .map(|area| (area.x - self.padding.x * 2.0).max(0.0));

        let lines = self.break_lines(font, wrap_width);
        let line_count = lines.len();
        let total_height = line_count as f32 * line_height;

        let top = match (self.vertical_alignment, self.area_size) {
            (VerticalAlignment::Top, _) | (_, None) => -self.padding.y,
            (VerticalAlignment::Middle, Some(area)) => -(area.y - total_height) * 0.5,
            (VerticalAlignment::Bottom, Some(area)) => -(area.y - total_height) + self.padding.y,
        };

        let mut layout = TextLayout {
            line_count,
            ..TextLayout::default()
        };

        for (line_index, line) in lines.iter().enumerate() {
            let line_width: f32 = line
                .iter()
                .filter_map(|&(c, _)| font.glyph(c))
                .map(|glyph| glyph.advance)
                .sum();

            let mut pen_x = self.padding.x
                + match (self.alignment, self.area_size) {
                    (HorizontalAlignment::Left, _) => 0.0,
                    (HorizontalAlignment::Center, Some(area)) => {
                        (area.x - self.padding.x * 2.0 - line_width) * 0.5
                    }
                    (HorizontalAlignment::Center, None) => -line_width * 0.5,
                    (HorizontalAlignment::Right, Some(area)) => {
                        area.x - self.padding.x * 2.0 - line_width
                    }
                    (HorizontalAlignment::Right, None) => -line_width,
                };

            let baseline = top - (line_index + 1) as f32 * line_height;

            // Decoration runs: contiguous same-block spans of this line
            let mut run_start: Option<(usize, f32)> = None;
            let mut flush_run = |layout: &mut TextLayout, block_index: usize, x0: f32, x1: f32| {
                let block = &self.blocks[block_index];
                if let Some(decoration) = block.decoration {
                    let color = block
                        .decoration_color
                        .or(block.color)
                        .unwrap_or(self.default_color);
                    layout.decorations.push(PlacedDecoration {
                        start: Vec2::new(x0, baseline),
                        width: x1 - x0,
                        decoration,
                        color,
                    });
                }
            };

            for &(character, block_index) in line {
                let Some(glyph) = font.glyph(character) else {
                    continue;
                };

                match run_start {
                    Some((current, _)) if current == block_index => {}
                    Some((current, x0)) => {
                        flush_run(&mut layout, current, x0, pen_x);
                        run_start = Some((block_index, pen_x));
                    }
                    None => run_start = Some((block_index, pen_x)),
                }

                let color = self.blocks[block_index].color.unwrap_or(self.default_color);
                layout.glyphs.push(PlacedGlyph {
                    pen: Vec2::new(pen_x, baseline),
                    glyph: *glyph,
                    color,
                });

                pen_x += glyph.advance;
            }

            if let Some((current, x0)) = run_start {
                flush_run(&mut layout, current, x0, pen_x);
            }
        }

        layout
    }

    /// Break the flattened content into lines: explicit newlines always
    /// break; greedy word wrap applies within a wrap width.
    fn break_lines(&self, font: &FontAtlas, wrap_width: Option<f32>) -> Vec<Vec<(char, usize)>> {
        let mut lines: Vec<Vec<(char, usize)>> = Vec::new();
        let mut current: Vec<(char, usize)> = Vec::new();
        let mut current_width = 0.0_f32;

        // A word plus its trailing width, accumulated until a break chance
        let mut word: Vec<(char, usize)> = Vec::new();
        let mut word_width = 0.0_f32;

        let space_advance = font.glyph(' ').map(|g| g.advance).unwrap_or(0.0);
        let mut commit_word =
            |current: &mut Vec<(char, usize)>,
             current_width: &mut f32,
             word: &mut Vec<(char, usize)>,
             word_width: &mut f32,
             lines: &mut Vec<Vec<(char, usize)>>| {
                if let Some(width) = wrap_width {
                    // Fit test ignores the word's trailing space
                    let trimmed = if word.last().map(|&(c, _)| c == ' ').unwrap_or(false) {
                        *word_width - space_advance
                    } else {
                        *word_width
                    };

                    if !current.is_empty() && *current_width + trimmed > width {
                        // Drop the trailing space before the wrap
                        while current.last().map(|&(c, _)| c == ' ').unwrap_or(false) {
                            current.pop();
                        }
                        lines.push(std::mem::take(current));
                        *current_width = 0.0;
                    }
                }
                current.append(word);
                *current_width += *word_width;
                *word_width = 0.0;
            };

        for (block_index, block) in self.blocks.iter().enumerate() {
            for character in block.content.chars() {
                match character {
                    '\n' => {
                        commit_word(&mut current, &mut current_width, &mut word, &mut word_width, &mut lines);
                        lines.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    ' ' => {
                        word.push((' ', block_index));
                        word_width += font.glyph(' ').map(|g| g.advance).unwrap_or(0.0);
                        commit_word(&mut current, &mut current_width, &mut word, &mut word_width, &mut lines);
                    }
                    _ => {
                        word.push((character, block_index));
                        word_width += font.glyph(character).map(|g| g.advance).unwrap_or(0.0);
                    }
                }
            }
        }

        commit_word(&mut current, &mut current_width, &mut word, &mut word_width, &mut lines);
        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }

        lines
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
