/// Tests for text layout.

use super::*;
use crate::graphics_device::TextureHandle;

/// Monospace test atlas: every printable glyph advances 10, line height 16
fn test_font() -> FontAtlas {
    let mut font = FontAtlas::new("test", TextureHandle::array_tex_2d(1), 16.0);
    for (i, c) in ('a'..='z').chain(['A', 'B', ' ']).enumerate() {
        font.add_glyph(
            c,
            Glyph {
                advance: 10.0,
                width: 8.0,
                height: 12.0,
                left: 1.0,
                top: 12.0,
                layer: i as u32,
            },
        );
    }
    font
}

#[test]
fn test_single_line_layout() {
    let font = test_font();
    let text = Text::new("abc");
    let layout = text.layout(&font);

    assert_eq!(layout.line_count, 1);
    assert_eq!(layout.glyphs.len(), 3);
    assert_eq!(layout.glyphs[0].pen, Vec2::new(0.0, -16.0));
    assert_eq!(layout.glyphs[1].pen, Vec2::new(10.0, -16.0));
    assert_eq!(layout.glyphs[2].pen, Vec2::new(20.0, -16.0));
}

#[test]
fn test_newline_breaks_lines() {
    let font = test_font();
    let text = Text::new("ab\ncd");
    let layout = text.layout(&font);

    assert_eq!(layout.line_count, 2);
    assert_eq!(layout.glyphs[2].pen, Vec2::new(0.0, -32.0));
}

#[test]
fn test_word_wrap_inside_area() {
    let font = test_font();
    let mut text = Text::new("aaa bbb ccc");
    // Fits "aaa bbb" (70) but not "aaa bbb ccc" (110)
    text.set_area_size(Some(Vec2::new(75.0, 100.0)));

    let layout = text.layout(&font);
    assert_eq!(layout.line_count, 2);

    // Third word starts the second line at x 0
    let second_line_glyphs: Vec<_> = layout
        .glyphs
        .iter()
        .filter(|g| g.pen.y < -16.0)
        .collect();
    assert_eq!(second_line_glyphs.len(), 3);
    assert_eq!(second_line_glyphs[0].pen.x, 0.0);
}

#[test]
fn test_center_alignment_within_area() {
    let font = test_font();
    let mut text = Text::new("ab");
    text.set_area_size(Some(Vec2::new(100.0, 32.0)));
    text.set_alignment(HorizontalAlignment::Center);

    let layout = text.layout(&font);
    // Line width 20 inside 100: starts at 40
    assert_eq!(layout.glyphs[0].pen.x, 40.0);
}

#[test]
fn test_right_alignment_without_area() {
    let font = test_font();
    let mut text = Text::new("abcd");
    text.set_alignment(HorizontalAlignment::Right);

    let layout = text.layout(&font);
    assert_eq!(layout.glyphs[0].pen.x, -40.0);
}

#[test]
fn test_block_colors() {
    let font = test_font();
    let text = Text::with_blocks(vec![
        TextBlock::plain("a"),
        TextBlock::colored("b", Color::RED),
    ]);

    let layout = text.layout(&font);
    assert_eq!(layout.glyphs[0].color, Color::WHITE);
    assert_eq!(layout.glyphs[1].color, Color::RED);
}

#[test]
fn test_decoration_runs() {
    let font = test_font();
    let text = Text::with_blocks(vec![
        TextBlock::plain("ab"),
        TextBlock::colored("cd", Color::GREEN).with_decoration(TextDecoration::Underline),
    ]);

    let layout = text.layout(&font);
    assert_eq!(layout.decorations.len(), 1);

    let run = &layout.decorations[0];
    assert_eq!(run.decoration, TextDecoration::Underline);
    assert_eq!(run.color, Color::GREEN);
    assert_eq!(run.start, Vec2::new(20.0, -16.0));
    assert_eq!(run.width, 20.0);
}

#[test]
fn test_padding_offsets_origin() {
    let font = test_font();
    let mut text = Text::new("a");
    text.set_area_size(Some(Vec2::new(100.0, 50.0)));
    text.set_padding(Vec2::new(5.0, 3.0));

    let layout = text.layout(&font);
    assert_eq!(layout.glyphs[0].pen, Vec2::new(5.0, -19.0));
}

#[test]
fn test_characters_outside_atlas_are_skipped() {
    let font = test_font();
    let text = Text::new("a?b");
    let layout = text.layout(&font);

    assert_eq!(layout.glyphs.len(), 2);
    // The missing glyph contributes no advance
    assert_eq!(layout.glyphs[1].pen.x, 10.0);
}
