/// Text drawable
///
/// Lays its text out against a font atlas and emits six vertices per glyph
/// (two triangles) with positions, per-block colors and 3-component texture
/// coordinates (u, v, atlas layer). Decoration runs (underline and
/// strikethrough) go into a separate untextured primitive.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;

use crate::graphics_device::DrawMode;
use crate::render::renderer::{PrimitiveKey, Renderer};
use crate::render::vertex::{AttributeSemantic, VertexDeclaration, VertexElementType};
use crate::render::RenderPrimitive;
use crate::text::text::{PlacedDecoration, PlacedGlyph};
use crate::text::{FontAtlas, Text, TextDecoration};
use crate::utils::{Aabb, Color};

use super::movable_object::{MovableData, NodeContext};
use super::query::QueryTypeFlags;

/// Floats per glyph vertex: position (3) + color (4) + tex coord (3)
const GLYPH_VERTEX_COMPONENTS: usize = 10;
/// Floats per decoration vertex: position (3) + color (4)
const DECORATION_VERTEX_COMPONENTS: usize = 7;

/// Glyph quad declaration: position, color and layered tex coord
fn glyph_vertex_declaration() -> VertexDeclaration {
    let float_size = std::mem::size_of::<f32>();
    let stride = GLYPH_VERTEX_COMPONENTS * float_size;

    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, stride);
    declaration.add_element(AttributeSemantic::Color, VertexElementType::Float4, 3 * float_size, stride);
    declaration.add_element(AttributeSemantic::TexCoord, VertexElementType::Float3, 7 * float_size, stride);
    declaration
}

/// Decoration declaration: position and color only
fn decoration_vertex_declaration() -> VertexDeclaration {
    let float_size = std::mem::size_of::<f32>();
    let stride = DECORATION_VERTEX_COMPONENTS * float_size;

    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, stride);
    declaration.add_element(AttributeSemantic::Color, VertexElementType::Float4, 3 * float_size, stride);
    declaration
}

fn push_glyph_quad(out: &mut Vec<f32>, placed: &PlacedGlyph) {
    let glyph = &placed.glyph;
    let x0 = placed.pen.x + glyph.left;
    let y1 = placed.pen.y + glyph.top;
    let y0 = y1 - glyph.height;
    let x1 = x0 + glyph.width;
    let layer = glyph.layer as f32;
    let color = placed.color;

    let mut vertex = |x: f32, y: f32, u: f32, v: f32| {
        out.extend_from_slice(&[
            x, y, 0.0,
            color.r, color.g, color.b, color.a,
            u, v, layer,
        ]);
    };

    vertex(x0, y1, 0.0, 1.0);
    vertex(x0, y0, 0.0, 0.0);
    vertex(x1, y0, 1.0, 0.0);
    vertex(x1, y0, 1.0, 0.0);
    vertex(x1, y1, 1.0, 1.0);
    vertex(x0, y1, 0.0, 1.0);
}

fn push_decoration_quad(out: &mut Vec<f32>, run: &PlacedDecoration, line_height: f32) {
    let thickness = (line_height * 0.08).max(1.0);
    let y_center = match run.decoration {
        TextDecoration::Underline => run.start.y - thickness,
        TextDecoration::Strikethrough => run.start.y + line_height * 0.3,
    };
    let y0 = y_center - thickness * 0.5;
    let y1 = y_center + thickness * 0.5;
    let x0 = run.start.x;
    let x1 = run.start.x + run.width;
    let color = run.color;

    let mut vertex = |x: f32, y: f32| {
        out.extend_from_slice(&[x, y, 0.0, color.r, color.g, color.b, color.a]);
    };

    vertex(x0, y1);
    vertex(x0, y0);
    vertex(x1, y0);
    vertex(x1, y0);
    vertex(x1, y1);
    vertex(x0, y1);
}

/// A drawable text object
pub struct DrawableText {
    data: MovableData,
    text: Text,
    font: Arc<FontAtlas>,
    /// Offset applied to the layout origin, in local space
    position: Vec2,

    glyph_primitive: Option<PrimitiveKey>,
    decoration_primitive: Option<PrimitiveKey>,
    update_text: bool,
}

impl DrawableText {
    /// Drawable over the given text and font
    pub fn new(text: Text, font: Arc<FontAtlas>) -> Self {
        Self {
            data: MovableData::new(QueryTypeFlags::TEXT),
            text,
            font,
            position: Vec2::ZERO,
            glyph_primitive: None,
            decoration_primitive: None,
            update_text: true,
        }
    }

    // ===== MODIFIERS =====

    /// Replace the text
    pub fn set_text(&mut self, text: Text) {
        self.text = text;
        self.update_text = true;
    }

    /// Replace the content with a single plain block
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.text.set_content(content);
        self.update_text = true;
    }

    /// Set the default text color
    pub fn set_default_color(&mut self, color: Color) {
        self.text.set_default_color(color);
        self.update_text = true;
    }

    /// Set the local layout origin offset
    pub fn set_position(&mut self, position: Vec2) {
        if self.position != position {
            self.position = position;
            self.update_text = true;
        }
    }

    /// Replace the font atlas
    pub fn set_font(&mut self, font: Arc<FontAtlas>) {
        self.font = font;
        self.update_text = true;
    }

    // ===== OBSERVERS =====

    /// The text
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// The text, mutably. The layout is regenerated on the next prepare.
    pub fn text_mut(&mut self) -> &mut Text {
        self.update_text = true;
        &mut self.text
    }

    /// The font atlas
    pub fn font(&self) -> &Arc<FontAtlas> {
        &self.font
    }

    /// Local layout origin offset
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Common movable state
    pub fn data(&self) -> &MovableData {
        &self.data
    }

    /// Common movable state, mutably
    pub fn data_mut(&mut self) -> &mut MovableData {
        &mut self.data
    }

    /// Key of the glyph primitive; None before the first prepare
    pub fn glyph_primitive_key(&self) -> Option<PrimitiveKey> {
        self.glyph_primitive
    }

    /// Key of the decoration primitive; None before the first prepare
    pub fn decoration_primitive_key(&self) -> Option<PrimitiveKey> {
        self.decoration_primitive
    }

    // ===== FRAME HOOKS =====

    /// Advance time; text has no time-dependent state
    pub fn elapse(&mut self, _time: Duration) {}

    /// Regenerate glyph/decoration geometry when flagged and sync both
    /// primitives with the renderer
    pub fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        let glyph_key = Self::ensure_primitive(
            &mut self.glyph_primitive,
            glyph_vertex_declaration(),
            renderer,
            &mut self.update_text,
        );
        let decoration_key = Self::ensure_primitive(
            &mut self.decoration_primitive,
            decoration_vertex_declaration(),
            renderer,
            &mut self.update_text,
        );

        if self.update_text {
            let layout = self.text.layout(&self.font);
            let offset = self.position;

            let mut glyph_data =
                Vec::with_capacity(layout.glyphs.len() * 6 * GLYPH_VERTEX_COMPONENTS);
            for placed in &layout.glyphs {
                let shifted = PlacedGlyph {
                    pen: placed.pen + offset,
                    ..*placed
                };
                push_glyph_quad(&mut glyph_data, &shifted);
            }

            let mut decoration_data =
                Vec::with_capacity(layout.decorations.len() * 6 * DECORATION_VERTEX_COMPONENTS);
            for run in &layout.decorations {
                let shifted = PlacedDecoration {
                    start: run.start + offset,
                    ..*run
                };
                push_decoration_quad(&mut decoration_data, &shifted, self.font.line_height());
            }

            let glyph_primitive = renderer.primitive_mut(glyph_key).expect("glyph primitive");
            glyph_primitive.set_vertex_data(glyph_data);
            glyph_primitive.set_texture(Some(self.font.handle()));

            let decoration_primitive = renderer
                .primitive_mut(decoration_key)
                .expect("decoration primitive");
            decoration_primitive.set_vertex_data(decoration_data);

            self.update_text = false;
        }

        let world_visible = ctx.world_visible && self.data.visible();
        let mut aabb = Aabb::EMPTY;

        for key in [glyph_key, decoration_key] {
            if let Some(primitive) = renderer.primitive_mut(key) {
                primitive.set_model_matrix(ctx.full_transformation);
                primitive.set_world_visible(world_visible);
            }
            if let Some(primitive) = renderer.primitive(key) {
                aabb.merge(primitive.world_aabb());
            }
        }

        self.data.update_bounds(aabb);
    }

    /// Mark both primitives world-invisible (owning node hidden)
    pub fn hide(&mut self, renderer: &mut Renderer) {
        for key in [self.glyph_primitive, self.decoration_primitive].into_iter().flatten() {
            if let Some(primitive) = renderer.primitive_mut(key) {
                primitive.set_world_visible(false);
            }
        }
    }

    /// Detach both primitives from the renderer
    pub fn detach(&mut self, renderer: &mut Renderer) {
        for key in [self.glyph_primitive.take(), self.decoration_primitive.take()]
            .into_iter()
            .flatten()
        {
            renderer.remove_primitive(key);
        }
        self.update_text = true;
    }

    fn ensure_primitive(
        slot: &mut Option<PrimitiveKey>,
        declaration: VertexDeclaration,
        renderer: &mut Renderer,
        update_text: &mut bool,
    ) -> PrimitiveKey {
        match *slot {
            Some(key) if renderer.contains_primitive(key) => key,
            _ => {
                let primitive = RenderPrimitive::new(DrawMode::Triangles, declaration, true);
                let key = renderer.add_primitive(primitive);
                *slot = Some(key);
                *update_text = true;
                key
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "drawable_text_tests.rs"]
mod tests;
