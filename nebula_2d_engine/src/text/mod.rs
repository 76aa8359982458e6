/// Font atlas description and text layout model
///
/// Font rasterization is out of scope; a font here is a glyph atlas already
/// resident on the device (one array-texture layer per glyph) plus metrics.

pub mod font;
pub mod text;

pub use font::{FontAtlas, Glyph};
pub use text::{HorizontalAlignment, Text, TextBlock, TextDecoration, VerticalAlignment};
