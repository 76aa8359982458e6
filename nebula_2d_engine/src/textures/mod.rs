/// Texture and animation types consumed by materials and batches
///
/// Decoding image files and uploading pixel data is out of scope; a Texture
/// here is a handle plus extents and sampler parameters, assumed already
/// resident on the device.

pub mod animation;
pub mod texture;

pub use animation::{Animation, PlaybackDirection};
pub use texture::{Texture, TextureFilter, TextureWrap};
