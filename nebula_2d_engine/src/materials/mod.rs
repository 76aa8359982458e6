/// Material module

pub mod material;

pub use material::{Material, TextureMap};
