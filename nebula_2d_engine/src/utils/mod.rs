/// Value types shared across the engine

pub mod aabb;
pub mod color;
pub mod obb;
pub mod ray;
pub mod rect;
pub mod sphere;

pub use aabb::Aabb;
pub use color::Color;
pub use obb::Obb;
pub use ray::Ray;
pub use rect::Rect;
pub use sphere::Sphere;
