/// Scene module: graph, manager, attachables and queries

pub mod camera;
pub mod drawable_particle_system;
pub mod drawable_text;
pub mod graph;
pub mod light;
pub mod model;
pub mod movable_object;
pub mod query;
pub mod scene_manager;
pub mod shapes;

pub use camera::Camera;
pub use drawable_particle_system::DrawableParticleSystem;
pub use drawable_text::DrawableText;
pub use graph::{AttachedObject, NodeKey, RotationOrigin, SceneGraph, SceneNode, SceneNodeListener};
pub use light::{Light, LightType};
pub use model::{Model, ShapeItem, ShapeKey};
pub use movable_object::{MovableData, NodeContext};
pub use query::{IntersectionSceneQuery, QueryTypeFlags, RaySceneQuery, SceneQuery};
pub use scene_manager::{CameraKey, LightKey, MovableItem, MovableKey, SceneManager};
