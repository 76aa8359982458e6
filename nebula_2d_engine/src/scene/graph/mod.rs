/// Scene graph module

pub mod scene_graph;
pub mod scene_node;

pub use scene_graph::{SceneGraph, SceneNodeListener, MAX_LIGHT_COUNT};
pub use scene_node::{AttachedObject, NodeKey, RotationOrigin, SceneNode};
