/// Scene queries over attached movables' world bounds

pub mod intersection_scene_query;
pub mod ray_scene_query;
pub mod scene_query;

pub use intersection_scene_query::IntersectionSceneQuery;
pub use ray_scene_query::{RayQueryResult, RaySceneQuery};
pub use scene_query::{QueryTypeFlags, SceneQuery};

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
