/// Ray scene query: movables hit by a 2D ray, nearest first

use crate::scene::graph::{NodeKey, SceneGraph};
use crate::scene::scene_manager::{MovableKey, SceneManager};
use crate::utils::Ray;

use super::scene_query::SceneQuery;

/// One ray hit
#[derive(Debug, Clone, Copy)]
pub struct RayQueryResult {
    pub movable: MovableKey,
    pub node: NodeKey,
    /// Parametric distance along the ray
    pub distance: f32,
}

/// Query returning the movables whose world bounds a ray passes through
#[derive(Debug, Clone, Copy)]
pub struct RaySceneQuery {
    query: SceneQuery,
    ray: Ray,
}

impl RaySceneQuery {
    /// Query along the given ray
    pub fn new(ray: Ray) -> Self {
        Self {
            query: SceneQuery::new(),
            ray,
        }
    }

    /// Override the common query parameters
    pub fn with_query(mut self, query: SceneQuery) -> Self {
        self.query = query;
        self
    }

    /// The ray
    pub fn ray(&self) -> Ray {
        self.ray
    }

    /// Execute against the graph's attached movables, nearest hit first
    pub fn execute(&self, graph: &SceneGraph, manager: &SceneManager) -> Vec<RayQueryResult> {
        let mut results: Vec<RayQueryResult> = graph
            .attached_movables()
            .filter_map(|(movable, node)| {
                let item = manager.movable(movable)?;

                if !item.query_flags().intersects(self.query.type_mask()) {
                    return None;
                }
                if self.query.only_visible()
                    && !(item.visible() && graph.node(node).map(|n| n.visible()).unwrap_or(false))
                {
                    return None;
                }

                let distance = self.ray.intersects_aabb(&item.world_aabb())?;
                Some(RayQueryResult {
                    movable,
                    node,
                    distance,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }
}
