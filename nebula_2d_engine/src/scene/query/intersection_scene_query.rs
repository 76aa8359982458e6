/// Intersection scene query: pairs of movables whose world bounds overlap

use crate::scene::graph::SceneGraph;
use crate::scene::scene_manager::{MovableKey, SceneManager};

use super::scene_query::SceneQuery;

/// Query returning every overlapping pair among the matching movables
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionSceneQuery {
    query: SceneQuery,
}

impl IntersectionSceneQuery {
    /// Query over every visible movable
    pub fn new() -> Self {
        Self {
            query: SceneQuery::new(),
        }
    }

    /// Override the common query parameters
    pub fn with_query(mut self, query: SceneQuery) -> Self {
        self.query = query;
        self
    }

    /// Execute against the graph's attached movables.
    ///
    /// Each unordered pair appears once.
    pub fn execute(
        &self,
        graph: &SceneGraph,
        manager: &SceneManager,
    ) -> Vec<(MovableKey, MovableKey)> {
        let candidates: Vec<MovableKey> = graph
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
                Some(movable)
            })
            .collect();

        let mut pairs = Vec::new();
        for (i, &a) in candidates.iter().enumerate() {
            let Some(aabb_a) = manager.movable(a).map(|item| item.world_aabb()) else {
                continue;
            };
            for &b in &candidates[i + 1..] {
                let Some(aabb_b) = manager.movable(b).map(|item| item.world_aabb()) else {
                    continue;
                };
                if aabb_a.intersects(&aabb_b) {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }
}
