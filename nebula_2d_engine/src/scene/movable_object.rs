/// Common state of attachable scene objects
///
/// A movable object can be attached to a scene node; drawable movables own
/// one or more render primitives kept in sync with the node's transform
/// during prepare.

use glam::{Mat4, Vec2, Vec3};

use crate::utils::{Aabb, Obb, Sphere};

use super::query::QueryTypeFlags;

/// Snapshot of a node's derived state handed to attached objects during
/// rendering
#[derive(Debug, Clone, Copy)]
pub struct NodeContext {
    pub full_transformation: Mat4,
    pub derived_position: Vec3,
    pub derived_rotation: f32,
    pub derived_scaling: Vec2,
    /// The owning node's visibility combined with the object's own
    pub world_visible: bool,
}

impl NodeContext {
    /// Context of an identity node, used for objects rendered outside a
    /// graph
    pub fn identity() -> Self {
        Self {
            full_transformation: Mat4::IDENTITY,
            derived_position: Vec3::ZERO,
            derived_rotation: 0.0,
            derived_scaling: Vec2::ONE,
            world_visible: true,
        }
    }
}

/// State shared by every movable object
#[derive(Debug, Clone)]
pub struct MovableData {
    visible: bool,
    query_flags: QueryTypeFlags,
    world_aabb: Aabb,
    world_obb: Obb,
    world_sphere: Sphere,
}

impl MovableData {
    /// Visible movable with the given query category
    pub fn new(query_flags: QueryTypeFlags) -> Self {
        Self {
            visible: true,
            query_flags,
            world_aabb: Aabb::EMPTY,
            world_obb: Obb::default(),
            world_sphere: Sphere::default(),
        }
    }

    /// Own visibility flag
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Set own visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Query categories this object belongs to
    pub fn query_flags(&self) -> QueryTypeFlags {
        self.query_flags
    }

    /// Override the query categories
    pub fn set_query_flags(&mut self, flags: QueryTypeFlags) {
        self.query_flags = flags;
    }

    /// World bounding box, updated during prepare
    pub fn world_aabb(&self) -> &Aabb {
        &self.world_aabb
    }

    /// World oriented bounding box, updated during prepare
    pub fn world_obb(&self) -> &Obb {
        &self.world_obb
    }

    /// World bounding sphere, updated during prepare
    pub fn world_sphere(&self) -> &Sphere {
        &self.world_sphere
    }

    /// Refresh the bounding volumes from a world-space box
    pub(crate) fn update_bounds(&mut self, world_aabb: Aabb) {
        self.world_obb = Obb::from_aabb(&world_aabb, &Mat4::IDENTITY);
        self.world_sphere = Sphere::from_aabb(&world_aabb);
        self.world_aabb = world_aabb;
    }
}
