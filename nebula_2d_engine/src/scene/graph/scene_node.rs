/// Scene node: local TRS, hierarchy links and lazily derived world state
///
/// Nodes live in the graph's arena and are only mutated through the graph,
/// which maintains the derived-state invalidation and the root's z-ordered
/// node list. Derived values are memoized in Cells so reads stay cheap in
/// the render loop.

use std::cell::Cell;

use glam::{Mat4, Vec2, Vec3};
use slotmap::new_key_type;

use crate::scene::scene_manager::{CameraKey, LightKey, MovableKey};

new_key_type! {
    /// Stable key for a SceneNode within a SceneGraph
    pub struct NodeKey;
}

/// What a node's local position rotates around when the parent turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOrigin {
    /// Orbit the parent: the local offset rotates with the parent
    Parent,
    /// Keep the local offset fixed; only own rotation applies
    Local,
}

/// An object attached to a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachedObject {
    Movable(MovableKey),
    Camera(CameraKey),
    Light(LightKey),
}

impl AttachedObject {
    /// Stable ordering key: variant rank, then arena key
    pub(crate) fn sort_key(&self) -> (u8, u64) {
        use slotmap::Key;
        match self {
            AttachedObject::Movable(key) => (0, key.data().as_ffi()),
            AttachedObject::Camera(key) => (1, key.data().as_ffi()),
            AttachedObject::Light(key) => (2, key.data().as_ffi()),
        }
    }
}

/// A transform-tree node
pub struct SceneNode {
    // Local TRS
    pub(crate) position: Vec3,
    pub(crate) direction: Vec2,
    pub(crate) rotation: f32,
    pub(crate) scaling: Vec2,

    pub(crate) initial_direction: Vec2,
    pub(crate) rotation_origin: RotationOrigin,
    pub(crate) inherit_rotation: bool,
    pub(crate) inherit_scaling: bool,
    pub(crate) visible: bool,

    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) attached_objects: Vec<AttachedObject>,

    // Memoized derived state
    pub(crate) derived_position: Cell<Vec3>,
    pub(crate) derived_direction: Cell<Vec2>,
    pub(crate) derived_rotation: Cell<f32>,
    pub(crate) derived_scaling: Cell<Vec2>,
    pub(crate) derived_z: Cell<f32>,
    pub(crate) full_transformation: Cell<Mat4>,

    pub(crate) need_update: Cell<bool>,
    pub(crate) need_z_update: Cell<bool>,
    pub(crate) transformation_out_of_date: Cell<bool>,
}

impl SceneNode {
    /// Node with the given local position, initial direction and visibility
    pub(crate) fn new(position: Vec3, initial_direction: Vec2, visible: bool) -> Self {
        Self {
            position,
            direction: initial_direction,
            rotation: 0.0,
            scaling: Vec2::ONE,
            initial_direction,
            rotation_origin: RotationOrigin::Parent,
            inherit_rotation: true,
            inherit_scaling: true,
            visible,
            parent: None,
            children: Vec::new(),
            attached_objects: Vec::new(),
            derived_position: Cell::new(position),
            derived_direction: Cell::new(initial_direction),
            derived_rotation: Cell::new(0.0),
            derived_scaling: Cell::new(Vec2::ONE),
            derived_z: Cell::new(position.z),
            full_transformation: Cell::new(Mat4::IDENTITY),
            need_update: Cell::new(true),
            need_z_update: Cell::new(true),
            transformation_out_of_date: Cell::new(true),
        }
    }

    // ===== LOCAL STATE OBSERVERS =====

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Local direction (unit)
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Local rotation in radians, consistent with the direction
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Local scaling
    pub fn scaling(&self) -> Vec2 {
        self.scaling
    }

    /// Rotation basis direction
    pub fn initial_direction(&self) -> Vec2 {
        self.initial_direction
    }

    /// Rotation origin
    pub fn rotation_origin(&self) -> RotationOrigin {
        self.rotation_origin
    }

    /// True if this node inherits its parent's rotation
    pub fn inherit_rotation(&self) -> bool {
        self.inherit_rotation
    }

    /// True if this node inherits its parent's scaling
    pub fn inherit_scaling(&self) -> bool {
        self.inherit_scaling
    }

    /// Own visibility flag
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Parent node; None for a root
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Child nodes
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Attached objects, ordered by their stable variant key
    pub fn attached_objects(&self) -> &[AttachedObject] {
        &self.attached_objects
    }
}

/// Rotate a 2D vector by an angle
pub(crate) fn rotate_vec2(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Signed angle taking `from` onto `to`
pub(crate) fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    (from.x * to.y - from.y * to.x).atan2(from.dot(to))
}
