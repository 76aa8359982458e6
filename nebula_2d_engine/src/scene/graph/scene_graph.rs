/// Scene graph: the transform hierarchy and its render traversal
///
/// Owns every node in a slotmap arena. Root-level state: the z-ordered flat
/// node list used for painter's-order rendering (stable: ascending derived
/// z, insertion order on ties), the camera/light indexes, and scene-wide
/// gamma/ambient/fog. Derived transforms are computed lazily on read and
/// invalidated recursively on change.

use std::time::Duration;

use glam::{Mat4, Vec2, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;

use crate::render::renderer::Renderer;
use crate::render::shader::{uniform_name, ShaderProgram};
use crate::render::{Fog, Viewport};
use crate::scene::movable_object::NodeContext;
use crate::scene::scene_manager::{CameraKey, LightKey, MovableKey, SceneManager};
use crate::utils::Color;

use super::scene_node::{
    rotate_vec2, signed_angle, AttachedObject, NodeKey, RotationOrigin, SceneNode,
};

/// Most lights a single draw can consume; must match the shader array size
pub const MAX_LIGHT_COUNT: usize = 8;

/// Observer of node render traversal.
///
/// Callbacks are synchronous and must not mutate the graph.
pub trait SceneNodeListener {
    /// A visible node's attached objects are about to render
    fn node_render_started(&mut self, _node: NodeKey) {}

    /// A visible node's attached objects finished rendering
    fn node_render_ended(&mut self, _node: NodeKey) {}
}

/// The scene graph
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,

    /// Root-reachable nodes sorted by derived z (stable)
    ordered_nodes: Vec<NodeKey>,
    /// Which node each attached object lives on
    object_index: FxHashMap<AttachedObject, NodeKey>,
    cameras: Vec<CameraKey>,
    lights: Vec<LightKey>,

    gamma: f32,
    ambient_color: Color,
    fog: Option<Fog>,
    fog_enabled: bool,
    lighting_enabled: bool,

    listeners: Vec<Box<dyn SceneNodeListener>>,
}

impl SceneGraph {
    /// Graph with a visible root node at the origin
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(Vec3::ZERO, Vec2::Y, true));

        Self {
            nodes,
            root,
            ordered_nodes: vec![root],
            object_index: FxHashMap::default(),
            cameras: Vec::new(),
            lights: Vec::new(),
            gamma: 1.0,
            ambient_color: Color::WHITE,
            fog: None,
            fog_enabled: true,
            lighting_enabled: true,
            listeners: Vec::new(),
        }
    }

    // ===== SCENE STATE =====

    /// Set the scene gamma
    pub fn set_gamma(&mut self, gamma: f32) {
        self.gamma = gamma;
    }

    /// Scene gamma
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Set the scene ambient color
    pub fn set_ambient_color(&mut self, ambient: Color) {
        self.ambient_color = ambient;
    }

    /// Scene ambient color
    pub fn ambient_color(&self) -> Color {
        self.ambient_color
    }

    /// Set the fog effect; None turns fog off
    pub fn set_fog(&mut self, fog: Option<Fog>) {
        self.fog = fog;
    }

    /// The fog effect, if any
    pub fn fog(&self) -> Option<&Fog> {
        self.fog.as_ref()
    }

    /// Enable/disable the fog effect
    pub fn set_fog_enabled(&mut self, enabled: bool) {
        self.fog_enabled = enabled;
    }

    /// Enable/disable lighting
    pub fn set_lighting_enabled(&mut self, enabled: bool) {
        self.lighting_enabled = enabled;
    }

    /// Register a traversal listener
    pub fn add_listener(&mut self, listener: Box<dyn SceneNodeListener>) {
        self.listeners.push(listener);
    }

    // ===== NODES =====

    /// The root node key
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// True if the key refers to a live node
    pub fn contains_node(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// A node by key
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Total number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root-reachable nodes in render (z) order
    pub fn ordered_nodes(&self) -> &[NodeKey] {
        &self.ordered_nodes
    }

    /// Cameras attached anywhere under the root
    pub fn cameras(&self) -> &[CameraKey] {
        &self.cameras
    }

    /// Lights attached anywhere under the root
    pub fn lights(&self) -> &[LightKey] {
        &self.lights
    }

    /// Create a child of the given parent. Returns None on a stale parent.
    pub fn create_child_node(&mut self, parent: NodeKey, position: Vec3) -> Option<NodeKey> {
        self.create_child_node_with(parent, position, Vec2::Y, true)
    }

    /// Create a child with an explicit initial direction and visibility
    pub fn create_child_node_with(
        &mut self,
        parent: NodeKey,
        position: Vec3,
        initial_direction: Vec2,
        visible: bool,
    ) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }

        let key = self
            .nodes
            .insert(SceneNode::new(position, initial_direction, visible));
        self.nodes[key].parent = Some(parent);
        self.nodes[parent].children.push(key);

        if self.is_reachable(key) {
            self.insert_ordered(key);
        }
        Some(key)
    }

    /// Adopt (reparent) a node under a new parent.
    ///
    /// Rejected (returns false) when either key is stale, when the node is
    /// the root, or when adoption would create a cycle.
    pub fn adopt(&mut self, parent: NodeKey, node: NodeKey) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(node) || node == self.root {
            return false;
        }

        // Reject cycles: the new parent must not live under the node
        let mut walk = Some(parent);
        while let Some(current) = walk {
            if current == node {
                return false;
            }
            walk = self.nodes[current].parent;
        }

        if self.nodes[node].parent == Some(parent) {
            return true;
        }

        let was_reachable = self.is_reachable(node);
        let ordered_subtree = if was_reachable {
            // Relative z order survives the move (the shift is uniform)
            self.gather_ordered_subtree(node)
        } else {
            Vec::new()
        };
        let subtree = self.gather_subtree(node);
        if was_reachable {
            self.remove_from_ordered(&subtree);
        }

        if let Some(old_parent) = self.nodes[node].parent {
            self.nodes[old_parent].children.retain(|&child| child != node);
        }
        self.nodes[node].parent = Some(parent);
        self.nodes[parent].children.push(node);

        self.notify_update(node);
        self.notify_update_z(node);

        if self.is_reachable(node) {
            let mut incoming = if was_reachable { ordered_subtree } else { subtree };
            if !was_reachable {
                // A previously detached subtree has no ordered history;
                // establish its z order now (stable on DFS order)
                incoming.sort_by(|&a, &b| {
                    self.derived_z(a)
                        .partial_cmp(&self.derived_z(b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            self.merge_into_ordered(incoming);
        }
        true
    }

    /// Orphan (release) a node: it leaves the ordered list and becomes a
    /// detached root. Returns false for the root, a detached node or a
    /// stale key.
    pub fn orphan(&mut self, node: NodeKey) -> bool {
        if !self.nodes.contains_key(node) || node == self.root {
            return false;
        }
        let Some(parent) = self.nodes[node].parent else {
            return false;
        };

        let was_reachable = self.is_reachable(node);
        let subtree = self.gather_subtree(node);
        if was_reachable {
            self.remove_from_ordered(&subtree);
        }

        self.nodes[parent].children.retain(|&child| child != node);
        self.nodes[node].parent = None;
        self.notify_update(node);
        self.notify_update_z(node);
        true
    }

    /// Remove a node and its whole subtree. Attached objects are detached
    /// (they stay alive in the scene manager). Returns false for the root
    /// or a stale key.
    pub fn remove_node(&mut self, node: NodeKey) -> bool {
        if !self.nodes.contains_key(node) || node == self.root {
            return false;
        }

        let subtree = self.gather_subtree(node);
        self.remove_from_ordered(&subtree);

        if let Some(parent) = self.nodes[node].parent {
            self.nodes[parent].children.retain(|&child| child != node);
        }

        for &key in &subtree {
            for object in std::mem::take(&mut self.nodes[key].attached_objects) {
                self.unindex_object(object);
            }
            self.nodes.remove(key);
        }
        true
    }

    // ===== TRS MUTATORS =====

    /// Set a node's local position. A z change re-sorts the node's subtree
    /// within the ordered list in one stable merge.
    pub fn set_position(&mut self, key: NodeKey, position: Vec3) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        if node.position == position {
            return;
        }

        let z_changed = node.position.z != position.z;
        let reorder = z_changed && self.is_reachable(key);

        let subtree = if reorder {
            let subtree = self.gather_ordered_subtree(key);
            self.remove_from_ordered(&subtree);
            subtree
        } else {
            Vec::new()
        };

        self.nodes[key].position = position;
        self.notify_update(key);

        if z_changed {
            self.notify_update_z(key);
        }
        if reorder {
            self.merge_into_ordered(subtree);
        }
    }

    /// Translate a node by the given units
    pub fn translate(&mut self, key: NodeKey, units: Vec3) {
        if let Some(node) = self.nodes.get(key) {
            let position = node.position + units;
            self.set_position(key, position);
        }
    }

    /// Set a node's local direction; the rotation follows
    pub fn set_direction(&mut self, key: NodeKey, direction: Vec2) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if node.direction == direction {
            return;
        }

        node.direction = direction;
        node.rotation = signed_angle(node.initial_direction, direction);
        self.notify_update(key);
    }

    /// Set a node's local rotation in radians; the direction follows
    pub fn set_rotation(&mut self, key: NodeKey, angle: f32) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if node.rotation == angle {
            return;
        }

        node.rotation = angle;
        node.direction = rotate_vec2(node.initial_direction, angle);
        self.notify_update(key);
    }

    /// Rotate a node by the given angle in radians
    pub fn rotate(&mut self, key: NodeKey, angle: f32) {
        if let Some(node) = self.nodes.get(key) {
            let rotation = node.rotation + angle;
            self.set_rotation(key, rotation);
        }
    }

    /// Set a node's local scaling
    pub fn set_scaling(&mut self, key: NodeKey, scaling: Vec2) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if node.scaling == scaling {
            return;
        }

        node.scaling = scaling;
        self.notify_update(key);
    }

    /// Scale a node by the given factors
    pub fn scale(&mut self, key: NodeKey, units: Vec2) {
        if let Some(node) = self.nodes.get(key) {
            let scaling = node.scaling * units;
            self.set_scaling(key, scaling);
        }
    }

    /// Turn a node to face the given world position
    pub fn look_at(&mut self, key: NodeKey, position: Vec3) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        let (parent, inherit_rotation, initial_direction) =
            (node.parent, node.inherit_rotation, node.initial_direction);

        let derived = self.derived_position(key);
        let to = Vec2::new(position.x - derived.x, position.y - derived.y);
        if to != Vec2::ZERO {
            let parent_rotation = match parent {
                Some(parent) if inherit_rotation => self.derived_rotation(parent),
                _ => 0.0,
            };
            let world_angle = signed_angle(initial_direction, to.normalize());
            self.set_rotation(key, world_angle - parent_rotation);
        }
    }

    /// Set the rotation origin
    pub fn set_rotation_origin(&mut self, key: NodeKey, origin: RotationOrigin) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if node.rotation_origin != origin {
            node.rotation_origin = origin;
            self.notify_update(key);
        }
    }

    /// Set rotation inheritance
    pub fn set_inherit_rotation(&mut self, key: NodeKey, inherit: bool) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if node.inherit_rotation != inherit {
            node.inherit_rotation = inherit;
            self.notify_update(key);
        }
    }

    /// Set scaling inheritance
    pub fn set_inherit_scaling(&mut self, key: NodeKey, inherit: bool) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        if node.inherit_scaling != inherit {
            node.inherit_scaling = inherit;
            self.notify_update(key);
        }
    }

    /// Set a node's visibility; cascades to all descendants by default
    pub fn set_visible(&mut self, key: NodeKey, visible: bool, cascade: bool) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        node.visible = visible;

        if cascade {
            let children = node.children.clone();
            for child in children {
                self.set_visible(child, visible, cascade);
            }
        }
    }

    // ===== DERIVED STATE =====

    /// Derived (world) position
    pub fn derived_position(&self, key: NodeKey) -> Vec3 {
        self.update_derived(key);
        self.nodes[key].derived_position.get()
    }

    /// Derived (world) direction
    pub fn derived_direction(&self, key: NodeKey) -> Vec2 {
        self.update_derived(key);
        self.nodes[key].derived_direction.get()
    }

    /// Derived (world) rotation in radians
    pub fn derived_rotation(&self, key: NodeKey) -> f32 {
        self.update_derived(key);
        self.nodes[key].derived_rotation.get()
    }

    /// Derived (world) scaling
    pub fn derived_scaling(&self, key: NodeKey) -> Vec2 {
        self.update_derived(key);
        self.nodes[key].derived_scaling.get()
    }

    /// Derived z only; cheaper than a full derivation when sorting
    pub fn derived_z(&self, key: NodeKey) -> f32 {
        self.update_z(key);
        self.nodes[key].derived_z.get()
    }

    /// Full TRS world matrix, memoized until the inputs change
    pub fn full_transformation(&self, key: NodeKey) -> Mat4 {
        self.update_derived(key);
        let node = &self.nodes[key];

        if node.transformation_out_of_date.get() {
            let scaling = node.derived_scaling.get();
            let transformation = Mat4::from_translation(node.derived_position.get())
                * Mat4::from_rotation_z(node.derived_rotation.get())
                * Mat4::from_scale(Vec3::new(scaling.x, scaling.y, 1.0));
            node.full_transformation.set(transformation);
            node.transformation_out_of_date.set(false);
        }

        node.full_transformation.get()
    }

    fn update_derived(&self, key: NodeKey) {
        let node = &self.nodes[key];
        if !node.need_update.get() {
            return;
        }

        let (parent_position, parent_rotation, parent_scaling) = match node.parent {
            Some(parent) => {
                self.update_derived(parent);
                let parent_node = &self.nodes[parent];
                (
                    parent_node.derived_position.get(),
                    parent_node.derived_rotation.get(),
                    parent_node.derived_scaling.get(),
                )
            }
            None => (Vec3::ZERO, 0.0, Vec2::ONE),
        };

        let derived_scaling = if node.inherit_scaling {
            parent_scaling * node.scaling
        } else {
            node.scaling
        };
        let derived_rotation = if node.inherit_rotation {
            parent_rotation + node.rotation
        } else {
            node.rotation
        };
        let derived_direction = rotate_vec2(node.initial_direction, derived_rotation);

        let local_xy = Vec2::new(node.position.x, node.position.y) * parent_scaling;
        let offset = match node.rotation_origin {
            RotationOrigin::Parent => rotate_vec2(local_xy, parent_rotation),
            RotationOrigin::Local => local_xy,
        };
        let derived_position =
            parent_position + Vec3::new(offset.x, offset.y, node.position.z);

        node.derived_position.set(derived_position);
        node.derived_direction.set(derived_direction);
        node.derived_rotation.set(derived_rotation);
        node.derived_scaling.set(derived_scaling);
        node.derived_z.set(derived_position.z);
        node.need_update.set(false);
        node.need_z_update.set(false);
        node.transformation_out_of_date.set(true);
    }

    fn update_z(&self, key: NodeKey) {
        let node = &self.nodes[key];
        if !node.need_z_update.get() {
            return;
        }

        let parent_z = match node.parent {
            Some(parent) => {
                self.update_z(parent);
                self.nodes[parent].derived_z.get()
            }
            None => 0.0,
        };

        node.derived_z.set(parent_z + node.position.z);
        node.need_z_update.set(false);
    }

    fn notify_update(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current];
            node.need_update.set(true);
            node.transformation_out_of_date.set(true);
            stack.extend(node.children.iter().copied());
        }
    }

    fn notify_update_z(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current];
            node.need_z_update.set(true);
            stack.extend(node.children.iter().copied());
        }
    }

    // ===== ORDERED LIST MAINTENANCE =====

    fn is_reachable(&self, key: NodeKey) -> bool {
        let mut walk = Some(key);
        while let Some(current) = walk {
            if current == self.root {
                return true;
            }
            walk = self.nodes.get(current).and_then(|node| node.parent);
        }
        false
    }

    /// Subtree keys in depth-first order
    fn gather_subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut subtree = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            subtree.push(current);
            stack.extend(self.nodes[current].children.iter().copied());
        }
        subtree
    }

    /// Subtree keys in their current ordered-list relative order
    fn gather_ordered_subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let members: FxHashSet<NodeKey> = self.gather_subtree(key).into_iter().collect();
        self.ordered_nodes
            .iter()
            .copied()
            .filter(|node| members.contains(node))
            .collect()
    }

    fn remove_from_ordered(&mut self, keys: &[NodeKey]) {
        let members: FxHashSet<NodeKey> = keys.iter().copied().collect();
        self.ordered_nodes.retain(|node| !members.contains(node));
    }

    /// Insert one node behind every node with the same or smaller z
    fn insert_ordered(&mut self, key: NodeKey) {
        let z = self.derived_z(key);
        let position = self
            .ordered_nodes
            .partition_point(|&node| self.derived_z(node) <= z);
        self.ordered_nodes.insert(position, key);
    }

    /// Merge a relatively ordered subtree back into the ordered list in one
    /// stable pass (existing nodes win ties)
    fn merge_into_ordered(&mut self, subtree: Vec<NodeKey>) {
        if subtree.is_empty() {
            return;
        }

        let existing = std::mem::take(&mut self.ordered_nodes);
        let mut merged = Vec::with_capacity(existing.len() + subtree.len());

        let mut a = existing.into_iter().peekable();
        let mut b = subtree.into_iter().peekable();

        loop {
            match (a.peek().copied(), b.peek().copied()) {
                (Some(x), Some(y)) => {
                    // Stable: on equal z the existing node stays first
                    if self.derived_z(x) <= self.derived_z(y) {
                        merged.push(x);
                        a.next();
                    } else {
                        merged.push(y);
                        b.next();
                    }
                }
                (Some(_), None) => {
                    merged.extend(a.by_ref());
                    break;
                }
                (None, Some(_)) => {
                    merged.extend(b.by_ref());
                    break;
                }
                (None, None) => break,
            }
        }

        self.ordered_nodes = merged;
    }

    // ===== ATTACHABLE OBJECTS =====

    /// Attach an object to a node.
    ///
    /// Returns false if the node is stale or the object is already
    /// attached (anywhere, this node included — attaching twice is a
    /// no-op).
    pub fn attach_object(&mut self, key: NodeKey, object: AttachedObject) -> bool {
        if !self.nodes.contains_key(key) || self.object_index.contains_key(&object) {
            return false;
        }

        let objects = &mut self.nodes[key].attached_objects;
        let position = objects.partition_point(|other| other.sort_key() <= object.sort_key());
        objects.insert(position, object);

        self.object_index.insert(object, key);
        match object {
            AttachedObject::Camera(camera) => self.cameras.push(camera),
            AttachedObject::Light(light) => self.lights.push(light),
            AttachedObject::Movable(_) => {}
        }
        true
    }

    /// Detach an object from a node. Returns false if it was not attached
    /// to this node.
    pub fn detach_object(&mut self, key: NodeKey, object: AttachedObject) -> bool {
        if self.object_index.get(&object) != Some(&key) {
            return false;
        }

        self.nodes[key].attached_objects.retain(|other| *other != object);
        self.unindex_object(object);
        true
    }

    /// Detach every object from a node
    pub fn detach_all_objects(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };
        for object in std::mem::take(&mut node.attached_objects) {
            self.unindex_object(object);
        }
    }

    /// The node an object is attached to, if any
    pub fn object_node(&self, object: AttachedObject) -> Option<NodeKey> {
        self.object_index.get(&object).copied()
    }

    /// Iterate every attached movable as (movable, node)
    pub fn attached_movables(&self) -> impl Iterator<Item = (MovableKey, NodeKey)> + '_ {
        self.object_index.iter().filter_map(|(object, &node)| match object {
            AttachedObject::Movable(key) => Some((*key, node)),
            _ => None,
        })
    }

    fn unindex_object(&mut self, object: AttachedObject) {
        self.object_index.remove(&object);
        match object {
            AttachedObject::Camera(camera) => self.cameras.retain(|&c| c != camera),
            AttachedObject::Light(light) => self.lights.retain(|&l| l != light),
            AttachedObject::Movable(_) => {}
        }
    }

    // ===== RENDERING =====

    /// Render the whole graph for one frame.
    ///
    /// Walks the ordered nodes, elapses and prepares every attached movable,
    /// then runs the renderer's prepare/draw with camera and scene uniforms
    /// applied to each pass's shader program.
    pub fn render(
        &mut self,
        manager: &mut SceneManager,
        renderer: &mut Renderer,
        camera: Option<CameraKey>,
        viewport: &Viewport,
        time: Duration,
    ) {
        // Elapse and prepare attached objects in draw order
        for key in self.ordered_nodes.clone() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };

            // Invisible subtrees are skipped; their primitives are marked
            // world-invisible so the renderer regroups them out
            if !node.visible {
                for object in self.nodes[key].attached_objects.clone() {
                    if let AttachedObject::Movable(movable) = object {
                        manager.hide_movable(movable, renderer);
                    }
                }
                continue;
            }

            for listener in &mut self.listeners {
                listener.node_render_started(key);
            }

            let objects = self.nodes[key].attached_objects.clone();
            for object in objects {
                if let AttachedObject::Movable(movable) = object {
                    manager.elapse_movable(movable, time);

                    let ctx = NodeContext {
                        full_transformation: self.full_transformation(key),
                        derived_position: self.derived_position(key),
                        derived_rotation: self.derived_rotation(key),
                        derived_scaling: self.derived_scaling(key),
                        world_visible: self.nodes[key].visible,
                    };
                    manager.prepare_movable(movable, &ctx, renderer);
                }
            }

            for listener in &mut self.listeners {
                listener.node_render_ended(key);
            }
        }

        renderer.elapse(time);
        renderer.prepare();

        // Camera matrices
        let (projection, view, camera_position) = match camera {
            Some(camera_key) => {
                let position = self
                    .object_node(AttachedObject::Camera(camera_key))
                    .map(|node| (self.derived_position(node), self.derived_rotation(node)))
                    .unwrap_or((Vec3::ZERO, 0.0));

                let projection = manager
                    .camera(camera_key)
                    .map(|camera| camera.frustum().projection_matrix(viewport.aspect_ratio()))
                    .unwrap_or(Mat4::IDENTITY);

                let view = crate::scene::camera::Camera::view_matrix(position.0, position.1);
                (projection, view, position.0)
            }
            None => (Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO),
        };

        // Scene/camera uniforms for every pass program in use
        let device = renderer.device().clone();
        let mut programs: Vec<std::sync::Arc<ShaderProgram>> = Vec::new();
        renderer.for_each_pass_program(|program| {
            if !programs.iter().any(|known| std::sync::Arc::ptr_eq(known, program)) {
                programs.push(program.clone());
            }
        });

        {
            let mut device = device.lock().unwrap();
            for program in &programs {
                let handle = program.handle();
                device.set_uniform_mat4(handle, uniform_name::MATRIX_PROJECTION, projection);
                device.set_uniform_mat4(handle, uniform_name::MATRIX_MODEL_VIEW, view);
                device.set_uniform_mat4(
                    handle,
                    uniform_name::MATRIX_MODEL_VIEW_PROJECTION,
                    projection * view,
                );
                device.set_uniform_vec3(handle, uniform_name::CAMERA_POSITION, camera_position);
                device.set_uniform_f32(handle, uniform_name::SCENE_GAMMA, self.gamma);
                device.set_uniform_vec4(
                    handle,
                    uniform_name::SCENE_AMBIENT,
                    self.ambient_color.to_vec4(),
                );

                match self.fog.filter(|_| self.fog_enabled) {
                    Some(fog) => {
                        device.set_uniform_i32(handle, uniform_name::FOG_MODE, fog.mode() as i32);
                        device.set_uniform_f32(handle, uniform_name::FOG_DENSITY, fog.density());
                        device.set_uniform_f32(handle, uniform_name::FOG_NEAR, fog.near_distance());
                        device.set_uniform_f32(handle, uniform_name::FOG_FAR, fog.far_distance());
                        device.set_uniform_vec4(
                            handle,
                            uniform_name::FOG_COLOR,
                            fog.color().to_vec4(),
                        );
                    }
                    None => {
                        device.set_uniform_i32(handle, uniform_name::FOG_MODE, -1);
                    }
                }

                self.apply_light_uniforms(&mut *device, handle, manager);
            }
        }

        viewport.apply(&mut *device.lock().unwrap());
        renderer.draw();
    }

    fn apply_light_uniforms(
        &self,
        device: &mut dyn crate::graphics_device::GraphicsDevice,
        handle: crate::graphics_device::ShaderProgramHandle,
        manager: &SceneManager,
    ) {
        if !self.lighting_enabled {
            device.set_uniform_i32(handle, uniform_name::LIGHT_COUNT, 0);
            return;
        }

        let mut count = 0;
        for &light_key in self.lights.iter().take(MAX_LIGHT_COUNT) {
            let Some(light) = manager.light(light_key) else {
                continue;
            };
            let position = self
                .object_node(AttachedObject::Light(light_key))
                .map(|node| self.derived_position(node))
                .unwrap_or(Vec3::ZERO);

            let (constant, linear, quadratic) = light.attenuation();
            let (cutoff, outer_cutoff) = light.cutoff_angles();

            device.set_uniform_i32(handle, &uniform_name::light(count, "type"), light.light_type() as i32);
            device.set_uniform_vec3(handle, &uniform_name::light(count, "position"), position);
            device.set_uniform_vec2(handle, &uniform_name::light(count, "direction"), light.direction());
            device.set_uniform_vec4(handle, &uniform_name::light(count, "ambient"), light.ambient_color().to_vec4());
            device.set_uniform_vec4(handle, &uniform_name::light(count, "diffuse"), light.diffuse_color().to_vec4());
            device.set_uniform_vec4(handle, &uniform_name::light(count, "specular"), light.specular_color().to_vec4());
            device.set_uniform_vec3(
                handle,
                &uniform_name::light(count, "attenuation"),
                Vec3::new(constant, linear, quadratic),
            );
            device.set_uniform_vec2(
                handle,
                &uniform_name::light(count, "cutoff"),
                Vec2::new(cutoff, outer_cutoff),
            );
            count += 1;
        }

        device.set_uniform_i32(handle, uniform_name::LIGHT_COUNT, count as i32);
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
