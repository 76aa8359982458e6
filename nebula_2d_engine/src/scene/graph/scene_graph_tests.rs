/// Tests for SceneGraph: derivation, z-ordering, hierarchy and attachment.

use super::*;
use crate::scene::graph::scene_node::{AttachedObject, RotationOrigin};
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::model::Model;
use crate::scene::scene_manager::SceneManager;

use glam::{Vec2, Vec3};

fn graph() -> SceneGraph {
    SceneGraph::new()
}

#[test]
fn test_root_is_ordered() {
    let graph = graph();
    assert_eq!(graph.ordered_nodes(), &[graph.root()]);
    assert!(graph.contains_node(graph.root()));
}

#[test]
fn test_derived_position_composes_parent_chain() {
    let mut graph = graph();
    let root = graph.root();

    let parent = graph.create_child_node(root, Vec3::new(10.0, 0.0, 0.0)).unwrap();
    let child = graph.create_child_node(parent, Vec3::new(1.0, 2.0, 0.0)).unwrap();

    assert_eq!(graph.derived_position(child), Vec3::new(11.0, 2.0, 0.0));

    graph.set_position(parent, Vec3::new(20.0, 0.0, 0.0));
    assert_eq!(graph.derived_position(child), Vec3::new(21.0, 2.0, 0.0));
}

#[test]
fn test_derived_rotation_rotates_child_offset() {
    let mut graph = graph();
    let root = graph.root();

    let parent = graph.create_child_node(root, Vec3::ZERO).unwrap();
    let child = graph.create_child_node(parent, Vec3::new(1.0, 0.0, 0.0)).unwrap();

    graph.set_rotation(parent, std::f32::consts::FRAC_PI_2);

    // The child orbits the parent by default (rotation origin = Parent)
    let derived = graph.derived_position(child);
    assert!(derived.x.abs() < 1e-6);
    assert!((derived.y - 1.0).abs() < 1e-6);
    assert!((graph.derived_rotation(child) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

    // With a local rotation origin the offset stays put
    graph.set_rotation_origin(child, RotationOrigin::Local);
    let derived = graph.derived_position(child);
    assert!((derived.x - 1.0).abs() < 1e-6);
    assert!(derived.y.abs() < 1e-6);
}

#[test]
fn test_inherit_flags() {
    let mut graph = graph();
    let root = graph.root();

    let parent = graph.create_child_node(root, Vec3::ZERO).unwrap();
    let child = graph.create_child_node(parent, Vec3::ZERO).unwrap();

    graph.set_rotation(parent, 1.0);
    graph.set_scaling(parent, Vec2::new(2.0, 2.0));

    assert!((graph.derived_rotation(child) - 1.0).abs() < 1e-6);
    assert_eq!(graph.derived_scaling(child), Vec2::new(2.0, 2.0));

    graph.set_inherit_rotation(child, false);
    graph.set_inherit_scaling(child, false);
    assert_eq!(graph.derived_rotation(child), 0.0);
    assert_eq!(graph.derived_scaling(child), Vec2::ONE);
}

#[test]
fn test_direction_rotation_consistency() {
    let mut graph = graph();
    let root = graph.root();
    let node = graph.create_child_node(root, Vec3::ZERO).unwrap();

    // Setting the rotation updates the direction
    graph.set_rotation(node, std::f32::consts::FRAC_PI_2);
    let direction = graph.node(node).unwrap().direction();
    assert!((direction - Vec2::new(-1.0, 0.0)).length() < 1e-6);

    // Setting the direction updates the rotation
    graph.set_direction(node, Vec2::new(1.0, 0.0));
    assert!((graph.node(node).unwrap().rotation() + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
}

#[test]
fn test_z_sort_matches_stable_sort() {
    let mut graph = graph();
    let root = graph.root();

    let zs = [0.5, 0.1, 0.9, 0.5, 0.3, 0.5, 0.0, 0.9];
    let keys: Vec<_> = zs
        .iter()
        .map(|&z| graph.create_child_node(root, Vec3::new(0.0, 0.0, z)).unwrap())
        .collect();

    // Expected: stable sort of the creation sequence by z
    let mut expected: Vec<_> = keys.iter().copied().zip(zs).collect();
    expected.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
    let expected_keys: Vec<_> = expected.into_iter().map(|(key, _)| key).collect();

    // The root sits at z 0, before all z > 0 nodes but after none
    let ordered: Vec<_> = graph
        .ordered_nodes()
        .iter()
        .copied()
        .filter(|&key| key != root)
        .collect();
    assert_eq!(ordered, expected_keys);
}

#[test]
fn test_z_change_reorders_subtree_in_one_merge() {
    let mut graph = graph();
    let root = graph.root();

    let n1 = graph.create_child_node(root, Vec3::new(0.0, 0.0, 0.1)).unwrap();
    let n2 = graph.create_child_node(root, Vec3::new(0.0, 0.0, 0.2)).unwrap();
    let n3 = graph.create_child_node(root, Vec3::new(0.0, 0.0, 0.3)).unwrap();
    // A child under n1 follows its parent's move
    let n1_child = graph.create_child_node(n1, Vec3::new(0.0, 0.0, 0.01)).unwrap();

    assert_eq!(graph.ordered_nodes(), &[root, n1, n1_child, n2, n3]);

    graph.set_position(n1, Vec3::new(0.0, 0.0, 0.4));
    assert_eq!(graph.ordered_nodes(), &[root, n2, n3, n1, n1_child]);

    // Derived z moved with the parent
    assert!((graph.derived_z(n1_child) - 0.41).abs() < 1e-6);
}

#[test]
fn test_adopt_rejects_cycles() {
    let mut graph = graph();
    let root = graph.root();

    let a = graph.create_child_node(root, Vec3::ZERO).unwrap();
    let b = graph.create_child_node(a, Vec3::ZERO).unwrap();

    // b is a descendant of a: adopting a under b would create a cycle
    assert!(!graph.adopt(b, a));
    // Adopting the root anywhere is refused
    assert!(!graph.adopt(a, root));
    // Sideways reparenting works
    let c = graph.create_child_node(root, Vec3::ZERO).unwrap();
    assert!(graph.adopt(c, b));
    assert_eq!(graph.node(b).unwrap().parent(), Some(c));
}

#[test]
fn test_orphan_and_readopt() {
    let mut graph = graph();
    let root = graph.root();

    let a = graph.create_child_node(root, Vec3::new(0.0, 0.0, 0.5)).unwrap();
    let a_child = graph.create_child_node(a, Vec3::ZERO).unwrap();
    assert_eq!(graph.ordered_nodes().len(), 3);

    // Orphaned subtree leaves the ordered list but stays alive
    assert!(graph.orphan(a));
    assert!(!graph.orphan(a));
    assert_eq!(graph.ordered_nodes(), &[root]);
    assert!(graph.contains_node(a));
    assert!(graph.contains_node(a_child));

    // Re-adoption brings the subtree back
    assert!(graph.adopt(root, a));
    assert_eq!(graph.ordered_nodes().len(), 3);
}

#[test]
fn test_remove_node_drops_subtree() {
    let mut graph = graph();
    let root = graph.root();

    let a = graph.create_child_node(root, Vec3::ZERO).unwrap();
    let b = graph.create_child_node(a, Vec3::ZERO).unwrap();

    assert!(!graph.remove_node(root));
    assert!(graph.remove_node(a));
    assert!(!graph.contains_node(a));
    assert!(!graph.contains_node(b));
    assert_eq!(graph.ordered_nodes(), &[root]);
}

#[test]
fn test_attach_detach_idempotence() {
    let mut graph = graph();
    let mut manager = SceneManager::new();
    let root = graph.root();

    let node = graph.create_child_node(root, Vec3::ZERO).unwrap();
    let model = manager.create_model(Model::new());
    let object = AttachedObject::Movable(model);

    assert!(graph.attach_object(node, object));
    let after_first: Vec<_> = graph.node(node).unwrap().attached_objects().to_vec();

    // Attaching twice is a no-op
    assert!(!graph.attach_object(node, object));
    assert_eq!(graph.node(node).unwrap().attached_objects(), &after_first[..]);

    // The object cannot be attached to a second node while attached
    let other = graph.create_child_node(root, Vec3::ZERO).unwrap();
    assert!(!graph.attach_object(other, object));

    // Detach, then attach again: same observable state as a single attach
    assert!(graph.detach_object(node, object));
    assert!(!graph.detach_object(node, object));
    assert!(graph.attach_object(node, object));
    assert_eq!(graph.node(node).unwrap().attached_objects(), &after_first[..]);
    assert_eq!(graph.object_node(object), Some(node));
}

#[test]
fn test_camera_and_light_indexes_follow_attachment() {
    let mut graph = graph();
    let mut manager = SceneManager::new();
    let root = graph.root();

    let camera = manager.create_camera(Camera::new("main"));
    let light = manager.create_light(Light::point());

    let node = graph.create_child_node(root, Vec3::ZERO).unwrap();
    graph.attach_object(node, AttachedObject::Camera(camera));
    graph.attach_object(node, AttachedObject::Light(light));

    assert_eq!(graph.cameras(), &[camera]);
    assert_eq!(graph.lights(), &[light]);

    graph.detach_object(node, AttachedObject::Camera(camera));
    assert!(graph.cameras().is_empty());
    assert_eq!(graph.lights(), &[light]);

    graph.detach_all_objects(node);
    assert!(graph.lights().is_empty());
}

#[test]
fn test_visibility_cascade() {
    let mut graph = graph();
    let root = graph.root();

    let a = graph.create_child_node(root, Vec3::ZERO).unwrap();
    let b = graph.create_child_node(a, Vec3::ZERO).unwrap();

    graph.set_visible(a, false, true);
    assert!(!graph.node(a).unwrap().visible());
    assert!(!graph.node(b).unwrap().visible());

    // Non-cascading leaves children alone
    graph.set_visible(a, true, false);
    assert!(graph.node(a).unwrap().visible());
    assert!(!graph.node(b).unwrap().visible());
}

#[test]
fn test_full_transformation_memoizes() {
    let mut graph = graph();
    let root = graph.root();
    let node = graph.create_child_node(root, Vec3::new(2.0, 3.0, 0.0)).unwrap();
    graph.set_rotation(node, std::f32::consts::FRAC_PI_2);
    graph.set_scaling(node, Vec2::new(2.0, 2.0));

    let matrix = graph.full_transformation(node);
    // (1, 0, 0) scaled to (2, 0), rotated to (0, 2), translated
    let p = matrix.transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!((p - Vec3::new(2.0, 5.0, 0.0)).length() < 1e-5);

    // Memoized: same matrix on a second read
    assert_eq!(graph.full_transformation(node), matrix);
}

#[test]
fn test_translate_rotate_scale_helpers() {
    let mut graph = graph();
    let root = graph.root();
    let node = graph.create_child_node(root, Vec3::new(1.0, 1.0, 0.0)).unwrap();

    graph.translate(node, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(graph.node(node).unwrap().position(), Vec3::new(2.0, 1.0, 0.0));

    graph.rotate(node, 0.5);
    graph.rotate(node, 0.25);
    assert!((graph.node(node).unwrap().rotation() - 0.75).abs() < 1e-6);

    graph.scale(node, Vec2::new(2.0, 3.0));
    assert_eq!(graph.node(node).unwrap().scaling(), Vec2::new(2.0, 3.0));
}

#[test]
fn test_look_at_points_direction_at_target() {
    let mut graph = graph();
    let root = graph.root();
    let node = graph.create_child_node(root, Vec3::ZERO).unwrap();

    graph.look_at(node, Vec3::new(1.0, 0.0, 0.0));
    let direction = graph.derived_direction(node);
    assert!((direction - Vec2::new(1.0, 0.0)).length() < 1e-5);
}
