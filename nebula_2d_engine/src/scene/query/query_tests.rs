/// Tests for scene queries.

use super::*;
use crate::graphics_device::{MockGraphicsDevice, SharedGraphicsDevice};
use crate::render::renderer::Renderer;
use crate::scene::graph::{AttachedObject, SceneGraph};
use crate::scene::model::Model;
use crate::scene::movable_object::NodeContext;
use crate::scene::scene_manager::{MovableKey, SceneManager};
use crate::scene::shapes::Rectangle;
use crate::utils::{Color, Ray};

use glam::{Vec2, Vec3};
use std::sync::{Arc, Mutex};

fn renderer() -> Renderer {
    let device: SharedGraphicsDevice = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    Renderer::new(device)
}

/// A unit rectangle model attached under the root at the given position,
/// with its world bounds already prepared
fn attached_model(
    graph: &mut SceneGraph,
    manager: &mut SceneManager,
    renderer: &mut Renderer,
    position: Vec3,
) -> MovableKey {
    let mut model = Model::new();
    model.create_rectangle(Rectangle::with_position(position, Vec2::ONE, Color::WHITE));
    let key = manager.create_model(model);

    let node = graph.create_child_node(graph.root(), Vec3::ZERO).unwrap();
    graph.attach_object(node, AttachedObject::Movable(key));

    // Two prepares so world data (and with it the bounds) exists
    manager.prepare_movable(key, &NodeContext::identity(), renderer);
    renderer.prepare();
    manager.prepare_movable(key, &NodeContext::identity(), renderer);
    key
}

#[test]
fn test_ray_query_orders_by_distance() {
    let mut graph = SceneGraph::new();
    let mut manager = SceneManager::new();
    let mut renderer = renderer();

    let far = attached_model(&mut graph, &mut manager, &mut renderer, Vec3::new(10.0, 0.0, 0.0));
    let near = attached_model(&mut graph, &mut manager, &mut renderer, Vec3::new(3.0, 0.0, 0.0));
    let _off_axis = attached_model(&mut graph, &mut manager, &mut renderer, Vec3::new(3.0, 9.0, 0.0));

    let ray = RaySceneQuery::new(Ray::new(Vec2::ZERO, Vec2::new(1.0, 0.0)));
    let hits = ray.execute(&graph, &manager);

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].movable, near);
    assert_eq!(hits[1].movable, far);
    assert!(hits[0].distance < hits[1].distance);
    assert!((hits[0].distance - 2.5).abs() < 1e-5);
}

#[test]
fn test_ray_query_respects_visibility() {
    let mut graph = SceneGraph::new();
    let mut manager = SceneManager::new();
    let mut renderer = renderer();

    let key = attached_model(&mut graph, &mut manager, &mut renderer, Vec3::new(3.0, 0.0, 0.0));
    manager.model_mut(key).unwrap().data_mut().set_visible(false);

    let ray = RaySceneQuery::new(Ray::new(Vec2::ZERO, Vec2::new(1.0, 0.0)));
    assert!(ray.execute(&graph, &manager).is_empty());

    // Including invisible movables finds it again
    let all = RaySceneQuery::new(Ray::new(Vec2::ZERO, Vec2::new(1.0, 0.0)))
        .with_query(SceneQuery::new().including_invisible());
    assert_eq!(all.execute(&graph, &manager).len(), 1);
}

#[test]
fn test_ray_query_type_mask() {
    let mut graph = SceneGraph::new();
    let mut manager = SceneManager::new();
    let mut renderer = renderer();

    attached_model(&mut graph, &mut manager, &mut renderer, Vec3::new(3.0, 0.0, 0.0));

    let no_models = RaySceneQuery::new(Ray::new(Vec2::ZERO, Vec2::new(1.0, 0.0)))
        .with_query(SceneQuery::new().with_type_mask(QueryTypeFlags::TEXT));
    assert!(no_models.execute(&graph, &manager).is_empty());
}

#[test]
fn test_intersection_query_finds_overlaps() {
    let mut graph = SceneGraph::new();
    let mut manager = SceneManager::new();
    let mut renderer = renderer();

    let a = attached_model(&mut graph, &mut manager, &mut renderer, Vec3::new(0.0, 0.0, 0.0));
    let b = attached_model(&mut graph, &mut manager, &mut renderer, Vec3::new(0.5, 0.0, 0.0));
    let _far = attached_model(&mut graph, &mut manager, &mut renderer, Vec3::new(20.0, 0.0, 0.0));

    let pairs = IntersectionSceneQuery::new().execute(&graph, &manager);
    assert_eq!(pairs.len(), 1);
    let (x, y) = pairs[0];
    assert!((x == a && y == b) || (x == b && y == a));
}
