/// Tests for SceneManager.

use super::*;
use crate::graphics_device::{MockGraphicsDevice, SharedGraphicsDevice};
use crate::render::renderer::Renderer;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::model::Model;
use crate::scene::movable_object::NodeContext;
use crate::scene::shapes::Rectangle;
use crate::utils::Color;

use glam::Vec2;
use std::sync::{Arc, Mutex};

fn renderer() -> Renderer {
    let device: SharedGraphicsDevice = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    Renderer::new(device)
}

#[test]
fn test_typed_movable_access() {
    let mut manager = SceneManager::new();
    let model_key = manager.create_model(Model::new());

    assert!(manager.model(model_key).is_some());
    assert!(manager.text(model_key).is_none());
    assert!(manager.contains_movable(model_key));
    assert_eq!(manager.movable_count(), 1);
}

#[test]
fn test_remove_movable_detaches_primitives() {
    let mut manager = SceneManager::new();
    let mut renderer = renderer();

    let mut model = Model::new();
    model.create_rectangle(Rectangle::new(Vec2::ONE, Color::WHITE));
    let key = manager.create_model(model);

    manager.prepare_movable(key, &NodeContext::identity(), &mut renderer);
    assert_eq!(renderer.total_primitives(), 1);

    assert!(manager.remove_movable(key, &mut renderer));
    assert!(!manager.remove_movable(key, &mut renderer));
    assert_eq!(renderer.total_primitives(), 0);
}

#[test]
fn test_cameras_and_lights() {
    let mut manager = SceneManager::new();

    let camera_key = manager.create_camera(Camera::new("main"));
    let light_key = manager.create_light(Light::point());

    assert_eq!(manager.camera_count(), 1);
    assert_eq!(manager.light_count(), 1);
    assert_eq!(manager.camera(camera_key).unwrap().name(), "main");

    assert!(manager.remove_camera(camera_key));
    assert!(!manager.remove_camera(camera_key));
    assert!(manager.remove_light(light_key));
    assert_eq!(manager.camera_count(), 0);
}
