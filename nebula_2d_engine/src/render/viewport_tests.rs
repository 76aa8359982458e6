/// Tests for Viewport.

use super::*;

#[test]
fn test_aspect_ratio() {
    assert_eq!(Viewport::new(800, 600).aspect_ratio(), 800.0 / 600.0);
    assert_eq!(Viewport::new(100, 0).aspect_ratio(), 1.0);
}

#[test]
fn test_viewport_to_camera_ratio() {
    let viewport = Viewport::new(1600, 1200).with_base_size(Vec2::new(800.0, 600.0));
    assert_eq!(viewport.viewport_to_camera_ratio(), Vec2::new(2.0, 2.0));

    // Without a base size the ratio is identity
    assert_eq!(Viewport::new(1600, 1200).viewport_to_camera_ratio(), Vec2::ONE);
}

#[test]
fn test_resize() {
    let mut viewport = Viewport::with_bounds(10, 20, 640, 480);
    viewport.resize(320, 240);
    assert_eq!(viewport.x(), 10);
    assert_eq!(viewport.size(), Vec2::new(320.0, 240.0));
}
