/// Tests for shape geometry generation and primitive sync.

use super::*;
use crate::graphics_device::{DrawMode, MockGraphicsDevice, SharedGraphicsDevice};
use crate::render::renderer::Renderer;
use crate::scene::movable_object::NodeContext;
use crate::utils::{Color, Rect};

use glam::{Vec2, Vec3};
use std::sync::{Arc, Mutex};

fn renderer() -> Renderer {
    let device: SharedGraphicsDevice = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    Renderer::new(device)
}

fn positions(data: &[f32]) -> Vec<Vec3> {
    data.chunks(MESH_VERTEX_COMPONENTS)
        .map(|v| Vec3::new(v[0], v[1], v[2]))
        .collect()
}

#[test]
fn test_rectangle_generates_two_triangles() {
    let mut renderer = renderer();
    let mut rectangle = Rectangle::new(Vec2::new(2.0, 4.0), Color::RED);

    rectangle.prepare(&NodeContext::identity(), &mut renderer);

    let key = rectangle.shape().primitive_key().unwrap();
    let primitive = renderer.primitive(key).unwrap();
    assert_eq!(primitive.vertex_count(), 6);
    assert_eq!(primitive.draw_mode(), DrawMode::Triangles);

    let corners = positions(primitive.vertex_data());
    assert!(corners.contains(&Vec3::new(-1.0, 2.0, 0.0)));
    assert!(corners.contains(&Vec3::new(1.0, -2.0, 0.0)));
    // Color baked into the vertex stream
    assert_eq!(&primitive.vertex_data()[6..10], &[1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_rectangle_mutators_regenerate() {
    let mut renderer = renderer();
    let mut rectangle = Rectangle::new(Vec2::ONE, Color::WHITE);

    rectangle.prepare(&NodeContext::identity(), &mut renderer);
    rectangle.set_position(Vec3::new(10.0, 0.0, 0.0));
    rectangle.prepare(&NodeContext::identity(), &mut renderer);

    let key = rectangle.shape().primitive_key().unwrap();
    let corners = positions(renderer.primitive(key).unwrap().vertex_data());
    assert!(corners.contains(&Vec3::new(9.5, 0.5, 0.0)));
}

#[test]
fn test_fill_color_updates_without_regen() {
    let mut renderer = renderer();
    let mut rectangle = Rectangle::new(Vec2::ONE, Color::WHITE);
    rectangle.prepare(&NodeContext::identity(), &mut renderer);

    rectangle.shape_mut().set_fill_color(Color::BLUE);
    rectangle.prepare(&NodeContext::identity(), &mut renderer);

    let key = rectangle.shape().primitive_key().unwrap();
    assert_eq!(
        renderer.primitive(key).unwrap().base_color(),
        Color::BLUE
    );
}

#[test]
fn test_sprite_tex_coord_round_trips() {
    let mut renderer = renderer();
    let mut sprite = Sprite::new(Vec2::ONE, None);
    sprite.prepare(&NodeContext::identity(), &mut renderer);

    let before = sprite.tex_coords();

    sprite.flip_horizontal();
    assert!(sprite.is_flipped_horizontally());
    sprite.flip_horizontal();
    assert_eq!(sprite.tex_coords(), before);

    sprite.crop(Some(Rect::new(Vec2::new(0.2, 0.2), Vec2::new(0.8, 0.8))));
    assert!(sprite.is_cropped());
    sprite.crop(Some(Rect::UNIT));
    assert_eq!(sprite.tex_coords(), before);

    sprite.repeat(Some(Vec2::new(2.0, 2.0)));
    assert!(sprite.is_repeated());
    sprite.repeat(None);
    assert_eq!(sprite.tex_coords(), before);
}

#[test]
fn test_sprite_bakes_tex_coords_into_vertices() {
    let mut renderer = renderer();
    let mut sprite = Sprite::new(Vec2::ONE, None);
    sprite.set_tex_coords(Vec2::new(0.25, 0.25), Vec2::new(0.75, 0.5));
    sprite.prepare(&NodeContext::identity(), &mut renderer);

    let key = sprite.shape().primitive_key().unwrap();
    let data = renderer.primitive(key).unwrap().vertex_data();

    // Second vertex is the lower-left corner: tex coord (ll.x, ll.y)
    let v2 = &data[MESH_VERTEX_COMPONENTS..2 * MESH_VERTEX_COMPONENTS];
    assert_eq!(&v2[10..12], &[0.25, 0.25]);
}

#[test]
fn test_ellipse_triangle_fan() {
    let mut renderer = renderer();
    let mut ellipse = Ellipse::new(Vec2::new(2.0, 2.0), Color::GREEN);
    ellipse.set_sides(8);

    ellipse.prepare(&NodeContext::identity(), &mut renderer);

    let key = ellipse.shape().primitive_key().unwrap();
    let primitive = renderer.primitive(key).unwrap();
    assert_eq!(primitive.draw_mode(), DrawMode::TriangleFan);
    // Center + sides + closing vertex
    assert_eq!(primitive.vertex_count(), 10);

    // All ring points lie on the radius
    for p in positions(primitive.vertex_data()).iter().skip(1) {
        assert!((Vec2::new(p.x, p.y).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_line_and_thickness() {
    let mut renderer = renderer();
    let mut line = Line::with_thickness(
        Vec3::ZERO,
        Vec3::new(4.0, 0.0, 0.0),
        Color::WHITE,
        3.0,
    );

    line.prepare(&NodeContext::identity(), &mut renderer);

    let key = line.shape().primitive_key().unwrap();
    let primitive = renderer.primitive(key).unwrap();
    assert_eq!(primitive.draw_mode(), DrawMode::Lines);
    assert_eq!(primitive.vertex_count(), 2);
    assert_eq!(primitive.line_thickness(), 3.0);
}

#[test]
fn test_curve_samples_line_strip() {
    let mut renderer = renderer();
    let mut curve = Curve::new(
        vec![
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ],
        Color::WHITE,
    );
    curve.set_smoothness(4);

    curve.prepare(&NodeContext::identity(), &mut renderer);

    let key = curve.shape().primitive_key().unwrap();
    let primitive = renderer.primitive(key).unwrap();
    assert_eq!(primitive.draw_mode(), DrawMode::LineStrip);
    assert_eq!(primitive.vertex_count(), 5);

    let points = positions(primitive.vertex_data());
    assert_eq!(points[0], Vec3::ZERO);
    assert_eq!(points[4], Vec3::new(2.0, 0.0, 0.0));
    // Quadratic Bezier midpoint
    assert!((points[2] - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_border_frame() {
    let mut renderer = renderer();
    let mut border = Border::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0), Color::WHITE);

    border.prepare(&NodeContext::identity(), &mut renderer);

    let key = border.shape().primitive_key().unwrap();
    let primitive = renderer.primitive(key).unwrap();
    // 8 quads, 6 vertices each
    assert_eq!(primitive.vertex_count(), 48);

    // Nothing reaches into the hollow interior
    for p in positions(primitive.vertex_data()) {
        assert!(p.x.abs() >= 4.0 - 1e-5 || p.y.abs() >= 4.0 - 1e-5);
    }
}

#[test]
fn test_mesh_raw_data() {
    let mut renderer = renderer();
    let data = vec![0.0; 3 * MESH_VERTEX_COMPONENTS];
    let mut mesh = Mesh::new(DrawMode::Triangles, data);

    assert_eq!(mesh.vertex_count(), 3);
    mesh.prepare(&NodeContext::identity(), &mut renderer);
    assert!(mesh.shape().primitive_key().is_some());
}

#[test]
fn test_animated_sprite_retargets_texture() {
    use crate::graphics_device::TextureHandle;
    use crate::textures::{Animation, Texture};
    use std::time::Duration;

    let frames = vec![
        Arc::new(Texture::new(TextureHandle::tex_2d(1), 8, 8)),
        Arc::new(Texture::new(TextureHandle::tex_2d(2), 8, 8)),
    ];
    let animation = Animation::new(frames, Duration::from_millis(100));

    let mut renderer = renderer();
    let mut sprite = AnimatedSprite::new(Vec2::ONE, animation, None);

    sprite.prepare(&NodeContext::identity(), &mut renderer);
    let key = sprite.sprite().shape().primitive_key().unwrap();
    assert_eq!(renderer.primitive(key).unwrap().texture().unwrap().id, 1);

    sprite.elapse(Duration::from_millis(150));
    sprite.prepare(&NodeContext::identity(), &mut renderer);
    assert_eq!(renderer.primitive(key).unwrap().texture().unwrap().id, 2);
}

#[test]
fn test_detach_removes_primitive() {
    let mut renderer = renderer();
    let mut rectangle = Rectangle::new(Vec2::ONE, Color::WHITE);

    rectangle.prepare(&NodeContext::identity(), &mut renderer);
    assert_eq!(renderer.total_primitives(), 1);

    rectangle.detach(&mut renderer);
    assert_eq!(renderer.total_primitives(), 0);
    assert!(rectangle.shape().primitive_key().is_none());
}
