/// Tests for RenderPrimitive: metrics, transforms, dirty flags, grouping.

use super::*;
use crate::render::vertex::VertexElementType;

/// Position3 + Color4 interleaved, 7 floats per vertex
fn test_declaration() -> VertexDeclaration {
    let stride = 7 * 4;
    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, stride);
    declaration.add_element(AttributeSemantic::Color, VertexElementType::Float4, 3 * 4, stride);
    declaration
}

/// One vertex at the given position with the given alpha
fn vertex(x: f32, y: f32, z: f32, alpha: f32) -> Vec<f32> {
    vec![x, y, z, 1.0, 1.0, 1.0, alpha]
}

fn primitive_with_data(data: Vec<f32>) -> RenderPrimitive {
    let mut primitive = RenderPrimitive::new(DrawMode::Triangles, test_declaration(), true);
    primitive.set_vertex_data(data);
    primitive
}

#[test]
fn test_vertex_metrics_extraction() {
    let metrics = vertex_metrics(&test_declaration());
    assert_eq!(metrics.position_components, 3);
    assert_eq!(metrics.position_offset, 0);
    assert_eq!(metrics.position_stride, 7);
    assert_eq!(metrics.color_components, 4);
    assert_eq!(metrics.color_offset, 3);
    assert_eq!(metrics.color_stride, 7);
}

#[test]
fn test_prepare_transforms_positions() {
    let mut primitive = primitive_with_data(vertex(1.0, 2.0, 0.5, 1.0));
    primitive.set_model_matrix(Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));

    assert!(primitive.prepare());
    let world = primitive.world_vertex_data();
    assert_eq!(world.len(), 7);
    assert!((world[0] - 11.0).abs() < 1e-6);
    assert!((world[1] - 2.0).abs() < 1e-6);
    assert!((world[2] - 0.5).abs() < 1e-6);
    // Colors untouched
    assert_eq!(&world[3..7], &[1.0, 1.0, 1.0, 1.0]);

    // Second prepare with no changes reports no change
    assert!(!primitive.prepare());
}

#[test]
fn test_prepare_reapplies_after_matrix_change() {
    let mut primitive = primitive_with_data(vertex(1.0, 0.0, 0.0, 1.0));
    primitive.prepare();

    primitive.set_model_matrix(Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)));
    assert!(primitive.prepare());
    assert!((primitive.world_vertex_data()[1] - 5.0).abs() < 1e-6);
}

#[test]
fn test_opacity_scales_world_alpha_only() {
    let mut primitive = primitive_with_data(vertex(0.0, 0.0, 0.0, 0.8));
    primitive.set_opacity(0.5);

    assert!(primitive.prepare());
    assert!((primitive.world_vertex_data()[6] - 0.4).abs() < 1e-6);
    // Local data keeps its authored alpha
    assert_eq!(primitive.vertex_data()[6], 0.8);

    // Restoring opacity restores world alpha from local
    primitive.set_opacity(1.0);
    assert!(primitive.prepare());
    assert!((primitive.world_vertex_data()[6] - 0.8).abs() < 1e-6);
}

#[test]
fn test_base_color_and_opacity_touch_local_data() {
    let mut data = vertex(0.0, 0.0, 0.0, 1.0);
    data.extend(vertex(1.0, 0.0, 0.0, 1.0));
    let mut primitive = primitive_with_data(data);

    primitive.set_base_color(Color::new(0.2, 0.4, 0.6, 0.8));
    assert_eq!(&primitive.vertex_data()[3..7], &[0.2, 0.4, 0.6, 0.8]);
    assert_eq!(&primitive.vertex_data()[10..14], &[0.2, 0.4, 0.6, 0.8]);
    assert_eq!(primitive.base_color(), Color::new(0.2, 0.4, 0.6, 0.8));

    primitive.set_base_opacity(0.5);
    assert!((primitive.vertex_data()[6] - 0.4).abs() < 1e-6);
}

#[test]
fn test_refresh_detects_world_z_change() {
    let mut primitive = primitive_with_data(vertex(0.0, 0.0, 0.25, 1.0));
    primitive.set_world_visible(true);

    // First refresh sees z 0 -> 0.25 plus the world-visible transition
    assert!(primitive.refresh());
    assert_eq!(primitive.world_z(), 0.25);

    // Stable state: no more refresh requests
    primitive.prepare();
    assert!(!primitive.refresh());

    // Translating in z moves the painter key
    primitive.set_model_matrix(Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0)));
    assert!(primitive.refresh());
    assert_eq!(primitive.world_z(), 1.25);
}

#[test]
fn test_refresh_detects_material_swap() {
    let mut primitive = primitive_with_data(vertex(0.0, 0.0, 0.0, 1.0));
    primitive.set_world_visible(true);
    primitive.prepare();
    let _ = primitive.refresh();

    let material = Arc::new(Mutex::new(Material::new("m")));
    primitive.set_material(Some(material));
    assert!(primitive.refresh());
    assert!(!primitive.refresh());
}

#[test]
fn test_groupable_requires_matching_state() {
    let material = Arc::new(Mutex::new(Material::new("m")));

    let mut a = primitive_with_data(vertex(0.0, 0.0, 0.0, 1.0));
    let mut b = primitive_with_data(vertex(1.0, 0.0, 0.0, 1.0));
    a.set_world_visible(true);
    b.set_world_visible(true);
    a.set_material(Some(material.clone()));
    b.set_material(Some(material.clone()));

    assert!(a.is_groupable(&b));

    // Different material reference
    let other_material = Arc::new(Mutex::new(Material::new("m")));
    b.set_material(Some(other_material));
    assert!(!a.is_groupable(&b));

    // Same again, then state splits
    b.set_material(Some(material));
    assert!(a.is_groupable(&b));
    b.set_point_size(4.0);
    assert!(!a.is_groupable(&b));
    b.set_point_size(1.0);
    b.set_wire_frame(true);
    assert!(!a.is_groupable(&b));
    b.set_wire_frame(false);

    // Hidden primitives never group
    b.set_world_visible(false);
    assert!(!a.is_groupable(&b));
}

#[test]
fn test_two_component_positions_transform_as_2d() {
    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Position, VertexElementType::Float2, 0, 8);

    let mut primitive = RenderPrimitive::new(DrawMode::Points, declaration, true);
    primitive.set_vertex_data(vec![1.0, 0.0]);
    primitive.set_model_matrix(Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
    primitive.prepare();

    let world = primitive.world_vertex_data();
    assert!(world[0].abs() < 1e-6);
    assert!((world[1] - 1.0).abs() < 1e-6);
}

#[test]
fn test_world_aabb_follows_world_data() {
    let mut data = vertex(-1.0, -2.0, 0.0, 1.0);
    data.extend(vertex(3.0, 4.0, 0.0, 1.0));
    let mut primitive = primitive_with_data(data);
    primitive.set_model_matrix(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
    primitive.prepare();

    let aabb = primitive.world_aabb();
    assert_eq!(aabb.min, Vec3::new(0.0, -2.0, 0.0));
    assert_eq!(aabb.max, Vec3::new(4.0, 4.0, 0.0));
}

#[test]
fn test_size_change_requests_refresh_when_world_visible() {
    let mut primitive = primitive_with_data(vertex(0.0, 0.0, 0.0, 1.0));
    primitive.set_world_visible(true);
    primitive.prepare();
    let _ = primitive.refresh();

    let mut more = vertex(0.0, 0.0, 0.0, 1.0);
    more.extend(vertex(1.0, 1.0, 0.0, 1.0));
    primitive.set_vertex_data(more);
    assert!(primitive.refresh());
}
