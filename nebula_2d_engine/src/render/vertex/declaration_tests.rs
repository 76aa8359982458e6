/// Tests for VertexDeclaration.

use super::*;

fn mesh_declaration() -> VertexDeclaration {
    let stride = 13 * 4;
    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, stride);
    declaration.add_element(AttributeSemantic::Normal, VertexElementType::Float3, 3 * 4, stride);
    declaration.add_element(AttributeSemantic::Color, VertexElementType::Float4, 6 * 4, stride);
    declaration.add_element(AttributeSemantic::TexCoord, VertexElementType::Float3, 10 * 4, stride);
    declaration
}

#[test]
fn test_vertex_size_and_components() {
    let declaration = mesh_declaration();
    assert_eq!(declaration.vertex_size(), 52);
    assert_eq!(declaration.components(), 13);
}

#[test]
fn test_empty_declaration() {
    let declaration = VertexDeclaration::new();
    assert_eq!(declaration.vertex_size(), 0);
    assert_eq!(declaration.components(), 0);
    assert!(declaration.find(AttributeSemantic::Position).is_none());
}

#[test]
fn test_equality_is_element_wise() {
    let a = mesh_declaration();
    let b = mesh_declaration();
    assert_eq!(a, b);

    let mut c = mesh_declaration();
    c.add_element(AttributeSemantic::PointSize, VertexElementType::Float1, 52, 56);
    assert_ne!(a, c);

    // Order matters
    let mut d = VertexDeclaration::new();
    d.add_element(AttributeSemantic::Color, VertexElementType::Float4, 6 * 4, 52);
    d.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, 52);
    let mut e = VertexDeclaration::new();
    e.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, 52);
    e.add_element(AttributeSemantic::Color, VertexElementType::Float4, 6 * 4, 52);
    assert_ne!(d, e);
}

#[test]
fn test_find_by_semantic() {
    let declaration = mesh_declaration();
    let color = declaration.find(AttributeSemantic::Color).unwrap();
    assert_eq!(color.offset, 24);
    assert_eq!(color.components(), 4);
    assert!(declaration.find(AttributeSemantic::Rotation).is_none());
}

#[test]
fn test_clear_elements() {
    let mut declaration = mesh_declaration();
    declaration.clear_elements();
    assert!(declaration.elements().is_empty());
    assert_eq!(declaration.vertex_size(), 0);
}

#[test]
fn test_semantic_locations_are_unique() {
    let semantics = [
        AttributeSemantic::Position,
        AttributeSemantic::Normal,
        AttributeSemantic::Color,
        AttributeSemantic::TexCoord,
        AttributeSemantic::PointSize,
        AttributeSemantic::Rotation,
    ];
    let mut locations: Vec<u32> = semantics.iter().map(|s| s.location()).collect();
    locations.sort_unstable();
    locations.dedup();
    assert_eq!(locations.len(), semantics.len());
}
