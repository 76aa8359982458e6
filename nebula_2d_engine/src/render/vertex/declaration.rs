/// Vertex declaration: describes an interleaved vertex layout

/// Attribute semantic, matched against shader attribute locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSemantic {
    Position,
    Normal,
    Color,
    TexCoord,
    PointSize,
    Rotation,
}

impl AttributeSemantic {
    /// Fixed attribute location for this semantic
    pub fn location(self) -> u32 {
        match self {
            AttributeSemantic::Position => 0,
            AttributeSemantic::Normal => 1,
            AttributeSemantic::Color => 2,
            AttributeSemantic::TexCoord => 3,
            AttributeSemantic::PointSize => 4,
            AttributeSemantic::Rotation => 5,
        }
    }
}

/// Element type: component count of a float attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexElementType {
    /// 1-component float
    Float1,
    /// 2-component float (vec2)
    Float2,
    /// 3-component float (vec3)
    Float3,
    /// 4-component float (vec4)
    Float4,
}

impl VertexElementType {
    /// Number of float components
    pub fn components(self) -> usize {
        match self {
            VertexElementType::Float1 => 1,
            VertexElementType::Float2 => 2,
            VertexElementType::Float3 => 3,
            VertexElementType::Float4 => 4,
        }
    }

    /// Size in bytes
    pub fn size(self) -> usize {
        self.components() * std::mem::size_of::<f32>()
    }
}

/// One element of a vertex declaration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexElement {
    pub semantic: AttributeSemantic,
    pub element_type: VertexElementType,
    /// Byte offset of the first occurrence within the stream
    pub offset: usize,
    /// Byte stride between consecutive occurrences
    pub stride: usize,
}

impl VertexElement {
    /// Construct a new vertex element
    pub fn new(
        semantic: AttributeSemantic,
        element_type: VertexElementType,
        offset: usize,
        stride: usize,
    ) -> Self {
        Self {
            semantic,
            element_type,
            offset,
            stride,
        }
    }

    /// Number of float components of this element
    pub fn components(&self) -> usize {
        self.element_type.components()
    }
}

/// An ordered sequence of vertex elements plus the derived vertex size
///
/// Equality is element-wise sequence equality, used to decide whether two
/// batches can share attribute bindings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexDeclaration {
    elements: Vec<VertexElement>,
}

impl VertexDeclaration {
    /// Empty declaration
    pub fn new() -> Self {
        Self::default()
    }

    /// Declaration from a list of elements
    pub fn with_elements(elements: Vec<VertexElement>) -> Self {
        Self { elements }
    }

    /// Append an element. Overlap between elements is not validated.
    pub fn add_element(
        &mut self,
        semantic: AttributeSemantic,
        element_type: VertexElementType,
        offset: usize,
        stride: usize,
    ) {
        self.elements
            .push(VertexElement::new(semantic, element_type, offset, stride));
    }

    /// Remove all elements
    pub fn clear_elements(&mut self) {
        self.elements.clear();
    }

    /// All elements in declaration order
    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    /// The authoritative vertex stride in bytes: the sum of the element
    /// byte sizes (the layouts in this engine are fully interleaved)
    pub fn vertex_size(&self) -> usize {
        self.elements.iter().map(|e| e.element_type.size()).sum()
    }

    /// Total float component count over all elements
    pub fn components(&self) -> usize {
        self.elements.iter().map(|e| e.components()).sum()
    }

    /// The element with the given semantic, if declared
    pub fn find(&self, semantic: AttributeSemantic) -> Option<&VertexElement> {
        self.elements.iter().find(|e| e.semantic == semantic)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "declaration_tests.rs"]
mod tests;
