/// Vertex layer: declarations, data views, buffer objects and batches

pub mod batch;
pub mod buffer;
pub mod data_view;
pub mod declaration;

pub use batch::{BatchTexture, VertexBatch};
pub use buffer::{VertexBufferObject, VertexBufferView};
pub use data_view::VertexDataView;
pub use declaration::{AttributeSemantic, VertexDeclaration, VertexElement, VertexElementType};
