/// Render module: primitives, batching renderer, passes and camera support

pub mod fog;
pub mod frustum;
pub mod pass;
pub mod primitive;
pub mod renderer;
pub mod shader;
pub mod vertex;
pub mod viewport;

pub use fog::{Fog, FogMode};
pub use frustum::{Frustum, ProjectionType};
pub use pass::RenderPass;
pub use primitive::RenderPrimitive;
pub use renderer::{GroupableStatus, PrimitiveKey, Renderer, UpdateStatus};
pub use shader::ShaderProgram;
pub use viewport::Viewport;
