/*!
# Nebula2D Engine

Core of a 2D rendering engine: a scene graph feeding a retained-mode
batching renderer backed by a streaming GPU vertex buffer.

The engine converts a tree of transformable objects — shapes, sprites,
animated sprites, text, particle systems — into the minimum number of draw
calls per frame while honoring per-object state (material, texture, blend,
wireframe, point size), painter's-order sorting, and fine-grained update
semantics (only re-transform vertices whose data or transform changed; only
re-upload batch regions whose membership changed).

## Architecture

- **GraphicsDevice**: trait abstraction over the graphics API; backends
  implement it, and the in-crate `MockGraphicsDevice` drives the whole
  pipeline without a GPU.
- **Renderer**: groups render primitives into batches over one pooled
  stream buffer; compresses, sorts and uploads changed ranges each frame.
- **SceneGraph**: transform hierarchy with a z-ordered flat node list and
  attachable movables, cameras and lights.
- **SceneManager**: owns the attachable objects (models, text, particle
  systems, cameras, lights).
*/

// Error handling module
pub mod error;

// Internal logging system
pub mod log;

// Engine singleton manager module
mod engine;

// Graphics API abstraction
pub mod graphics_device;

// Shared value types
pub mod utils;

// Texture and animation descriptions
pub mod textures;

// Materials
pub mod materials;

// Rendering core
pub mod render;

// Particle systems
pub mod particles;

// Font and text layout model
pub mod text;

// Scene graph, manager and attachable objects
pub mod scene;

// Re-export error types at crate root
pub use error::{Nebula2dError, Result};

// Re-export the engine singleton manager
pub use engine::Nebula2dEngine;

// Re-export math library
pub use glam;
