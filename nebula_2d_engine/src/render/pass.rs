/// Render pass descriptor
///
/// A pass names the shader program and blend state used for one traversal
/// of a set of batches. Primitives declare an ordered pass list; two
/// primitives must have identical pass lists to share a batch.

use std::sync::Arc;

use crate::graphics_device::{BlendFactor, GraphicsDevice};

use super::shader::ShaderProgram;

/// One render pass
#[derive(Debug, Clone)]
pub struct RenderPass {
    /// Number of times the pass repeats (1 = draw once)
    iterations: u32,
    blend_source: BlendFactor,
    blend_destination: BlendFactor,
    shader_program: Option<Arc<ShaderProgram>>,
}

impl Default for RenderPass {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass {
    /// Standard alpha-blended pass without a shader program
    pub fn new() -> Self {
        Self {
            iterations: 1,
            blend_source: BlendFactor::SourceAlpha,
            blend_destination: BlendFactor::OneMinusSourceAlpha,
            shader_program: None,
        }
    }

    /// Pass using the given shader program
    pub fn with_shader_program(shader_program: Arc<ShaderProgram>) -> Self {
        Self {
            shader_program: Some(shader_program),
            ..Self::new()
        }
    }

    /// Set blend factors
    pub fn set_blend(&mut self, source: BlendFactor, destination: BlendFactor) {
        self.blend_source = source;
        self.blend_destination = destination;
    }

    /// Set the iteration count
    pub fn set_iterations(&mut self, iterations: u32) {
        self.iterations = iterations;
    }

    /// Iteration count
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Blend factors as (source, destination)
    pub fn blend(&self) -> (BlendFactor, BlendFactor) {
        (self.blend_source, self.blend_destination)
    }

    /// The shader program, if any
    pub fn shader_program(&self) -> Option<&Arc<ShaderProgram>> {
        self.shader_program.as_ref()
    }

    /// Apply this pass's blend state to the device
    pub fn apply_blend(&self, device: &mut dyn GraphicsDevice) {
        device.set_blend(self.blend_source, self.blend_destination);
    }
}

impl PartialEq for RenderPass {
    /// Pass equality: same iteration count, same blend state, same shader
    /// program identity
    fn eq(&self, other: &Self) -> bool {
        self.iterations == other.iterations
            && self.blend_source == other.blend_source
            && self.blend_destination == other.blend_destination
            && match (&self.shader_program, &other.shader_program) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }
}

/// Pass-by-pass list equality
pub fn all_passes_equal(a: &[RenderPass], b: &[RenderPass]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}
