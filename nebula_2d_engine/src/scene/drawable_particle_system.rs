/// Particle system drawable
///
/// Owns one point-sprite primitive per active emitter. Each prepare copies
/// the emitter's interleaved particle data (position, rotation, point size,
/// color) into local vertex data, then applies the parent node's rotation
/// additively to each sprite rotation and its averaged scaling to each
/// point size.

use std::time::Duration;

use crate::graphics_device::DrawMode;
use crate::particles::{Particle, ParticleSystem};
use crate::render::renderer::{PrimitiveKey, Renderer};
use crate::render::vertex::{AttributeSemantic, VertexDeclaration, VertexElementType};
use crate::render::RenderPrimitive;
use crate::utils::Aabb;

use super::movable_object::{MovableData, NodeContext};
use super::query::QueryTypeFlags;

/// Particle point declaration: position, sprite rotation, point size, color
fn particle_vertex_declaration() -> VertexDeclaration {
    let float_size = std::mem::size_of::<f32>();
    let stride = Particle::VERTEX_FLOATS * float_size;

    let mut declaration = VertexDeclaration::new();
    declaration.add_element(AttributeSemantic::Position, VertexElementType::Float3, 0, stride);
    declaration.add_element(AttributeSemantic::Rotation, VertexElementType::Float1, 3 * float_size, stride);
    declaration.add_element(AttributeSemantic::PointSize, VertexElementType::Float1, 4 * float_size, stride);
    declaration.add_element(AttributeSemantic::Color, VertexElementType::Float4, 5 * float_size, stride);
    declaration
}

const ROTATION_OFFSET: usize = 3;
const POINT_SIZE_OFFSET: usize = 4;

/// A drawable particle system
pub struct DrawableParticleSystem {
    data: MovableData,
    system: ParticleSystem,
    /// One primitive per emitter, index-aligned
    primitives: Vec<PrimitiveKey>,
}

impl DrawableParticleSystem {
    /// Drawable over the given particle system
    pub fn new(system: ParticleSystem) -> Self {
        Self {
            data: MovableData::new(QueryTypeFlags::PARTICLE_SYSTEM),
            system,
            primitives: Vec::new(),
        }
    }

    /// The particle system
    pub fn particle_system(&self) -> &ParticleSystem {
        &self.system
    }

    /// The particle system, mutably
    pub fn particle_system_mut(&mut self) -> &mut ParticleSystem {
        &mut self.system
    }

    /// Common movable state
    pub fn data(&self) -> &MovableData {
        &self.data
    }

    /// Common movable state, mutably
    pub fn data_mut(&mut self) -> &mut MovableData {
        &mut self.data
    }

    /// Keys of the per-emitter primitives created so far
    pub fn primitive_keys(&self) -> &[PrimitiveKey] {
        &self.primitives
    }

    // ===== FRAME HOOKS =====

    /// Evolve the particle system
    pub fn elapse(&mut self, time: Duration) {
        self.system.elapse(time);
    }

    /// Copy particle data into the per-emitter primitives
    pub fn prepare(&mut self, ctx: &NodeContext, renderer: &mut Renderer) {
        let world_visible = ctx.world_visible && self.data.visible();
        let scale_factor = (ctx.derived_scaling.x + ctx.derived_scaling.y) * 0.5;

        // One primitive per emitter, created on demand
        while self.primitives.len() < self.system.emitter_count() {
            let mut primitive =
                RenderPrimitive::new(DrawMode::Points, particle_vertex_declaration(), true);
            primitive.set_point_sprite(true);
            self.primitives.push(renderer.add_primitive(primitive));
        }

        // Emitters removed since last prepare leave stale primitives behind
        while self.primitives.len() > self.system.emitter_count() {
            if let Some(key) = self.primitives.pop() {
                renderer.remove_primitive(key);
            }
        }

        let mut aabb = Aabb::EMPTY;

        for (emitter, &key) in self.system.emitters().iter().zip(&self.primitives) {
            let mut data =
                Vec::with_capacity(emitter.particles().len() * Particle::VERTEX_FLOATS);
            for particle in emitter.particles() {
                particle.write_vertex(&mut data);
            }

            // Node rotation turns every sprite; node scaling scales sizes
            if ctx.derived_rotation != 0.0 || scale_factor != 1.0 {
                for chunk in data.chunks_mut(Particle::VERTEX_FLOATS) {
                    chunk[ROTATION_OFFSET] += ctx.derived_rotation;
                    chunk[POINT_SIZE_OFFSET] *= scale_factor;
                }
            }

            let Some(primitive) = renderer.primitive_mut(key) else {
                continue;
            };
            primitive.set_vertex_data(data);
            primitive.set_material(emitter.particle_material().cloned());
            primitive.set_model_matrix(ctx.full_transformation);
            primitive.set_world_visible(world_visible);
        }

        for &key in &self.primitives {
            if let Some(primitive) = renderer.primitive(key) {
                aabb.merge(primitive.world_aabb());
            }
        }
        self.data.update_bounds(aabb);
    }

    /// Mark every primitive world-invisible (owning node hidden)
    pub fn hide(&mut self, renderer: &mut Renderer) {
        for &key in &self.primitives {
            if let Some(primitive) = renderer.primitive_mut(key) {
                primitive.set_world_visible(false);
            }
        }
    }

    /// Detach every primitive from the renderer
    pub fn detach(&mut self, renderer: &mut Renderer) {
        for key in self.primitives.drain(..) {
            renderer.remove_primitive(key);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "drawable_particle_system_tests.rs"]
mod tests;
