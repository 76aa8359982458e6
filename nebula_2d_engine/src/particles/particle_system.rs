/// Particle system: a group of emitters evolved together

use std::time::Duration;

use glam::Vec3;

use super::emitter::Emitter;

/// A particle system owning any number of emitters
#[derive(Default)]
pub struct ParticleSystem {
    emitters: Vec<Emitter>,
}

impl ParticleSystem {
    /// Create an empty particle system
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an emitter at the given position and return it for setup
    pub fn create_emitter(&mut self, position: Vec3) -> &mut Emitter {
        self.emitters.push(Emitter::new(position));
        self.emitters.last_mut().unwrap()
    }

    /// All emitters
    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    /// All emitters, mutably
    pub fn emitters_mut(&mut self) -> &mut [Emitter] {
        &mut self.emitters
    }

    /// Number of emitters
    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// True if any emitter has live particles
    pub fn has_active_particles(&self) -> bool {
        self.emitters.iter().any(|emitter| emitter.has_active_particles())
    }

    /// Start emission on every emitter
    pub fn start(&mut self) {
        for emitter in &mut self.emitters {
            emitter.start();
        }
    }

    /// Stop emission on every emitter
    pub fn stop(&mut self) {
        for emitter in &mut self.emitters {
            emitter.stop();
        }
    }

    /// Evolve every emitter by the elapsed time
    pub fn elapse(&mut self, time: Duration) {
        for emitter in &mut self.emitters {
            emitter.elapse(time);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "particle_system_tests.rs"]
mod tests;
