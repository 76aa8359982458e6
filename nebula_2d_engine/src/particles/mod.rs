/// Particle systems: emitters and their particle pools

pub mod emitter;
pub mod particle;
pub mod particle_system;

pub use emitter::Emitter;
pub use particle::Particle;
pub use particle_system::ParticleSystem;
