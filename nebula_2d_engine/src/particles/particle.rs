/// A single particle

use std::time::Duration;

use glam::{Vec2, Vec3};

use crate::utils::Color;

/// One live particle of an emitter
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec2,
    pub rotation: f32,
    pub point_size: f32,
    pub color: Color,
    pub age: Duration,
    pub life_time: Duration,
}

impl Particle {
    /// Number of floats a particle contributes to the interleaved vertex
    /// stream: position (3) + rotation (1) + point size (1) + color (4)
    pub const VERTEX_FLOATS: usize = 9;

    /// True while the particle has life time left
    pub fn is_alive(&self) -> bool {
        self.age < self.life_time
    }

    /// Integrate one time step
    pub fn evolve(&mut self, time: Duration) {
        self.position += (self.velocity * time.as_secs_f32()).extend(0.0);
        self.age += time;
    }

    /// Append this particle's interleaved vertex data
    pub fn write_vertex(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&[
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation,
            self.point_size,
            self.color.r,
            self.color.g,
            self.color.b,
            self.color.a,
        ]);
    }
}
