/// Particle emitter
///
/// Spawns particles at a configurable rate with jittered direction, speed,
/// size and life time. Jitter comes from a small seeded LCG so emission is
/// deterministic for a given seed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::{Vec2, Vec3};

use crate::materials::Material;
use crate::utils::Color;

use super::particle::Particle;

/// A particle emitter with its live particle pool
pub struct Emitter {
    position: Vec3,
    direction: Vec2,
    /// Half-angle of the emission cone in radians
    spread: f32,

    emitting: bool,
    /// Particles per second
    emission_rate: f32,
    emission_accumulator: f32,
    /// Upper bound on live particles
    quota: usize,

    particle_speed: (f32, f32),
    particle_size: (f32, f32),
    particle_life_time: (Duration, Duration),
    particle_color: Color,
    particle_material: Option<Arc<Mutex<Material>>>,

    particles: Vec<Particle>,
    rng_state: u32,
}

impl Emitter {
    /// Create an emitter at the given position, initially emitting upward
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            direction: Vec2::Y,
            spread: 0.0,
            emitting: true,
            emission_rate: 10.0,
            emission_accumulator: 0.0,
            quota: 256,
            particle_speed: (1.0, 1.0),
            particle_size: (1.0, 1.0),
            particle_life_time: (Duration::from_secs(1), Duration::from_secs(1)),
            particle_color: Color::WHITE,
            particle_material: None,
            particles: Vec::new(),
            rng_state: 0x9e3779b9,
        }
    }

    // ===== CONFIGURATION =====

    /// Set the emission direction (expected unit length)
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Set the emission cone half-angle in radians
    pub fn set_spread(&mut self, spread: f32) {
        self.spread = spread;
    }

    /// Set the emission rate in particles per second
    pub fn set_emission_rate(&mut self, rate: f32) {
        self.emission_rate = rate.max(0.0);
    }

    /// Set the live-particle quota
    pub fn set_quota(&mut self, quota: usize) {
        self.quota = quota;
        if self.particles.len() > quota {
            self.particles.truncate(quota);
        }
    }

    /// Set the particle speed range
    pub fn set_particle_speed(&mut self, min: f32, max: f32) {
        self.particle_speed = (min, max);
    }

    /// Set the particle point-size range
    pub fn set_particle_size(&mut self, min: f32, max: f32) {
        self.particle_size = (min, max);
    }

    /// Set the particle life-time range
    pub fn set_particle_life_time(&mut self, min: Duration, max: Duration) {
        self.particle_life_time = (min, max);
    }

    /// Set the spawn color
    pub fn set_particle_color(&mut self, color: Color) {
        self.particle_color = color;
    }

    /// Set the material used to draw this emitter's particles
    pub fn set_particle_material(&mut self, material: Option<Arc<Mutex<Material>>>) {
        self.particle_material = material;
    }

    /// Seed the jitter generator (deterministic emission per seed)
    pub fn set_seed(&mut self, seed: u32) {
        self.rng_state = seed | 1;
    }

    /// Start emission
    pub fn start(&mut self) {
        self.emitting = true;
    }

    /// Stop emission; live particles keep evolving
    pub fn stop(&mut self) {
        self.emitting = false;
    }

    // ===== OBSERVERS =====

    /// Emitter position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// True while the emitter spawns new particles
    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    /// Live particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// True if any particle is alive
    pub fn has_active_particles(&self) -> bool {
        !self.particles.is_empty()
    }

    /// The material used to draw this emitter's particles
    pub fn particle_material(&self) -> Option<&Arc<Mutex<Material>>> {
        self.particle_material.as_ref()
    }

    // ===== SIMULATION =====

    /// Age, integrate and spawn particles for the elapsed time
    pub fn elapse(&mut self, time: Duration) {
        for particle in &mut self.particles {
            particle.evolve(time);
        }
        self.particles.retain(|particle| particle.is_alive());

        if !self.emitting || self.emission_rate <= 0.0 {
            return;
        }

        self.emission_accumulator += self.emission_rate * time.as_secs_f32();
        let mut to_spawn = self.emission_accumulator as usize;
        self.emission_accumulator -= to_spawn as f32;

        to_spawn = to_spawn.min(self.quota.saturating_sub(self.particles.len()));
        for _ in 0..to_spawn {
            let particle = self.spawn_particle();
            self.particles.push(particle);
        }
    }

    fn spawn_particle(&mut self) -> Particle {
        let angle = (self.next_unit() - 0.5) * 2.0 * self.spread;
        let (sin, cos) = angle.sin_cos();
        let direction = Vec2::new(
            self.direction.x * cos - self.direction.y * sin,
            self.direction.x * sin + self.direction.y * cos,
        );

        let speed = Self::lerp(self.particle_speed.0, self.particle_speed.1, self.next_unit());
        let size = Self::lerp(self.particle_size.0, self.particle_size.1, self.next_unit());
        let life = Duration::from_secs_f32(Self::lerp(
            self.particle_life_time.0.as_secs_f32(),
            self.particle_life_time.1.as_secs_f32(),
            self.next_unit(),
        ));

        Particle {
            position: self.position,
            velocity: direction * speed,
            rotation: 0.0,
            point_size: size,
            color: self.particle_color,
            age: Duration::ZERO,
            life_time: life,
        }
    }

    fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Next jitter value in [0, 1)
    fn next_unit(&mut self) -> f32 {
        self.rng_state = self.rng_state.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.rng_state >> 8) as f32 / 16_777_216.0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;
