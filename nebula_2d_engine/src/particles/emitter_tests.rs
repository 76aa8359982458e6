/// Tests for Emitter.

use super::*;

#[test]
fn test_emission_respects_rate() {
    let mut emitter = Emitter::new(Vec3::ZERO);
    emitter.set_emission_rate(10.0);

    emitter.elapse(Duration::from_millis(500));
    assert_eq!(emitter.particles().len(), 5);

    emitter.elapse(Duration::from_millis(500));
    assert_eq!(emitter.particles().len(), 10);
}

#[test]
fn test_emission_respects_quota() {
    let mut emitter = Emitter::new(Vec3::ZERO);
    emitter.set_emission_rate(1000.0);
    emitter.set_quota(16);
    emitter.set_particle_life_time(Duration::from_secs(60), Duration::from_secs(60));

    emitter.elapse(Duration::from_secs(1));
    assert_eq!(emitter.particles().len(), 16);
}

#[test]
fn test_particles_expire() {
    let mut emitter = Emitter::new(Vec3::ZERO);
    emitter.set_emission_rate(10.0);
    emitter.set_particle_life_time(Duration::from_millis(100), Duration::from_millis(100));

    emitter.elapse(Duration::from_millis(100));
    assert!(emitter.has_active_particles());

    emitter.stop();
    emitter.elapse(Duration::from_millis(200));
    assert!(!emitter.has_active_particles());
}

#[test]
fn test_stop_halts_spawning_but_not_evolution() {
    let mut emitter = Emitter::new(Vec3::ZERO);
    emitter.set_emission_rate(10.0);
    emitter.set_particle_speed(2.0, 2.0);
    emitter.set_particle_life_time(Duration::from_secs(10), Duration::from_secs(10));

    emitter.elapse(Duration::from_millis(500));
    let count = emitter.particles().len();
    let before: Vec<_> = emitter.particles().iter().map(|p| p.position).collect();

    emitter.stop();
    emitter.elapse(Duration::from_millis(500));
    assert_eq!(emitter.particles().len(), count);

    for (particle, old) in emitter.particles().iter().zip(before) {
        assert!(particle.position.distance(old) > 0.0);
    }
}

#[test]
fn test_deterministic_with_seed() {
    let mut a = Emitter::new(Vec3::ZERO);
    let mut b = Emitter::new(Vec3::ZERO);
    for emitter in [&mut a, &mut b] {
        emitter.set_seed(42);
        emitter.set_emission_rate(100.0);
        emitter.set_spread(1.0);
        emitter.set_particle_speed(1.0, 3.0);
    }

    a.elapse(Duration::from_millis(100));
    b.elapse(Duration::from_millis(100));

    assert_eq!(a.particles().len(), b.particles().len());
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa.velocity, pb.velocity);
        assert_eq!(pa.point_size, pb.point_size);
    }
}

#[test]
fn test_particle_vertex_layout() {
    let particle = Particle {
        position: Vec3::new(1.0, 2.0, 3.0),
        velocity: Vec2::ZERO,
        rotation: 0.5,
        point_size: 4.0,
        color: Color::new(0.1, 0.2, 0.3, 0.4),
        age: Duration::ZERO,
        life_time: Duration::from_secs(1),
    };

    let mut out = Vec::new();
    particle.write_vertex(&mut out);
    assert_eq!(out.len(), Particle::VERTEX_FLOATS);
    assert_eq!(out, vec![1.0, 2.0, 3.0, 0.5, 4.0, 0.1, 0.2, 0.3, 0.4]);
}
