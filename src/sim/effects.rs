//! Short-lived particle bursts shown when the player loses an egg.
//!
//! Purely visual: particles never affect gameplay. Renderers read the list
//! each frame; the simulation integrates and prunes it with a filter pass.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::GRAVITY;

/// A single burst particle.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in arbitrary units; dead at 0
    pub life: f32,
    pub radius: f32,
}

/// Particles spawned on an ordinary hit.
pub const HIT_BURST: usize = 12;
/// Particles spawned on a fatal hole fall.
pub const FATAL_BURST: usize = 28;

/// Scatter `count` particles outward from `center`, biased upward.
pub fn spawn_burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, center: Vec2, count: usize) {
    for _ in 0..count {
        let ang = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random_range(1.5..4.0);
        particles.push(Particle {
            pos: center,
            vel: Vec2::new(ang.cos() * speed, ang.sin() * speed * -0.5),
            life: rng.random_range(0.6..1.2),
            radius: rng.random_range(2.0..=5.0),
        });
    }
}

/// Integrate and prune the particle list for one step.
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.pos += p.vel * dt * 6.0;
        p.vel.y += GRAVITY * 0.15;
        p.life -= 0.04 * dt;
    }
    particles.retain(|p| p.life > 0.0);
}
