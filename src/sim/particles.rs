//! Cosmetic jump particles
//!
//! Not gameplay-affecting. Seeded so replays with the same seed look the same.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::world::Element;

/// Frames a particle lives
pub const PARTICLE_LIFE: u32 = 30;
/// Particles spawned per jump
pub const BURST_SIZE: usize = 10;
/// Cap on live particles
pub const MAX_PARTICLES: usize = 256;
/// Downward pull per frame
const PARTICLE_GRAVITY: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames remaining
    pub life: u32,
    pub element: Element,
}

impl Particle {
    /// Remaining life as 0-1 (for alpha)
    pub fn fade(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    rng: Pcg32,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spray a burst upward from `pos`
    pub fn burst(&mut self, pos: Vec2, element: Element) {
        for _ in 0..BURST_SIZE {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let vel = Vec2::new(
                self.rng.random_range(-1.0..1.0),
                -self.rng.random_range(0.0..2.0),
            );
            self.particles.push(Particle {
                pos,
                vel,
                life: PARTICLE_LIFE,
                element,
            });
        }
    }

    pub fn update(&mut self) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
