//! Fixed-size particle storage

use std::ops::{Index, IndexMut};

use bytemuck::Zeroable;
use particle_physics::Particle;

/// Owns every particle for the lifetime of the simulation.
///
/// Allocated once and zeroed; the length never changes afterwards.
pub struct ParticleStore {
    particles: Box<[Particle]>,
}

impl ParticleStore {
    pub fn new(count: usize) -> Self {
        Self {
            particles: vec![Particle::zeroed(); count].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Read-only view handed to renderers
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

impl Index<usize> for ParticleStore {
    type Output = Particle;

    fn index(&self, index: usize) -> &Particle {
        &self.particles[index]
    }
}

impl IndexMut<usize> for ParticleStore {
    fn index_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }
}
