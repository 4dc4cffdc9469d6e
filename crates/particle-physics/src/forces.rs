//! Attraction / repulsion toward a single point
//!
//! The resulting speed is `strength / distance`: the direction is normalized and then
//! divided by the distance once more, so closer particles are flung harder.

use glam::Vec2;
use rayon::prelude::*;

use crate::particle::Particle;

/// Velocity a particle at `position` gets from an attractor at `attractor`.
///
/// Returns `None` when the particle sits on the attractor (or the distance is not a
/// number), in which case the caller keeps the old velocity.
pub fn attraction_velocity(position: Vec2, attractor: Vec2, strength: f32) -> Option<Vec2> {
    let to_attractor = attractor - position;
    let distance = to_attractor.length();

    if distance.is_nan() || distance <= 0.0 {
        return None;
    }

    let direction = to_attractor / distance;
    Some(direction / distance * strength)
}

/// Overwrite the velocity of every particle with its attraction velocity.
///
/// Negative `strength` repels. Velocities are replaced, not accumulated.
pub fn apply_attraction(particles: &mut [Particle], attractor: Vec2, strength: f32) {
    particles.par_iter_mut().for_each(|particle| {
        if let Some(velocity) = attraction_velocity(particle.position(), attractor, strength) {
            particle.set_velocity(velocity);
        }
    });
}
