//! Explicit Euler position update with wall bounces
//!
//! Walls sit at `WORLD_MIN` / `WORLD_MAX` on both axes. A particle that crosses a wall is
//! clamped onto it and the velocity component for that axis is negated.

use rayon::prelude::*;

use crate::constants::{WORLD_MAX, WORLD_MIN};
use crate::particle::Particle;

/// Clamp one coordinate into the domain, flipping its velocity on contact.
///
/// Returns true when a wall was hit.
#[inline]
fn bounce_axis(position: &mut f32, velocity: &mut f32) -> bool {
    if *position > WORLD_MAX {
        *position = WORLD_MAX;
        *velocity = -*velocity;
        true
    } else if *position < WORLD_MIN {
        *position = WORLD_MIN;
        *velocity = -*velocity;
        true
    } else {
        false
    }
}

/// Advance a single particle by `dt` seconds.
#[inline]
pub fn step_particle(particle: &mut Particle, dt: f32) {
    let [x, y] = &mut particle.position;
    let [dx, dy] = &mut particle.velocity;

    *x += *dx * dt;
    *y += *dy * dt;

    // Axes are independent, corners bounce on both
    bounce_axis(x, dx);
    bounce_axis(y, dy);
}

/// Advance every particle by `dt` seconds.
///
/// All writes finish before this returns.
pub fn step(particles: &mut [Particle], dt: f32) {
    particles
        .par_iter_mut()
        .for_each(|particle| step_particle(particle, dt));
}
