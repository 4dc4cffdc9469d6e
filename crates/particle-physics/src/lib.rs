//! # Particle Physics
//!
//! Per-particle state and the two passes applied to it every frame: the attractor
//! force field and the bounded integrator.

pub mod constants;
pub mod forces;
pub mod integrator;
pub mod particle;

pub use constants::*;
pub use forces::*;
pub use integrator::*;
pub use particle::*;
