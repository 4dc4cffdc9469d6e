//! Constants for the particle simulation
//!
//! World space spans [-1, 1] on both axes. Velocities are in world units per second.

/// Number of particles simulated by default
pub const DEFAULT_PARTICLE_COUNT: usize = 100_000;

/// Upper wall of the square domain (both axes)
pub const WORLD_MAX: f32 = 1.0;

/// Lower wall of the square domain (both axes)
pub const WORLD_MIN: f32 = -1.0;

/// Strength applied while the repel control is held.
/// Half strength so points don't get pinned to the walls too quickly.
pub const REPEL_STRENGTH: f32 = -0.5;

/// Strength applied while the attract control is held
pub const ATTRACT_STRENGTH: f32 = 1.0;

/// Maximum absolute spawn speed per axis
pub const SPAWN_SPEED: f32 = 0.2;

/// Upper bound (exclusive) of the random green channel
pub const SPAWN_GREEN_MAX: f32 = 0.4;

/// Upper bound (exclusive) of the random blue channel
pub const SPAWN_BLUE_MAX: f32 = 0.2;

/// Default viewport width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 800;

/// Default viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;
