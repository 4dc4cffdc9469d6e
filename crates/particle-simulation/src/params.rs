//! Startup parameters for the simulation

use particle_physics::{
    ATTRACT_STRENGTH, DEFAULT_PARTICLE_COUNT, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
    REPEL_STRENGTH,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// Number of particles, fixed for the lifetime of the simulation
    pub particle_count: usize,

    /// Viewport used to map pointer pixels to world space
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Force field strength while repel is held (negative pushes away)
    pub repel_strength: f32,
    /// Force field strength while attract is held
    pub attract_strength: f32,

    /// Upper bound on the frame delta in seconds. `None` keeps the raw wall-clock delta,
    /// which lets particles jump a long way after a stall.
    pub max_frame_delta: Option<f32>,

    /// Seed for the randomizer. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            repel_strength: REPEL_STRENGTH,
            attract_strength: ATTRACT_STRENGTH,
            max_frame_delta: None,
            seed: None,
        }
    }
}

impl SimulationParams {
    /// Apply `max_frame_delta` to a measured delta.
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        match self.max_frame_delta {
            Some(max) => delta.min(max),
            None => delta,
        }
    }
}
