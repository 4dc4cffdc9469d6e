//! Renderer hand-off

use particle_physics::Particle;

/// Anything that displays a frame of particles.
///
/// `submit_frame` is called exactly once per frame with a read-only view of the whole
/// store. The view is only valid for the duration of the call; implementations copy what
/// they need (e.g. into a GPU vertex buffer) and handle their own presentation.
pub trait FrameSink {
    type Error;

    fn submit_frame(&mut self, particles: &[Particle]) -> Result<(), Self::Error>;
}
