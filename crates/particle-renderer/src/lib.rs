//! # Particle Renderer
//!
//! Draws particle snapshots as colored points with wgpu.

pub mod error;
pub mod renderer;

pub use error::*;
pub use renderer::*;
