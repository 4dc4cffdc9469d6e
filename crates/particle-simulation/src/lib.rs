//! # Particle Simulation
//!
//! CPU simulation state and the per-frame loop: particle store, randomizer, input
//! tracking, and the hand-off of each frame to a renderer.

pub mod clock;
pub mod input;
pub mod params;
pub mod randomizer;
pub mod simulation;
pub mod sink;
pub mod store;

pub use clock::*;
pub use input::*;
pub use params::*;
pub use randomizer::*;
pub use simulation::*;
pub use sink::*;
pub use store::*;
