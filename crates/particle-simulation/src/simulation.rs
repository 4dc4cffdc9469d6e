//! Simulation state and the per-frame loop
//!
//! One frame: read the attractor, apply the force field for every engaged control
//! (repel first, then attract, so attract wins when both are held), integrate, and hand
//! the store to the renderer.

use particle_physics::{apply_attraction, step, Particle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::FrameClock;
use crate::input::{InputEvent, InputResponse, InputTracker};
use crate::params::SimulationParams;
use crate::randomizer::randomize;
use crate::sink::FrameSink;
use crate::store::ParticleStore;

/// Timing of a finished frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Seconds the simulation advanced by
    pub delta: f32,
    /// True when the clock's FPS estimate changed this frame
    pub fps_refreshed: bool,
}

pub struct Simulation {
    params: SimulationParams,
    store: ParticleStore,
    input: InputTracker,
    rng: StdRng,
    clock: FrameClock,
}

impl Simulation {
    /// Allocate the store and randomize it.
    pub fn new(params: SimulationParams) -> Self {
        log::info!("Initializing Simulation...");

        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut simulation = Self {
            store: ParticleStore::new(params.particle_count),
            input: InputTracker::new(params.viewport_width, params.viewport_height),
            rng,
            clock: FrameClock::new(),
            params,
        };
        simulation.randomize();

        log::info!(
            "✓ Simulation initialized with {} particles ({} bytes each)",
            simulation.store.len(),
            std::mem::size_of::<Particle>()
        );

        simulation
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Measure the next frame's delta from now. Call once setup is done so the
    /// first frame does not integrate over startup time.
    pub fn restart_clock(&mut self) {
        self.clock.restart();
    }

    /// Re-randomize every particle.
    pub fn randomize(&mut self) {
        randomize(&mut self.store, &mut self.rng);
    }

    /// Track an input event. Returns false once the user asked to quit.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match self.input.handle_event(event) {
            InputResponse::None => true,
            InputResponse::Reset => {
                log::info!("Resetting particles");
                self.randomize();
                true
            }
            InputResponse::Quit => false,
        }
    }

    /// Apply the force field for the engaged controls, then integrate by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        let attractor = self.input.state();
        let particles = self.store.as_mut_slice();

        if attractor.repel_engaged {
            apply_attraction(particles, attractor.position, self.params.repel_strength);
        }
        if attractor.attract_engaged {
            apply_attraction(particles, attractor.position, self.params.attract_strength);
        }

        step(particles, delta);
    }

    /// Update by `delta` seconds and submit the result to `sink`.
    pub fn advance<S: FrameSink + ?Sized>(
        &mut self,
        delta: f32,
        sink: &mut S,
    ) -> Result<(), S::Error> {
        self.update(delta);
        sink.submit_frame(self.store.as_slice())
    }

    /// Run one frame of the loop using wall-clock time since the previous frame.
    pub fn frame<S: FrameSink + ?Sized>(&mut self, sink: &mut S) -> Result<FrameReport, S::Error> {
        let (measured, fps_refreshed) = self.clock.tick();
        let delta = self.params.clamp_delta(measured);

        self.advance(delta, sink)?;

        Ok(FrameReport {
            delta,
            fps_refreshed,
        })
    }
}
