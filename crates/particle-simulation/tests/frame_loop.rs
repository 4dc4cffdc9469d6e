use glam::Vec2;
use particle_physics::Particle;
use particle_simulation::{FrameSink, InputEvent, PointerButton, Simulation, SimulationParams};

/// Sink that keeps a copy of every submitted frame
#[derive(Default)]
pub struct RecordingSink {
    frames: Vec<Vec<Particle>>,
}

impl FrameSink for RecordingSink {
    type Error = std::convert::Infallible;

    fn submit_frame(&mut self, particles: &[Particle]) -> Result<(), Self::Error> {
        self.frames.push(particles.to_vec());
        Ok(())
    }
}

/// Sink that refuses every frame
pub struct FailingSink;

impl FrameSink for FailingSink {
    type Error = &'static str;

    fn submit_frame(&mut self, _particles: &[Particle]) -> Result<(), Self::Error> {
        Err("surface lost")
    }
}

fn test_params(count: usize) -> SimulationParams {
    SimulationParams {
        particle_count: count,
        seed: Some(99),
        ..Default::default()
    }
}

fn in_bounds(p: &Particle) -> bool {
    p.position.iter().all(|c| (-1.0..=1.0).contains(c))
}

// ==================================================================================
// Frame hand-off
// ==================================================================================

#[test]
fn one_submission_per_frame() {
    let mut sim = Simulation::new(test_params(64));
    let mut sink = RecordingSink::default();

    for _ in 0..5 {
        sim.advance(0.016, &mut sink).unwrap();
    }

    assert_eq!(sink.frames.len(), 5);
    assert_eq!(sink.frames[4].as_slice(), sim.particles());
}

#[test]
fn submitted_frame_is_post_update() {
    let mut sim = Simulation::new(test_params(8));
    let before = sim.particles().to_vec();
    let mut sink = RecordingSink::default();

    sim.advance(0.5, &mut sink).unwrap();

    let submitted = &sink.frames[0];
    for (old, new) in before.iter().zip(submitted) {
        let expected = (old.position() + old.velocity() * 0.5).clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        assert!((new.position() - expected).length() < 1e-6);
        assert_eq!(new.color, old.color);
    }
}

#[test]
fn sink_error_is_returned() {
    let mut sim = Simulation::new(test_params(4));
    assert_eq!(sim.advance(0.0, &mut FailingSink), Err("surface lost"));
}

#[test]
fn wall_clock_frame_respects_max_delta() {
    let mut sim = Simulation::new(SimulationParams {
        max_frame_delta: Some(0.0),
        ..test_params(32)
    });
    let before = sim.particles().to_vec();
    let mut sink = RecordingSink::default();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let report = sim.frame(&mut sink).unwrap();

    assert_eq!(report.delta, 0.0);
    assert_eq!(sim.particles(), before.as_slice());
    assert_eq!(sim.clock().frame(), 1);
}

// ==================================================================================
// Properties over many frames
// ==================================================================================

#[test]
fn positions_stay_in_bounds_under_forces() {
    let mut sim = Simulation::new(test_params(2_000));
    let mut sink = RecordingSink::default();

    sim.handle_input(InputEvent::PointerMoved { x: 790.0, y: 10.0 });
    sim.handle_input(InputEvent::ButtonPressed(PointerButton::Secondary));

    for i in 0..50 {
        if i == 25 {
            sim.handle_input(InputEvent::ButtonReleased(PointerButton::Secondary));
            sim.handle_input(InputEvent::ButtonPressed(PointerButton::Primary));
        }
        sim.advance(0.05 * (i % 7) as f32, &mut sink).unwrap();
        assert!(sim.particles().iter().all(in_bounds), "frame {} left the domain", i);
    }
}

#[test]
fn attract_pulls_particles_toward_pointer() {
    let mut sim = Simulation::new(test_params(1));
    sim.store_mut()[0] = Particle::new(Vec2::new(-0.5, -0.5), Vec2::ZERO, glam::Vec4::ONE);

    // Upper-right quadrant
    sim.handle_input(InputEvent::PointerMoved { x: 600.0, y: 150.0 });
    sim.handle_input(InputEvent::ButtonPressed(PointerButton::Secondary));

    let mut sink = RecordingSink::default();
    sim.advance(0.01, &mut sink).unwrap();

    let p = sim.particles()[0];
    assert!(p.velocity[0] > 0.0 && p.velocity[1] > 0.0);
    assert!(p.position[0] > -0.5 && p.position[1] > -0.5);
}

#[test]
fn particle_on_attractor_stays_finite() {
    let mut sim = Simulation::new(test_params(1));
    sim.store_mut()[0].set_position(Vec2::ZERO);

    sim.handle_input(InputEvent::PointerMoved { x: 400.0, y: 300.0 });
    sim.handle_input(InputEvent::ButtonPressed(PointerButton::Primary));
    sim.update(0.016);

    assert!(sim.particles()[0].velocity().is_finite());
    assert!(sim.particles()[0].position().is_finite());
}
