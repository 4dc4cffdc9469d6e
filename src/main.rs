//! The Red Death
//!
//! A hundred thousand red points bouncing around a box. Hold the left mouse button to
//! push them away from the cursor, the right button to pull them in, and press space to
//! scatter them again.

use anyhow::Context;
use clap::Parser;
use particle_physics::{
    Particle, ATTRACT_STRENGTH, DEFAULT_PARTICLE_COUNT, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH, REPEL_STRENGTH,
};
use particle_renderer::{check_particle_capacity, GpuError, ParticleRenderer};
use particle_simulation::{FrameSink, InputEvent, PointerButton, Simulation, SimulationParams};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const WINDOW_TITLE: &str = "The Red Death";

#[derive(Parser, Debug)]
#[command(version, about = "Interactive particle attractor/repeller")]
struct Args {
    /// Number of particles
    #[arg(short = 'n', long, default_value_t = DEFAULT_PARTICLE_COUNT)]
    particles: usize,

    /// Initial window width in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = DEFAULT_VIEWPORT_HEIGHT)]
    height: u32,

    /// Force field strength while the left button is held
    #[arg(long, default_value_t = REPEL_STRENGTH, allow_hyphen_values = true)]
    repel: f32,

    /// Force field strength while the right button is held
    #[arg(long, default_value_t = ATTRACT_STRENGTH, allow_hyphen_values = true)]
    attract: f32,

    /// Clamp the frame delta to this many seconds (unclamped by default)
    #[arg(long)]
    max_delta: Option<f32>,

    /// Seed for particle placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_params(self) -> anyhow::Result<SimulationParams> {
        anyhow::ensure!(self.particles > 0, "particle count must be positive");
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "viewport must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );
        if let Some(max_delta) = self.max_delta {
            anyhow::ensure!(
                max_delta.is_finite() && max_delta >= 0.0,
                "max delta must be a non-negative number of seconds"
            );
        }

        Ok(SimulationParams {
            particle_count: self.particles,
            viewport_width: self.width,
            viewport_height: self.height,
            repel_strength: self.repel,
            attract_strength: self.attract,
            max_frame_delta: self.max_delta,
            seed: self.seed,
        })
    }
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    renderer: ParticleRenderer,
}

impl GpuState {
    async fn new(window: Arc<Window>, particle_count: usize) -> Result<Self, GpuError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Configure surface. Particle colors are authored as display values, so prefer a
        // non-sRGB format to avoid brightening them on write.
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        check_particle_capacity(particle_count, &device.limits())?;
        let renderer = ParticleRenderer::new(&device, &config, particle_count);
        log::info!("✓ Renderer initialized");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.renderer.resize(&self.device, &self.config);
        }
    }
}

impl FrameSink for GpuState {
    type Error = wgpu::SurfaceError;

    fn submit_frame(&mut self, particles: &[Particle]) -> Result<(), Self::Error> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&self.device, &self.queue, &view, particles);

        output.present();
        Ok(())
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    simulation: Simulation,

    // Set when the window or GPU could not be brought up
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(params: SimulationParams) -> Self {
        Self {
            window: None,
            gpu_state: None,
            simulation: Simulation::new(params),
            init_error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let params = self.simulation.params();
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                params.viewport_width,
                params.viewport_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.simulation.particles().len(),
        ))
        .context("failed to initialize GPU")?;

        // The platform may not honor the requested size
        let size = window.inner_size();
        self.simulation.handle_input(InputEvent::Resized {
            width: size.width,
            height: size.height,
        });

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);

        // Window and GPU setup can take a while; don't integrate over it
        self.simulation.restart_clock();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) else {
            return;
        };

        match self.simulation.frame(gpu_state) {
            Ok(report) => {
                if report.fps_refreshed {
                    window.set_title(&format!(
                        "{} - {:.0} FPS - {} particles",
                        WINDOW_TITLE,
                        self.simulation.clock().fps(),
                        self.simulation.particles().len()
                    ));
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.resize(window.inner_size())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Skipped frame: {:?}", e),
        }
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                log::error!("{:#}", e);
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if !self.simulation.handle_input(InputEvent::Quit) {
                    event_loop.exit();
                }
            }

            // Held space keeps re-scattering, like a repeating key-down
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.simulation.handle_input(InputEvent::Reset);
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                self.simulation.handle_input(InputEvent::Resized {
                    width: physical_size.width,
                    height: physical_size.height,
                });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let button = pointer_button(button);
                let event = match state {
                    ElementState::Pressed => InputEvent::ButtonPressed(button),
                    ElementState::Released => InputEvent::ButtonReleased(button),
                };
                self.simulation.handle_input(event);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.simulation.handle_input(InputEvent::PointerMoved {
                    x: position.x,
                    y: position.y,
                });
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = Args::parse().into_params()?;

    log::info!("Starting {}...", WINDOW_TITLE);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(params);
    event_loop
        .run_app(&mut app)
        .context("event loop exited with an error")?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_match_reference() {
        let params = Args::parse_from(["red-death"]).into_params().unwrap();
        assert_eq!(params, SimulationParams::default());
    }

    #[test]
    fn test_negative_strength_flags() {
        let params = Args::parse_from(["red-death", "--repel", "-2.0", "--attract", "3", "-n", "10"])
            .into_params()
            .unwrap();
        assert_eq!(params.repel_strength, -2.0);
        assert_eq!(params.attract_strength, 3.0);
        assert_eq!(params.particle_count, 10);
    }

    #[test]
    fn test_rejects_empty_population() {
        assert!(Args::parse_from(["red-death", "-n", "0"]).into_params().is_err());
        assert!(Args::parse_from(["red-death", "--width", "0"]).into_params().is_err());
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(pointer_button(MouseButton::Left), PointerButton::Primary);
        assert_eq!(pointer_button(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(pointer_button(MouseButton::Middle), PointerButton::Other);
    }
}
