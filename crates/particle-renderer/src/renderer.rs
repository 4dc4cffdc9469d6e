//! Point-list particle renderer

use particle_physics::Particle;

use crate::error::GpuError;

/// Multisample count for the color target
pub const SAMPLE_COUNT: u32 = 4;

/// Black background
const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Vertex layout reading position and color straight out of [`Particle`] records.
/// Velocity is skipped.
pub const fn particle_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
        wgpu::VertexAttribute {
            offset: Particle::POSITION_OFFSET as wgpu::BufferAddress,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        },
        wgpu::VertexAttribute {
            offset: Particle::COLOR_OFFSET as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x4,
        },
    ];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Particle>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: ATTRIBUTES,
    }
}

/// Largest particle count whose vertex buffer fits in `max_buffer_size` bytes
pub fn max_particles(max_buffer_size: u64) -> usize {
    let per_particle = std::mem::size_of::<Particle>() as u64;
    usize::try_from(max_buffer_size / per_particle).unwrap_or(usize::MAX)
}

/// Fail when `particle_count` particles cannot be held in a single vertex buffer
/// under `limits`.
pub fn check_particle_capacity(
    particle_count: usize,
    limits: &wgpu::Limits,
) -> Result<(), GpuError> {
    let max = max_particles(limits.max_buffer_size);
    if particle_count > max {
        return Err(GpuError::TooManyParticles {
            requested: particle_count,
            max,
        });
    }
    Ok(())
}

pub struct ParticleRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Particles the vertex buffer can hold
    capacity: usize,
    msaa_view: wgpu::TextureView,
}

impl ParticleRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_config: &wgpu::SurfaceConfiguration,
        capacity: usize,
    ) -> Self {
        let vertex_buffer = Self::create_vertex_buffer(device, capacity);
        let msaa_view = Self::create_msaa_texture(device, surface_config);

        // Load shader
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/particle.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vertex"),
                buffers: &[particle_vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fragment"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: SAMPLE_COUNT,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        log::info!(
            "Particle vertex buffer: {} particles, {} bytes",
            capacity,
            vertex_buffer.size()
        );

        Self {
            render_pipeline,
            vertex_buffer,
            capacity,
            msaa_view,
        }
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Vertex Buffer"),
            size: (capacity.max(1) * std::mem::size_of::<Particle>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_msaa_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let msaa_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        msaa_texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, device: &wgpu::Device, new_config: &wgpu::SurfaceConfiguration) {
        self.msaa_view = Self::create_msaa_texture(device, new_config);
    }

    /// Copy a snapshot into the vertex buffer. The store never grows, so the
    /// snapshot always fits the buffer sized at startup.
    fn upload(&self, queue: &wgpu::Queue, particles: &[Particle]) {
        debug_assert!(
            particles.len() <= self.capacity,
            "snapshot of {} particles exceeds vertex buffer capacity {}",
            particles.len(),
            self.capacity
        );

        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(particles));
    }

    /// Upload `particles` and draw them into `surface_view`.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_view: &wgpu::TextureView,
        particles: &[Particle],
    ) {
        self.upload(queue, particles);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(surface_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Discard,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..particles.len() as u32, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_particle() {
        let layout = particle_vertex_layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 16);
        assert_eq!(layout.attributes[1].format.size(), 16);
    }

    #[test]
    fn test_capacity_within_limit() {
        let limits = wgpu::Limits {
            max_buffer_size: 256 << 20,
            ..wgpu::Limits::default()
        };

        assert_eq!(max_particles(limits.max_buffer_size), 8_388_608);
        assert!(check_particle_capacity(100_000, &limits).is_ok());
        assert!(check_particle_capacity(8_388_608, &limits).is_ok());
    }

    #[test]
    fn test_capacity_over_limit() {
        let limits = wgpu::Limits {
            max_buffer_size: 256 << 20,
            ..wgpu::Limits::default()
        };

        match check_particle_capacity(10_000_000, &limits) {
            Err(GpuError::TooManyParticles { requested, max }) => {
                assert_eq!(requested, 10_000_000);
                assert_eq!(max, 8_388_608);
            }
            other => panic!("expected TooManyParticles, got {:?}", other),
        }
    }
}
