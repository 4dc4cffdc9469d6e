//! Errors raised while bringing up the GPU

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for the window.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create the device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format.
    NoSurfaceFormat,
    /// The particle vertex buffer would exceed the device's buffer size limit.
    TooManyParticles { requested: usize, max: usize },
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter(e) => write!(f, "No compatible GPU adapter found: {}", e),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::NoSurfaceFormat => write!(f, "Surface does not support any texture format"),
            GpuError::TooManyParticles { requested, max } => write!(
                f,
                "{} particles do not fit in one vertex buffer on this device (max {})",
                requested, max
            ),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::NoAdapter(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoSurfaceFormat | GpuError::TooManyParticles { .. } => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for GpuError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        GpuError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}
