//! Particle record shared by the simulation and the renderer

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// GPU-compatible particle structure
///
/// Uploaded as-is into a vertex buffer, so the field order is part of the
/// vertex layout: position at offset 0, velocity at 8, color at 16.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in world space
    pub position: [f32; 2],
    /// Velocity in world units per second
    pub velocity: [f32; 2],
    /// RGBA color, fixed after spawning
    pub color: [f32; 4],
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            velocity: velocity.to_array(),
            color: color.to_array(),
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::from_array(self.velocity)
    }

    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.color)
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position.to_array();
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity.to_array();
    }

    /// Byte offset of `position` inside the record
    pub const POSITION_OFFSET: usize = std::mem::offset_of!(Particle, position);

    /// Byte offset of `color` inside the record
    pub const COLOR_OFFSET: usize = std::mem::offset_of!(Particle, color);
}
