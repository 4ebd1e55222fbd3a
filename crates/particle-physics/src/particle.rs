//! Renderer-facing particle layout

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// GPU-compatible per-particle instance data
/// Aligned for WGSL `vec4<f32>` compatibility
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Position in 3D space
    pub position: [f32; 3],
    /// Size for rendering, derived from mass
    pub size: f32,
}

impl ParticleInstance {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            position: position.to_array(),
            size: size_from_mass(mass),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Simplified volume/size relationship: size grows with the cube root of mass
pub fn size_from_mass(mass: f32) -> f32 {
    mass.cbrt()
}

/// View a slice of instances as raw bytes for buffer upload
pub fn as_bytes(instances: &[ParticleInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
