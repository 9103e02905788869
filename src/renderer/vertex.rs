//! GPU vertex layout for flat-colored quads

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::Rgb;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Normalized device coordinates, y up
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn new(ndc: Vec2, color: Rgb) -> Self {
        Self {
            position: ndc.to_array(),
            color: color.to_rgba_f32(),
        }
    }

    /// Buffer layout matching `VertexInput` in `shader.wgsl`
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
