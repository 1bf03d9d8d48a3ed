//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::draw::Color;

/// Canvas-space vertex with a straight RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(point: Vec2, color: Color) -> Self {
        Self::new(point.x, point.y, color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Fixed scene colors
pub mod colors {
    use crate::renderer::draw::{Color, rgb};

    /// Sky behind everything (clear color)
    pub const SKY: Color = rgb(137, 207, 240);
    pub const OUTLINE: Color = rgb(0, 0, 0);
    pub const WHITE: Color = rgb(255, 255, 255);

    pub const GRASS: Color = rgb(100, 150, 75);
    pub const GRASS_EDGE: Color = rgb(80, 120, 60);
    pub const FLOWER: Color = rgb(255, 50, 50);
    pub const FLOWER_CENTER: Color = rgb(255, 255, 0);
    pub const MUD: Color = rgb(139, 90, 43);
    pub const MUD_LIGHT: Color = rgb(150, 100, 50);
    pub const POND: Color = rgb(100, 150, 200);
    pub const RIPPLE: Color = rgb(150, 180, 220);

    pub const PARTY_HAT: Color = rgb(255, 192, 203);
    pub const POM_POM: Color = rgb(255, 255, 0);
    pub const TOP_HAT: Color = rgb(0, 0, 0);
    pub const HAT_BAND: Color = rgb(255, 0, 0);
    pub const CAP: Color = rgb(0, 100, 255);
    pub const BEANIE: Color = rgb(200, 0, 0);
}
