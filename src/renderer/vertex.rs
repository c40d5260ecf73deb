//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
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

/// Convert a `0xRRGGBB` color to linear-ish RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// CSS hex string for a color (used by the DOM text overlay)
pub fn css_hex(color: [f32; 4]) -> String {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", c(color[0]), c(color[1]), c(color[2]))
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const BACKGROUND: [f32; 4] = rgb(0x222733);
    pub const WHITE: [f32; 4] = rgb(0xffffff);
    pub const BALL: [f32; 4] = WHITE;
    pub const PADDLE: [f32; 4] = WHITE;
    pub const LIFE_LOST: [f32; 4] = rgb(0x4e525c);
    pub const TITLE_ACCENT: [f32; 4] = rgb(0xa52730);
    pub const HIGH_SCORE: [f32; 4] = rgb(0x888888);
    /// Brick colors, one per pair of rows (top to bottom)
    pub const BRICKS: [[f32; 4]; 4] = [
        rgb(0x700f16),
        rgb(0x81161d),
        rgb(0x911d25),
        rgb(0xa52730),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(css_hex(colors::BACKGROUND), "#222733");
        assert_eq!(css_hex(colors::WHITE), "#ffffff");
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
    }
}
