//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::scene::{DrawCmd, Scene};
use super::vertex::Vertex;

/// Segments for a full circle
pub const CIRCLE_SEGMENTS: u32 = 32;
/// Segments per rounded corner
pub const CORNER_SEGMENTS: u32 = 4;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Two triangles covering an axis-aligned rectangle
fn quad(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    if max.x <= min.x || max.y <= min.y {
        return;
    }
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// Quarter-circle fan around `center`, starting at `start_angle`
fn corner(out: &mut Vec<Vertex>, center: Vec2, radius: f32, start_angle: f32, color: [f32; 4]) {
    for i in 0..CORNER_SEGMENTS {
        let a1 = start_angle + (i as f32 / CORNER_SEGMENTS as f32) * FRAC_PI_2;
        let a2 = start_angle + ((i + 1) as f32 / CORNER_SEGMENTS as f32) * FRAC_PI_2;
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * a1.cos(),
            center.y + radius * a1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * a2.cos(),
            center.y + radius * a2.sin(),
            color,
        ));
    }
}

/// Generate vertices for a filled rectangle with rounded corners
pub fn rounded_rect(min: Vec2, size: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let r = radius.clamp(0.0, size.x.min(size.y) / 2.0);
    let max = min + size;
    let mut vertices = Vec::with_capacity(18 + (CORNER_SEGMENTS * 12) as usize);

    // Center column spans the full height
    quad(&mut vertices, Vec2::new(min.x + r, min.y), Vec2::new(max.x - r, max.y), color);
    if r <= 0.0 {
        return vertices;
    }

    // Side strips between the corners
    quad(&mut vertices, Vec2::new(min.x, min.y + r), Vec2::new(min.x + r, max.y - r), color);
    quad(&mut vertices, Vec2::new(max.x - r, min.y + r), Vec2::new(max.x, max.y - r), color);

    // Corners (y down: angle 0 = right, PI/2 = down)
    corner(&mut vertices, Vec2::new(max.x - r, max.y - r), r, 0.0, color);
    corner(&mut vertices, Vec2::new(min.x + r, max.y - r), r, FRAC_PI_2, color);
    corner(&mut vertices, Vec2::new(min.x + r, min.y + r), r, PI, color);
    corner(&mut vertices, Vec2::new(max.x - r, min.y + r), r, PI + FRAC_PI_2, color);

    vertices
}

/// Triangulate every shape command of a scene. Text is left to the host.
pub fn tessellate(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for cmd in &scene.cmds {
        match cmd {
            DrawCmd::RoundedRect {
                min,
                size,
                radius,
                color,
            } => vertices.extend(rounded_rect(*min, *size, *radius, *color)),
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, *color, CIRCLE_SEGMENTS)),
            DrawCmd::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut lo = Vec2::splat(f32::MAX);
        let mut hi = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            lo = lo.min(p);
            hi = hi.max(p);
        }
        (lo, hi)
    }

    #[test]
    fn test_circle_triangle_count() {
        let verts = circle(Vec2::ZERO, 10.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 16 * 3);
        let (lo, hi) = bounds(&verts);
        assert!((lo.x + 10.0).abs() < 1e-4 && (hi.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_rounded_rect_stays_in_bounds() {
        let min = Vec2::new(10.0, 90.0);
        let size = Vec2::new(57.0, 16.0);
        let verts = rounded_rect(min, size, 2.0, [1.0; 4]);
        assert_eq!(verts.len() % 3, 0);
        assert_eq!(verts.len(), 18 + CORNER_SEGMENTS as usize * 12);

        let (lo, hi) = bounds(&verts);
        assert!(lo.x >= min.x - 1e-4 && lo.y >= min.y - 1e-4);
        assert!(hi.x <= min.x + size.x + 1e-4 && hi.y <= min.y + size.y + 1e-4);
    }

    #[test]
    fn test_zero_radius_is_plain_quad() {
        let verts = rounded_rect(Vec2::ZERO, Vec2::new(4.0, 4.0), 0.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
    }

    #[test]
    fn test_tessellate_skips_text() {
        let scene = Scene {
            background: [0.0; 4],
            cmds: vec![
                DrawCmd::Circle {
                    center: Vec2::ZERO,
                    radius: 1.0,
                    color: [1.0; 4],
                },
                DrawCmd::Text {
                    text: "hi".into(),
                    pos: Vec2::ZERO,
                    font: crate::renderer::scene::Font::DEFAULT,
                    color: [1.0; 4],
                },
            ],
        };
        assert_eq!(tessellate(&scene).len(), CIRCLE_SEGMENTS as usize * 3);
    }
}
