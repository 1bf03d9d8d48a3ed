//! Tessellation of draw lists into triangles
//!
//! Shapes become triangle fans for their fill and quad strips for their
//! outline. Output vertices are in canvas pixels with every transform
//! already applied.

use glam::{Affine2, Vec2};
use std::f32::consts::TAU;

use super::draw::{ArcMode, Color, DrawCommand, DrawList, Shape, Style};
use super::vertex::Vertex;

/// Roughly one segment per this many pixels of curve
const PIXELS_PER_SEGMENT: f32 = 4.0;
const MIN_SEGMENTS: u32 = 8;
const MAX_SEGMENTS: u32 = 64;

/// Flatten a draw list into a triangle list
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    tessellate_into(list, &mut vertices);
    vertices
}

/// Flatten a draw list, appending to `out`
pub fn tessellate_into(list: &DrawList, out: &mut Vec<Vertex>) {
    let mut stack: Vec<Affine2> = Vec::new();
    let mut transform = Affine2::IDENTITY;

    for command in list.commands() {
        match command {
            DrawCommand::Save => stack.push(transform),
            DrawCommand::Restore => {
                transform = stack.pop().unwrap_or(Affine2::IDENTITY);
            }
            DrawCommand::Translate(offset) => {
                transform = transform * Affine2::from_translation(*offset);
            }
            DrawCommand::Rotate(angle) => {
                transform = transform * Affine2::from_angle(*angle);
            }
            DrawCommand::Shape { shape, style } => shape_vertices(shape, style, &transform, out),
            // Text is rasterized by the platform layer
            DrawCommand::Text { .. } => {}
        }
    }
}

fn shape_vertices(shape: &Shape, style: &Style, xf: &Affine2, out: &mut Vec<Vertex>) {
    match shape {
        Shape::Ellipse { center, size } => {
            let radii = *size / 2.0;
            let segments = segments_for(radii, TAU);
            let points: Vec<Vec2> = (0..segments)
                .map(|i| ellipse_point(*center, radii, TAU * i as f32 / segments as f32))
                .collect();
            if let Some(color) = style.fill {
                fan(xf, *center, &points, true, color, out);
            }
            stroke(xf, &points, true, style, out);
        }
        Shape::Arc {
            center,
            size,
            start,
            end,
            mode,
        } => {
            let radii = *size / 2.0;
            let span = end - start;
            let segments = segments_for(radii, span.abs());
            let points: Vec<Vec2> = (0..=segments)
                .map(|i| ellipse_point(*center, radii, start + span * i as f32 / segments as f32))
                .collect();

            if let Some(color) = style.fill {
                let anchor = match mode {
                    ArcMode::Open => *center,
                    ArcMode::Chord => points[0],
                };
                fan(xf, anchor, &points, false, color, out);
            }
            stroke(xf, &points, *mode == ArcMode::Chord, style, out);
        }
        Shape::Rect { min, size } => {
            let points = [
                *min,
                Vec2::new(min.x + size.x, min.y),
                *min + *size,
                Vec2::new(min.x, min.y + size.y),
            ];
            if let Some(color) = style.fill {
                fan(xf, *min + *size / 2.0, &points, true, color, out);
            }
            stroke(xf, &points, true, style, out);
        }
        Shape::Polygon { points } => {
            if points.len() < 3 {
                return;
            }
            if let Some(color) = style.fill {
                let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
                fan(xf, centroid, points, true, color, out);
            }
            stroke(xf, points, true, style, out);
        }
    }
}

/// Segment count for a curve spanning `span` radians
fn segments_for(radii: Vec2, span: f32) -> u32 {
    let length = radii.max_element() * span;
    ((length / PIXELS_PER_SEGMENT) as u32).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

#[inline]
fn ellipse_point(center: Vec2, radii: Vec2, theta: f32) -> Vec2 {
    center + Vec2::new(radii.x * theta.cos(), radii.y * theta.sin())
}

/// Triangles from `anchor` to each consecutive pair of points
fn fan(xf: &Affine2, anchor: Vec2, points: &[Vec2], wrap: bool, color: Color, out: &mut Vec<Vertex>) {
    if points.len() < 2 {
        return;
    }
    let pairs = if wrap { points.len() } else { points.len() - 1 };
    for i in 0..pairs {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        push_triangle(xf, anchor, a, b, color, out);
    }
}

/// Quad per segment, `style.stroke_width` wide
fn stroke(xf: &Affine2, points: &[Vec2], closed: bool, style: &Style, out: &mut Vec<Vertex>) {
    let Some(color) = style.stroke else { return };
    if style.stroke_width <= 0.0 || points.len() < 2 {
        return;
    }

    let half = style.stroke_width / 2.0;
    let segments = if closed { points.len() } else { points.len() - 1 };
    for i in 0..segments {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];

        // Perpendicular for width
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        // Extend along the segment so neighbouring quads overlap at joints
        let p1 = p1 - dir * half;
        let p2 = p2 + dir * half;

        // Two triangles
        push_triangle(xf, p1 + perp, p1 - perp, p2 + perp, color, out);
        push_triangle(xf, p2 + perp, p1 - perp, p2 - perp, color, out);
    }
}

#[inline]
fn push_triangle(xf: &Affine2, a: Vec2, b: Vec2, c: Vec2, color: Color, out: &mut Vec<Vertex>) {
    for p in [a, b, c] {
        out.push(Vertex::at(xf.transform_point2(p), color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::rgb;
    use std::f32::consts::PI;

    const BLACK: Color = [0.0, 0.0, 0.0, 1.0];

    fn positions(vertices: &[Vertex]) -> Vec<Vec2> {
        vertices
            .iter()
            .map(|v| Vec2::new(v.position[0], v.position[1]))
            .collect()
    }

    #[test]
    fn test_filled_rect_is_four_triangles() {
        let mut list = DrawList::new();
        list.rect(Vec2::ZERO, Vec2::new(10.0, 20.0), Style::fill(BLACK));

        let vertices = tessellate(&list);

        assert_eq!(vertices.len(), 12);
        for p in positions(&vertices) {
            assert!(p.x >= 0.0 && p.x <= 10.0 && p.y >= 0.0 && p.y <= 20.0);
        }
    }

    #[test]
    fn test_circle_fill_stays_inside_radius() {
        let mut list = DrawList::new();
        let center = Vec2::new(100.0, 100.0);
        list.circle(center, 50.0, Style::fill(BLACK));

        let vertices = tessellate(&list);

        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
        for p in positions(&vertices) {
            assert!(p.distance(center) <= 25.0 + 1e-3);
        }
    }

    #[test]
    fn test_outline_only_has_no_fill() {
        let mut list = DrawList::new();
        list.ellipse(Vec2::ZERO, Vec2::new(120.0, 40.0), Style::outline(BLACK, 1.0));
        let outline = tessellate(&list).len();

        let mut list = DrawList::new();
        list.ellipse(Vec2::ZERO, Vec2::new(120.0, 40.0), Style::fill(BLACK));
        let fill = tessellate(&list).len();

        // One quad (6 vertices) per segment versus one triangle per segment
        assert_eq!(outline, fill * 2);
    }

    #[test]
    fn test_transforms_apply_and_restore() {
        let mut list = DrawList::new();
        list.save();
        list.translate(Vec2::new(100.0, 50.0));
        list.rotate(PI / 2.0);
        list.rect(Vec2::ZERO, Vec2::new(10.0, 1.0), Style::fill(BLACK));
        list.restore();
        list.rect(Vec2::ZERO, Vec2::new(1.0, 1.0), Style::fill(BLACK));

        let vertices = positions(&tessellate(&list));
        let (rotated, plain) = vertices.split_at(12);

        // +x rotated a quarter turn clockwise on screen lands on +y
        assert!(rotated.iter().any(|p| p.distance(Vec2::new(100.0, 60.0)) < 1e-3));
        assert!(plain.iter().all(|p| p.x <= 1.0 && p.y <= 1.0));
    }

    #[test]
    fn test_text_and_stray_restore_are_harmless() {
        let mut list = DrawList::new();
        list.restore();
        list.text(Vec2::ZERO, "legend", 11.0, rgb(0, 0, 0));
        assert!(tessellate(&list).is_empty());
    }

    #[test]
    fn test_chord_arc_fill_stays_in_half() {
        let mut list = DrawList::new();
        list.arc(
            Vec2::ZERO,
            Vec2::new(40.0, 20.0),
            0.0,
            PI,
            ArcMode::Chord,
            Style::fill(BLACK),
        );

        let vertices = positions(&tessellate(&list));
        assert!(!vertices.is_empty());
        assert!(vertices.iter().all(|p| p.y >= -1e-3));
    }

    #[test]
    fn test_open_arc_leaves_flat_edge_unstroked() {
        let arc = |mode| {
            let mut list = DrawList::new();
            list.arc(Vec2::ZERO, Vec2::new(40.0, 20.0), PI, TAU, mode, Style::outline(BLACK, 1.0));
            tessellate(&list).len()
        };

        // Chord adds exactly one closing quad
        assert_eq!(arc(ArcMode::Chord), arc(ArcMode::Open) + 6);
    }

    #[test]
    fn test_open_arc_fills_wedge_from_center() {
        let mut list = DrawList::new();
        let center = Vec2::new(50.0, 50.0);
        list.arc(center, Vec2::new(40.0, 20.0), 0.0, PI, ArcMode::Open, Style::fill(BLACK));

        let vertices = positions(&tessellate(&list));
        assert!(vertices.chunks(3).all(|tri| tri[0] == center));
    }

    #[test]
    fn test_degenerate_polygon_skipped() {
        let mut list = DrawList::new();
        list.polygon(vec![Vec2::ZERO, Vec2::ONE], Style::fill(BLACK).stroked(BLACK, 1.0));
        assert!(tessellate(&list).is_empty());
    }
}
