//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::scene::Color;
use crate::sim::Rect;

/// Segments used for the ball and its outline
pub const CIRCLE_SEGMENTS: u32 = 30;

/// Append two triangles covering `rect`
pub fn rect(out: &mut Vec<Vertex>, rect: Rect, color: Color) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    out.extend_from_slice(&[
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]);
}

/// Frame of `thickness` drawn outside `body`
pub fn rect_outline(out: &mut Vec<Vertex>, body: Rect, thickness: f32, color: Color) {
    if thickness <= 0.0 {
        return;
    }
    let outer = body.inflate(thickness);
    // Top and bottom span the full outer width; sides fill the gap between
    rect(out, Rect::new(outer.x, outer.y, outer.width, thickness), color);
    rect(out, Rect::new(outer.x, body.bottom(), outer.width, thickness), color);
    rect(out, Rect::new(outer.x, body.y, thickness, body.height), color);
    rect(out, Rect::new(body.right(), body.y, thickness, body.height), color);
}

/// Generate vertices for a filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: Color, segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: Color,
    segments: u32,
) {
    out.reserve((segments * 6) as usize);

    let at = |radius: f32, theta: f32| center + Vec2::new(theta.cos(), theta.sin()) * radius;

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        out.push(Vertex::new(inner1.x, inner1.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(inner2.x, inner2.y, color));

        out.push(Vertex::new(inner2.x, inner2.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(outer2.x, outer2.y, color));
    }
}
