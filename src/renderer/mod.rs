//! WebGPU rendering module
//!
//! A [`Scene`] is flattened into one colored triangle list (shapes and
//! rasterized text alike) and drawn in a single pass.

pub mod pipeline;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::{RenderState, SurfaceRecovery};
pub use text::TextRasterizer;
pub use vertex::Vertex;

use crate::scene::{DrawItem, Scene};

/// Triangles for every item in draw order
pub fn tessellate(scene: &Scene, text: &TextRasterizer) -> Vec<Vertex> {
    let mut out = Vec::new();
    for item in &scene.items {
        match item {
            DrawItem::Text(label) => text.tessellate(label, &mut out),
            shape => tessellate_shape(shape, &mut out),
        }
    }
    out
}

/// Fill then outline; text is handled by [`TextRasterizer`]
pub fn tessellate_shape(item: &DrawItem, out: &mut Vec<Vertex>) {
    match item {
        DrawItem::Rect {
            rect,
            fill,
            outline,
            outline_thickness,
        } => {
            shapes::rect(out, *rect, *fill);
            shapes::rect_outline(out, *rect, *outline_thickness, *outline);
        }
        DrawItem::Circle {
            center,
            radius,
            fill,
            outline,
            outline_thickness,
        } => {
            shapes::circle(out, *center, *radius, *fill, shapes::CIRCLE_SEGMENTS);
            if *outline_thickness > 0.0 {
                shapes::ring(
                    out,
                    *center,
                    *radius,
                    radius + outline_thickness,
                    *outline,
                    shapes::CIRCLE_SEGMENTS,
                );
            }
        }
        DrawItem::Text(_) => {}
    }
}
