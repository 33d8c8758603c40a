//! Text rasterization
//!
//! Glyphs are rasterized on the CPU with rusttype and emitted as one quad
//! per horizontal run of equal coverage, so text goes through the same
//! flat-color pipeline as every other shape.

use glam::Vec2;
use rusttype::{Font, Scale, point};

use super::shapes;
use super::vertex::Vertex;
use crate::scene::{Align, Label};
use crate::sim::Rect;

/// Coverage is quantized to this many alpha levels before merging runs
const COVERAGE_LEVELS: f32 = 8.0;

/// A horizontal span of pixels sharing one coverage level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Run {
    pub x: i32,
    pub y: i32,
    pub len: i32,
    /// 0..1, already quantized
    pub alpha: f32,
}

/// Merge a `width` × `height` coverage bitmap into runs. `origin` is the
/// bitmap's top-left pixel.
pub fn coverage_runs(coverage: &[f32], width: usize, origin: (i32, i32)) -> Vec<Run> {
    let mut runs = Vec::new();
    if width == 0 {
        return runs;
    }

    for (row, pixels) in coverage.chunks(width).enumerate() {
        let mut current: Option<Run> = None;
        for (col, &c) in pixels.iter().enumerate() {
            let alpha = (c.clamp(0.0, 1.0) * COVERAGE_LEVELS).round() / COVERAGE_LEVELS;
            if let Some(run) = current.as_mut().filter(|run| alpha > 0.0 && run.alpha == alpha) {
                run.len += 1;
                continue;
            }
            runs.extend(current.take());
            if alpha > 0.0 {
                current = Some(Run {
                    x: origin.0 + col as i32,
                    y: origin.1 + row as i32,
                    len: 1,
                    alpha,
                });
            }
        }
        runs.extend(current);
    }
    runs
}

/// Top-left corner of a `size` block placed at `pos` with `align`.
/// For [`Align::InsetHalf`], `size` is the sample's size.
pub fn block_origin(pos: Vec2, size: Vec2, align: Align) -> Vec2 {
    match align {
        Align::TopLeft => pos,
        Align::CenterX => Vec2::new(pos.x - size.x / 2.0, pos.y),
        Align::Center => pos - size / 2.0,
        Align::InsetHalf(_) => Vec2::new(pos.x + size.x / 2.0, pos.y),
    }
}

/// Lays out and tessellates labels with a single font
pub struct TextRasterizer {
    font: Font<'static>,
}

impl TextRasterizer {
    pub fn new(font: Font<'static>) -> Self {
        Self { font }
    }

    fn line_height(&self, scale: Scale) -> f32 {
        let v = self.font.v_metrics(scale);
        v.ascent - v.descent + v.line_gap
    }

    fn line_width(&self, line: &str, scale: Scale) -> f32 {
        self.font
            .layout(line, scale, point(0.0, 0.0))
            .last()
            .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width)
    }

    /// Size of the text block; lines split on `\n`
    pub fn measure(&self, text: &str, size: f32) -> Vec2 {
        let scale = Scale::uniform(size);
        let width = text
            .split('\n')
            .map(|line| self.line_width(line, scale))
            .fold(0.0, f32::max);
        let lines = text.split('\n').count() as f32;
        Vec2::new(width, lines * self.line_height(scale))
    }

    /// Append the label's glyph quads to `out`
    pub fn tessellate(&self, label: &Label, out: &mut Vec<Vertex>) {
        let scale = Scale::uniform(label.size);
        let ascent = self.font.v_metrics(scale).ascent;
        let line_height = self.line_height(scale);
        let measured = match label.align {
            Align::InsetHalf(sample) => sample,
            _ => label.text.as_str(),
        };
        let origin = block_origin(label.pos, self.measure(measured, label.size), label.align);

        for (i, line) in label.text.split('\n').enumerate() {
            let baseline = origin.y + ascent + i as f32 * line_height;
            for glyph in self.font.layout(line, scale, point(origin.x, baseline)) {
                let Some(bb) = glyph.pixel_bounding_box() else {
                    continue;
                };
                let width = bb.width() as usize;
                let mut coverage = vec![0.0f32; width * bb.height() as usize];
                glyph.draw(|x, y, c| {
                    coverage[y as usize * width + x as usize] = c;
                });

                for run in coverage_runs(&coverage, width, (bb.min.x, bb.min.y)) {
                    let mut color = label.color;
                    color[3] *= run.alpha;
                    let area = Rect::new(run.x as f32, run.y as f32, run.len as f32, 1.0);
                    shapes::rect(out, area, color);
                }
            }
        }
    }
}
