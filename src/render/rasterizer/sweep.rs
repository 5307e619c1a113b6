//! Sweep fill.
//!
//! The vertices are sorted by x, which splits the triangle at the middle
//! vertex into a left and a right part. Every column of each part is a
//! vertical span between the long edge (`t0 -> t2`) and one short edge
//! (`t0 -> t1` on the left, `t1 -> t2` on the right):
//!
//! ```text
//!            t1
//!           /|\
//!          / | \
//!         /  |  \
//!       t0---+---t2      long edge t0 -> t2
//!        left  right
//! ```
//!
//! Edge y values are computed with exact integer division, truncated toward
//! the edge's left vertex. A vertical edge has no slope: it contributes its
//! whole y range to its single column instead.

use super::{Rasterizer, Triangle};
use crate::colors::Color;
use crate::math::point2::Point2;
use crate::render::framebuffer::FrameBuffer;
use crate::render::line::draw_line;
use crate::tga::TgaImage;

pub struct SweepRasterizer;

impl SweepRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SweepRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for SweepRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: Color) {
        let [t0, t1, t2] = triangle.screen_points();
        fill_triangle_sweep(t0, t1, t2, buffer.image, color);
    }

    fn uses_depth(&self) -> bool {
        false
    }
}

/// Fills the triangle, boundary included.
///
/// Columns and spans are clamped to the image, so out-of-range vertices
/// never cause out-of-bounds writes. A triangle with all vertices in one
/// column fills that column between its lowest and highest vertex.
pub fn fill_triangle_sweep(t0: Point2, t1: Point2, t2: Point2, image: &mut TgaImage, color: Color) {
    let (width, height) = (image.width(), image.height());
    sweep_columns(t0, t1, t2, width, height, |x, lo, hi| {
        draw_line(Point2::new(x, lo), Point2::new(x, hi), image, color);
    });
}

/// Calls `span(x, lo, hi)` for each column of the triangle that lies in a
/// `width × height` image, with `0 <= x < width` and `0 <= lo <= hi < height`.
fn sweep_columns<F>(t0: Point2, t1: Point2, t2: Point2, width: u32, height: u32, mut span: F)
where
    F: FnMut(i32, i32, i32),
{
    let (mut t0, mut t1, mut t2) = (t0, t1, t2);
    sort_by_x(&mut t0, &mut t1, &mut t2);
    // t0.x <= t1.x <= t2.x

    let x_max = i32::try_from(width).unwrap_or(i32::MAX) - 1;
    let y_max = i32::try_from(height).unwrap_or(i32::MAX) - 1;
    fill_columns((t0, t2), (t0, t1), x_max, y_max, &mut span);
    fill_columns((t0, t2), (t1, t2), x_max, y_max, &mut span);
}

/// Three compare-and-swap steps; enough to order exactly three items.
fn sort_by_x(t0: &mut Point2, t1: &mut Point2, t2: &mut Point2) {
    if t1.x < t0.x {
        std::mem::swap(t0, t1);
    }
    if t2.x < t0.x {
        std::mem::swap(t0, t2);
    }
    if t2.x < t1.x {
        std::mem::swap(t1, t2);
    }
}

/// Emits every column of `short`'s x range, spanning from the long edge to
/// the short edge.
fn fill_columns<F>(long: (Point2, Point2), short: (Point2, Point2), x_max: i32, y_max: i32, span: &mut F)
where
    F: FnMut(i32, i32, i32),
{
    let x_start = short.0.x.max(0);
    let x_end = short.1.x.min(x_max);

    for x in x_start..=x_end {
        let (long_lo, long_hi) = edge_span(long.0, long.1, x);
        let (short_lo, short_hi) = edge_span(short.0, short.1, x);
        let lo = long_lo.min(short_lo).max(0);
        let hi = long_hi.max(short_hi).min(y_max);
        if lo > hi {
            continue;
        }
        span(x, lo, hi);
    }
}

/// The y range covered by edge `a -> b` (with `a.x <= b.x`) at column `x`.
#[inline]
fn edge_span(a: Point2, b: Point2, x: i32) -> (i32, i32) {
    if a.x == b.x {
        return (a.y.min(b.y), a.y.max(b.y));
    }
    let t = i128::from(x) - i128::from(a.x);
    let dy = i128::from(b.y) - i128::from(a.y);
    let dx = i128::from(b.x) - i128::from(a.x);
    let y = i128::from(a.y) + t * dy / dx;
    // Within the edge's x range y stays between a.y and b.y.
    let y = y.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32;
    (y, y)
}
