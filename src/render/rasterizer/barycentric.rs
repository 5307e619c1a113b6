//! Bounding-box rasterization with barycentric coordinates and a z-buffer.
//!
//! For each pixel `P` in the triangle's clamped bounding box, the weights
//! `(w0, w1, w2)` of `P = w0*A + w1*B + w2*C` are found from a single cross
//! product:
//!
//! ```text
//! u = (C.x-A.x, B.x-A.x, A.x-P.x) × (C.y-A.y, B.y-A.y, A.y-P.y)
//! (w0, w1, w2) = (1 - (u.x+u.y)/u.z, u.y/u.z, u.x/u.z)
//! ```
//!
//! `u.z` is twice the signed area of the triangle. The pixel is inside when
//! no weight is negative, which works for either winding.

use super::{Rasterizer, Triangle};
use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::{DepthBuffer, FrameBuffer};
use crate::tga::TgaImage;

/// Smallest `|u.z|` treated as a real triangle.
///
/// Screen x/y are snapped to whole pixels before rasterization, so `u.z` is
/// an integer and anything below one is exactly zero area. `u.z` is twice the
/// area, so with sub-pixel coordinates every triangle whose area is below
/// 0.5 square pixels is dropped.
pub const DEGENERATE_AREA: f32 = 1.0;

/// Returned for degenerate triangles; its negative weight rejects every pixel.
const OUTSIDE: Vec3 = Vec3::new(-1.0, 1.0, 1.0);

/// Triangle rasterizer using barycentric coordinates.
///
/// Evaluates every pixel of the bounding box and keeps only those inside the
/// triangle that pass the depth test.
pub struct BarycentricRasterizer;

impl BarycentricRasterizer {
    pub fn new() -> Self {
        BarycentricRasterizer {}
    }
}

impl Default for BarycentricRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for BarycentricRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: Color) {
        fill_triangle_barycentric(&triangle.points, buffer.depth, buffer.image, color);
    }

    fn uses_depth(&self) -> bool {
        true
    }
}

/// Barycentric weights of `p` relative to `pts`, or [`OUTSIDE`] when the
/// triangle has (near) zero area.
#[inline]
pub fn barycentric(pts: &[Vec3; 3], p: Vec2) -> Vec3 {
    let [a, b, c] = *pts;
    let xs = Vec3::new(c.x - a.x, b.x - a.x, a.x - p.x);
    let ys = Vec3::new(c.y - a.y, b.y - a.y, a.y - p.y);
    let u = xs.cross(ys);
    if u.z.abs() < DEGENERATE_AREA {
        return OUTSIDE;
    }
    Vec3::new(1.0 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z)
}

/// Fills the triangle, writing color and depth where the interpolated depth
/// is strictly greater than what the depth buffer already holds.
///
/// Depth is interpolated as `z0 + w1*(z1-z0) + w2*(z2-z0)`, which is exact
/// for triangles of constant depth. Degenerate or non-finite triangles draw
/// nothing.
pub fn fill_triangle_barycentric(
    pts: &[Vec3; 3],
    depth: &mut DepthBuffer,
    image: &mut TgaImage,
    color: Color,
) {
    if pts.iter().any(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite())) {
        return;
    }

    let clamp = Vec2::new(image.width() as f32 - 1.0, image.height() as f32 - 1.0);
    let mut bbox_min = clamp;
    let mut bbox_max = Vec2::ZERO;
    for p in pts {
        for axis in 0..2 {
            bbox_min[axis] = bbox_min[axis].min(p[axis]).max(0.0);
            bbox_max[axis] = bbox_max[axis].max(p[axis]).min(clamp[axis]);
        }
    }

    let (x_start, x_end) = (bbox_min.x.floor() as i32, bbox_max.x.ceil() as i32);
    let (y_start, y_end) = (bbox_min.y.floor() as i32, bbox_max.y.ceil() as i32);

    let [a, b, c] = *pts;
    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let w = barycentric(pts, Vec2::new(x as f32, y as f32));
            if w.x < 0.0 || w.y < 0.0 || w.z < 0.0 {
                continue;
            }
            let z = a.z + w.y * (b.z - a.z) + w.z * (c.z - a.z);
            if depth.test_and_set(x, y, z) {
                image.set(x, y, color);
            }
        }
    }
}
