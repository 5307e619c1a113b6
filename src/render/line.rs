//! Line drawing and triangle outlines.
//!
//! Lines are walked along their dominant axis. Steep lines (|dy| > |dx|)
//! are transposed so that y becomes the walked axis, which keeps the result
//! 8-connected for any slope. The minor coordinate is computed with integer
//! arithmetic only:
//!
//! ```text
//! minor = anchor.minor + (steps_from_anchor * d_minor) / d_major
//! ```
//!
//! The division truncates toward zero and is exact, so the far endpoint is
//! always reached. The anchor is the endpoint with the smaller dominant
//! coordinate, which makes the pixel set independent of endpoint order.
//! Differences are taken in `i128`, so any pair of `i32` endpoints is valid.

use crate::colors::Color;
use crate::math::point2::Point2;
use crate::tga::TgaImage;

/// Draws the segment `p0 -> p1` inclusive.
///
/// Exactly one pixel is written per dominant-axis coordinate inside the
/// image. A zero-length segment writes a single pixel. The walk is clipped
/// to the image along the dominant axis, so far endpoints cost no more than
/// the image extent; minor-axis writes outside the image are rejected by
/// [`TgaImage::set`].
pub fn draw_line(p0: Point2, p1: Point2, image: &mut TgaImage, color: Color) {
    let dx = i64::from(p1.x) - i64::from(p0.x);
    let dy = i64::from(p1.y) - i64::from(p0.y);
    let steep = dy.abs() > dx.abs();
    let (a, b) = if steep {
        (p0.transposed(), p1.transposed())
    } else {
        (p0, p1)
    };
    let extent = if steep { image.height() } else { image.width() };

    let (anchor, far) = if a.x <= b.x { (a, b) } else { (b, a) };
    let d_major = i128::from(far.x) - i128::from(anchor.x);
    let d_minor = i128::from(far.y) - i128::from(anchor.y);

    let lo = anchor.x.max(0);
    let hi = i64::from(far.x).min(i64::from(extent) - 1);
    for major in i64::from(lo)..=hi {
        // A vertical line is steep after transposition, so d_major == 0 only when a == b.
        let minor = if d_major == 0 {
            i128::from(anchor.y)
        } else {
            let t = i128::from(major) - i128::from(anchor.x);
            i128::from(anchor.y) + t * d_minor / d_major
        };
        // major is inside the image; minor lies between the endpoints' minor coordinates.
        let (major, minor) = (major as i32, minor as i32);
        if steep {
            image.set(minor, major, color);
        } else {
            image.set(major, minor, color);
        }
    }
}

/// Draws the three edges `t0 -> t1`, `t1 -> t2`, `t2 -> t0`.
pub fn draw_triangle_outline(t0: Point2, t1: Point2, t2: Point2, image: &mut TgaImage, color: Color) {
    draw_line(t0, t1, image, color);
    draw_line(t1, t2, image, color);
    draw_line(t2, t0, image, color);
}
