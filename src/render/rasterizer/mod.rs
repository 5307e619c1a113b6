//! Triangle rasterization algorithms.
//!
//! Two fill strategies are provided and can be swapped at runtime:
//! - [`SweepRasterizer`]: column sweep between the long edge and the two short edges
//! - [`BarycentricRasterizer`]: bounding box scan with barycentric inside test and depth test

pub mod barycentric;
pub mod sweep;

use std::fmt;
use std::str::FromStr;

pub use barycentric::{barycentric, fill_triangle_barycentric, BarycentricRasterizer};
pub use sweep::{fill_triangle_sweep, SweepRasterizer};

use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::math::point2::Point2;
use crate::math::vec3::Vec3;

/// A triangle ready for rasterization in screen space.
///
/// `x` and `y` are pixel coordinates, `z` is depth (larger is closer).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3; 3],
    pub avg_depth: f32,
}

impl Triangle {
    pub fn new(points: [Vec3; 3]) -> Self {
        let avg_depth = (points[0].z + points[1].z + points[2].z) / 3.0;
        Self { points, avg_depth }
    }

    /// A flat triangle at depth zero.
    pub fn from_points(t0: Point2, t1: Point2, t2: Point2) -> Self {
        let lift = |p: Point2| Vec3::new(p.x as f32, p.y as f32, 0.0);
        Self::new([lift(t0), lift(t1), lift(t2)])
    }

    /// Vertex positions truncated to the pixel grid.
    ///
    /// Coordinates beyond the `i32` range saturate to its bounds and NaN
    /// maps to zero.
    pub fn screen_points(&self) -> [Point2; 3] {
        self.points.map(|p| Point2::new(p.x as i32, p.y as i32))
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how triangles are filled into a frame buffer.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    ///
    /// # Arguments
    /// * `triangle` - The triangle to rasterize
    /// * `buffer` - The frame buffer to draw into
    /// * `color` - The color to fill the triangle with
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: Color);

    /// Whether the algorithm resolves visibility through the depth buffer.
    /// Callers must sort triangles back to front otherwise.
    fn uses_depth(&self) -> bool;
}

/// Available rasterization algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerType {
    /// Column sweep between edges. No depth test.
    Sweep,
    /// Bounding box scan with barycentric coordinates and a z-buffer.
    #[default]
    Barycentric,
}

impl RasterizerType {
    pub const ALL: [RasterizerType; 2] = [RasterizerType::Sweep, RasterizerType::Barycentric];

    pub fn name(self) -> &'static str {
        match self {
            RasterizerType::Sweep => "sweep",
            RasterizerType::Barycentric => "barycentric",
        }
    }
}

impl fmt::Display for RasterizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RasterizerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RasterizerType::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown rasterizer '{s}' (expected sweep or barycentric)"))
    }
}

/// Holds both rasterizer implementations and forwards to the active one.
pub struct RasterizerDispatcher {
    sweep: SweepRasterizer,
    barycentric: BarycentricRasterizer,
    active: RasterizerType,
}

impl RasterizerDispatcher {
    pub fn new(rasterizer_type: RasterizerType) -> Self {
        Self {
            sweep: SweepRasterizer::new(),
            barycentric: BarycentricRasterizer::new(),
            active: rasterizer_type,
        }
    }

    pub fn active_type(&self) -> RasterizerType {
        self.active
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, color: Color) {
        match self.active {
            RasterizerType::Sweep => self.sweep.fill_triangle(triangle, buffer, color),
            RasterizerType::Barycentric => self.barycentric.fill_triangle(triangle, buffer, color),
        }
    }

    fn uses_depth(&self) -> bool {
        match self.active {
            RasterizerType::Sweep => self.sweep.uses_depth(),
            RasterizerType::Barycentric => self.barycentric.uses_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, RED};
    use crate::render::framebuffer::DepthBuffer;
    use crate::tga::{ColorMode, TgaImage};
    use std::collections::BTreeSet;

    fn filled(kind: RasterizerType, triangle: &Triangle) -> BTreeSet<(i32, i32)> {
        let mut image = TgaImage::new(200, 200, ColorMode::Rgb);
        image.clear(BLACK);
        let mut depth = DepthBuffer::new(200, 200);
        let dispatcher = RasterizerDispatcher::new(kind);
        dispatcher.fill_triangle(triangle, &mut FrameBuffer::new(&mut image, &mut depth), RED);

        let mut set = BTreeSet::new();
        for y in 0..200 {
            for x in 0..200 {
                if image.get(x, y) == Some(RED) {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    #[test]
    fn parse_and_display_round_trip() {
        for kind in RasterizerType::ALL {
            assert_eq!(kind.to_string().parse::<RasterizerType>(), Ok(kind));
        }
        assert_eq!("Sweep".parse::<RasterizerType>(), Ok(RasterizerType::Sweep));
        assert!("scanline".parse::<RasterizerType>().is_err());
    }

    #[test]
    fn dispatcher_follows_active_type() {
        let dispatcher = RasterizerDispatcher::new(RasterizerType::default());
        assert_eq!(dispatcher.active_type(), RasterizerType::Barycentric);
        assert!(dispatcher.uses_depth());
        assert!(!RasterizerDispatcher::new(RasterizerType::Sweep).uses_depth());
    }

    #[test]
    fn strategies_agree_up_to_boundary_rounding() {
        let triangles = [
            Triangle::from_points(Point2::new(10, 70), Point2::new(50, 160), Point2::new(70, 80)),
            Triangle::from_points(Point2::new(180, 50), Point2::new(150, 1), Point2::new(70, 180)),
            Triangle::from_points(Point2::new(180, 150), Point2::new(120, 160), Point2::new(130, 180)),
        ];
        for triangle in &triangles {
            let sweep = filled(RasterizerType::Sweep, triangle);
            let bary = filled(RasterizerType::Barycentric, triangle);
            let [a, b, c] = triangle.points;
            let perimeter = (b - a).magnitude() + (c - b).magnitude() + (a - c).magnitude();

            let differing = sweep.symmetric_difference(&bary).count();
            assert!(!sweep.is_empty() && !bary.is_empty());
            assert!(
                (differing as f32) < perimeter,
                "{differing} differing pixels for perimeter {perimeter}"
            );
            // Interior agreement: everything strictly inside is drawn by both.
            let shared = sweep.intersection(&bary).count();
            assert!(shared as f32 > bary.len() as f32 - perimeter);
        }
    }
}
