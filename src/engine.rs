//! Core rendering engine.
//!
//! The [`Engine`] struct drives one frame: it projects mesh faces to screen
//! space, shades them with the directional light, hands them to the active
//! rasterizer and writes the finished image.

use std::path::Path;

use log::{debug, info, warn};

use crate::colors::{self, Color};
use crate::config::{RenderConfig, Scene};
use crate::light::DirectionalLight;
use crate::math::point2::Point2;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::render::{Rasterizer, RasterizerDispatcher, Renderer, Triangle};
use crate::tga::TgaImage;

/// Triangles of the [`Scene::Triangles`] demo, with their fill colors.
pub const DEMO_TRIANGLES: [([Point2; 3], Color); 3] = [
    (
        [Point2::new(10, 70), Point2::new(50, 160), Point2::new(70, 80)],
        colors::RED,
    ),
    (
        [Point2::new(180, 50), Point2::new(150, 1), Point2::new(70, 180)],
        colors::WHITE,
    ),
    (
        [Point2::new(180, 150), Point2::new(120, 160), Point2::new(130, 180)],
        colors::GREEN,
    ),
];

/// Face counts for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces considered.
    pub faces: usize,
    /// Faces handed to the rasterizer.
    pub drawn: usize,
    /// Faces turned away from the light.
    pub culled: usize,
    /// Faces with zero area, whose normal is undefined.
    pub degenerate: usize,
}

pub struct Engine {
    renderer: Renderer,
    rasterizer: RasterizerDispatcher,
    light: DirectionalLight,
    scene: Scene,
    background: Color,
    triangles_to_render: Vec<(Triangle, Color)>,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            renderer: Renderer::new(config.width, config.height, config.color_mode),
            rasterizer: RasterizerDispatcher::new(config.rasterizer),
            light: DirectionalLight::new(config.light_direction),
            scene: config.scene,
            background: config.background,
            triangles_to_render: Vec::new(),
        }
    }

    pub fn image(&self) -> &TgaImage {
        self.renderer.image()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Resets the image to the background color and the depth buffer to far.
    pub fn clear(&mut self) {
        self.renderer.clear(self.background);
    }

    /// Clears and draws one frame of the configured scene.
    ///
    /// `mesh` is required by the shaded and wireframe scenes; without one
    /// they draw nothing.
    pub fn render(&mut self, mesh: Option<&Mesh>) -> FrameStats {
        self.clear();
        let stats = match (self.scene, mesh) {
            (Scene::Triangles, _) => self.render_demo_triangles(),
            (Scene::Shaded, Some(mesh)) => self.render_shaded(mesh),
            (Scene::Wireframe, Some(mesh)) => self.render_wireframe(mesh),
            (scene, None) => {
                warn!("scene '{scene}' needs a mesh; rendering an empty frame");
                FrameStats::default()
            }
        };
        debug!(
            "{} frame via {}: {:?}",
            self.scene,
            self.rasterizer.active_type(),
            stats
        );
        stats
    }

    /// Flips the frame so the origin is bottom-left and writes it as TGA.
    pub fn write<P: AsRef<Path>>(&mut self, path: P) -> Result<(), image::ImageError> {
        self.renderer.write(path)
    }

    /// Maps normalized device coordinates in `[-1, 1]` to whole pixels.
    ///
    /// x and y are truncated to the pixel grid; z is kept as depth, so
    /// larger z is closer to the viewer.
    fn viewport(&self, v: Vec3) -> Vec3 {
        let width = self.renderer.width() as f32;
        let height = self.renderer.height() as f32;
        Vec3::new(
            ((v.x + 1.0) * width / 2.0).trunc(),
            ((v.y + 1.0) * height / 2.0).trunc(),
            v.z,
        )
    }

    fn render_shaded(&mut self, mesh: &Mesh) -> FrameStats {
        let mut stats = FrameStats {
            faces: mesh.nfaces(),
            ..FrameStats::default()
        };

        self.triangles_to_render.clear();
        for i in 0..mesh.nfaces() {
            let world = mesh.face_vertices(i);
            let Some(normal) = (world[1] - world[0]).cross(world[2] - world[0]).try_normalize()
            else {
                debug!("skipping zero-area face {i}");
                stats.degenerate += 1;
                continue;
            };

            let intensity = self.light.intensity(normal);
            if intensity <= 0.0 {
                stats.culled += 1;
                continue;
            }

            let triangle = Triangle::new(world.map(|v| self.viewport(v)));
            self.triangles_to_render
                .push((triangle, Color::gray(intensity)));
        }

        if !self.rasterizer.uses_depth() {
            // Painter's algorithm: without a depth test, farther triangles go first.
            self.triangles_to_render
                .sort_by(|a, b| a.0.avg_depth.total_cmp(&b.0.avg_depth));
        }

        let mut fb = self.renderer.as_framebuffer();
        for (triangle, color) in &self.triangles_to_render {
            self.rasterizer.fill_triangle(triangle, &mut fb, *color);
        }

        stats.drawn = self.triangles_to_render.len();
        stats
    }

    fn render_wireframe(&mut self, mesh: &Mesh) -> FrameStats {
        for i in 0..mesh.nfaces() {
            let triangle = Triangle::new(mesh.face_vertices(i).map(|v| self.viewport(v)));
            self.renderer
                .draw_triangle_wireframe(&triangle, colors::WHITE);
        }
        FrameStats {
            faces: mesh.nfaces(),
            drawn: mesh.nfaces(),
            ..FrameStats::default()
        }
    }

    fn render_demo_triangles(&mut self) -> FrameStats {
        let mut fb = self.renderer.as_framebuffer();
        for ([t0, t1, t2], color) in DEMO_TRIANGLES {
            let triangle = Triangle::from_points(t0, t1, t2);
            self.rasterizer.fill_triangle(&triangle, &mut fb, color);
        }
        info!("drew {} demo triangles", DEMO_TRIANGLES.len());
        FrameStats {
            faces: DEMO_TRIANGLES.len(),
            drawn: DEMO_TRIANGLES.len(),
            ..FrameStats::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, GREEN, RED, WHITE};
    use crate::render::{DepthBuffer, RasterizerType};

    fn engine(width: u32, height: u32, scene: Scene, rasterizer: RasterizerType) -> Engine {
        Engine::new(RenderConfig {
            width,
            height,
            scene,
            rasterizer,
            ..RenderConfig::default()
        })
    }

    fn lit(image: &TgaImage) -> usize {
        image.pixels().iter().filter(|&&c| c != BLACK).count()
    }

    #[test]
    fn shaded_cube_culls_back_faces() {
        let mut engine = engine(200, 200, Scene::Shaded, RasterizerType::Barycentric);
        let stats = engine.render(Some(&Mesh::cube()));
        assert_eq!(stats.faces, 12);
        assert_eq!(stats.degenerate, 0);
        assert_eq!(stats.drawn, 6);
        assert_eq!(stats.culled, 6);

        // The cube's centre projects to the middle of the image.
        assert_ne!(engine.image().get(100, 100), Some(BLACK));
        assert_eq!(engine.image().get(2, 2), Some(BLACK));
        assert!(engine.renderer().depth_buffer().get(100, 100) > Some(DepthBuffer::FAR));
    }

    #[test]
    fn shaded_pixels_are_gray() {
        let mut engine = engine(120, 120, Scene::Shaded, RasterizerType::Barycentric);
        engine.render(Some(&Mesh::cube()));
        for c in engine.image().pixels() {
            assert!(c.r == c.g && c.g == c.b, "{c:?}");
        }
    }

    #[test]
    fn sweep_and_barycentric_cover_similar_area() {
        let cube = Mesh::cube();
        let mut bary = engine(200, 200, Scene::Shaded, RasterizerType::Barycentric);
        bary.render(Some(&cube));
        let mut sweep = engine(200, 200, Scene::Shaded, RasterizerType::Sweep);
        sweep.render(Some(&cube));

        let (b, s) = (lit(bary.image()) as f32, lit(sweep.image()) as f32);
        assert!(b > 0.0);
        assert!((b - s).abs() / b < 0.1, "barycentric {b}, sweep {s}");
    }

    #[test]
    fn degenerate_faces_are_counted_not_drawn() {
        let verts = vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
        ];
        let mesh = Mesh::new(verts, vec![[0, 1, 2], [0, 1, 1], [0, 2, 1]]).unwrap();
        let mut engine = engine(64, 64, Scene::Shaded, RasterizerType::Barycentric);
        let stats = engine.render(Some(&mesh));
        assert_eq!(
            stats,
            FrameStats {
                faces: 3,
                drawn: 1,
                culled: 1,
                degenerate: 1
            }
        );
        assert_eq!(engine.image().get(32, 24), Some(WHITE));
    }

    #[test]
    fn wireframe_draws_outlines_only() {
        let mut engine = engine(200, 200, Scene::Wireframe, RasterizerType::default());
        let stats = engine.render(Some(&Mesh::cube()));
        assert_eq!(stats.drawn, 12);
        let n = lit(engine.image());
        assert!(n > 0);
        assert!(engine.image().pixels().iter().all(|&c| c == BLACK || c == WHITE));

        let mut filled = self::engine(200, 200, Scene::Shaded, RasterizerType::default());
        filled.render(Some(&Mesh::cube()));
        assert!(n < lit(filled.image()));
    }

    #[test]
    fn far_vertices_are_clipped() {
        let verts = vec![
            Vec3::new(-1.0e12, 0.0, 0.0),
            Vec3::new(1.0e12, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
        ];
        let mesh = Mesh::new(verts, vec![[0, 1, 2]]).unwrap();

        let mut wire = engine(64, 64, Scene::Wireframe, RasterizerType::default());
        assert_eq!(wire.render(Some(&mesh)).drawn, 1);
        // The base edge saturates to i32::MIN..=i32::MAX and crosses the whole row.
        for x in 0..64 {
            assert_eq!(wire.image().get(x, 32), Some(WHITE), "x = {x}");
        }
        assert_eq!(wire.image().get(32, 48), Some(WHITE));

        for kind in RasterizerType::ALL {
            let mut shaded = engine(64, 64, Scene::Shaded, kind);
            let stats = shaded.render(Some(&mesh));
            assert_eq!(stats.drawn, 1, "{kind}");
        }
    }

    #[test]
    fn demo_triangles_with_either_rasterizer() {
        for kind in RasterizerType::ALL {
            let mut engine = engine(200, 200, Scene::Triangles, kind);
            let stats = engine.render(None);
            assert_eq!(stats.drawn, 3);
            assert_eq!(engine.image().get(43, 103), Some(RED), "{kind}");
            assert_eq!(engine.image().get(135, 170), Some(GREEN), "{kind}");
            assert_eq!(engine.image().get(140, 80), Some(WHITE), "{kind}");
        }
    }

    #[test]
    fn missing_mesh_renders_empty_frame() {
        let mut engine = engine(32, 32, Scene::Shaded, RasterizerType::default());
        assert_eq!(engine.render(None), FrameStats::default());
        assert_eq!(lit(engine.image()), 0);
    }

    #[test]
    fn written_file_has_bottom_left_origin() {
        let path = std::env::temp_dir().join(format!("tinyraster-engine-{}.tga", std::process::id()));
        let mut engine = engine(200, 200, Scene::Triangles, RasterizerType::Sweep);
        engine.render(None);
        engine.write(&path).expect("write frame");

        // In memory the frame is untouched by the write.
        assert_eq!(engine.image().get(43, 103), Some(RED));

        let decoded = image::open(&path).expect("decode frame").to_rgb8();
        // Row y in the frame is row (height - 1 - y) in the file.
        assert_eq!(decoded.get_pixel(43, 200 - 1 - 103).0, [255, 0, 0]);
        let _ = std::fs::remove_file(&path);
    }
}
