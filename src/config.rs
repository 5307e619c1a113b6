//! Render settings shared by the binary and the [`Engine`](crate::Engine).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::colors::{self, Color};
use crate::math::vec3::Vec3;
use crate::render::RasterizerType;
use crate::tga::ColorMode;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 800;
/// Side of the square image the demo triangles are laid out for.
pub const DEMO_SIZE: u32 = 200;
pub const DEFAULT_OUTPUT: &str = "output.tga";
/// Mesh rendered when no path is given, relative to the working directory.
pub const DEFAULT_MESH: &str = "assets/cube.obj";
/// Light travelling into the screen, away from the viewer.
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// What a frame draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scene {
    /// Flat-shaded mesh faces lit by the directional light.
    #[default]
    Shaded,
    /// White outlines of every mesh face.
    Wireframe,
    /// Three fixed demo triangles; ignores the mesh.
    Triangles,
}

impl Scene {
    pub const ALL: [Scene; 3] = [Scene::Shaded, Scene::Wireframe, Scene::Triangles];

    pub fn name(self) -> &'static str {
        match self {
            Scene::Shaded => "shaded",
            Scene::Wireframe => "wireframe",
            Scene::Triangles => "triangles",
        }
    }

    /// Whether the scene draws a mesh.
    pub fn needs_mesh(self) -> bool {
        !matches!(self, Scene::Triangles)
    }

    /// Image size used when none is configured.
    pub fn default_size(self) -> (u32, u32) {
        match self {
            Scene::Triangles => (DEMO_SIZE, DEMO_SIZE),
            Scene::Shaded | Scene::Wireframe => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scene {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scene::ALL
            .into_iter()
            .find(|scene| scene.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown scene '{s}' (expected shaded, wireframe or triangles)"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
    pub light_direction: Vec3,
    pub scene: Scene,
    pub rasterizer: RasterizerType,
    pub background: Color,
    pub output: PathBuf,
}

impl RenderConfig {
    /// Defaults for `scene`, sized by [`Scene::default_size`].
    pub fn for_scene(scene: Scene) -> Self {
        let (width, height) = scene.default_size();
        Self {
            width,
            height,
            color_mode: ColorMode::Rgb,
            light_direction: LIGHT_DIRECTION,
            scene,
            rasterizer: RasterizerType::default(),
            background: colors::BLACK,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::for_scene(Scene::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (800, 800));
        assert_eq!(config.scene, Scene::Shaded);
        assert_eq!(config.rasterizer, RasterizerType::Barycentric);
        assert_eq!(config.output, PathBuf::from("output.tga"));
    }

    #[test]
    fn scene_names_parse() {
        for scene in Scene::ALL {
            assert_eq!(scene.name().parse::<Scene>(), Ok(scene));
        }
        assert_eq!("WIREFRAME".parse::<Scene>(), Ok(Scene::Wireframe));
        assert!("teapot".parse::<Scene>().is_err());
        assert!(!Scene::Triangles.needs_mesh());
    }

    #[test]
    fn demo_scene_defaults_to_its_own_size() {
        let config = RenderConfig::for_scene(Scene::Triangles);
        assert_eq!((config.width, config.height), (200, 200));
        assert_eq!(RenderConfig::for_scene(Scene::Wireframe).width, DEFAULT_WIDTH);
    }
}
